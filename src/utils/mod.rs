//! Utility modules
//!
//! - **error**: error types shared by every module
//! - **logging**: tracing subscriber setup

pub mod error;
pub mod logging;

pub use error::{BatchFailure, FrameDocError, Result, UpstreamError};
pub use logging::init_logging;
