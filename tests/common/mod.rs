//! Common test utilities for framedoc
//!
//! - Frame and credential fixtures
//! - A wiremock completion server that answers like an Azure deployment
//! - Custom assertions

pub mod assertions;

pub use fixtures::{FrameFactory, credentials_for};
pub use server::{CompletionServer, ScriptedResponder};
