//! Core functionality of the engine
//!
//! Frame and message types, batching, prompt construction, the completion
//! endpoint seam and the job pipeline built on top of them.

pub mod batch;
pub mod frames;
pub mod pipeline;
pub mod prompt;
pub mod providers;
pub mod types;

// Re-export commonly used types
pub use batch::{Batch, BatchResult, BatchSplitter};
pub use frames::KeyFrameSet;
pub use pipeline::{FrameAnnotation, Job, JobDefinition, JobOutput, JobRunner};
pub use providers::{CompletionEndpoint, Credentials, HttpCompletionClient};
