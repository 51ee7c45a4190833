//! # framedoc
//!
//! Turns annotated video key frames into a document with a multimodal chat
//! completion endpoint.
//!
//! ## Features
//!
//! - **Batching**: frames are split into model-sized, optionally overlapping batches
//! - **Concurrent fan-out**: every batch is in flight at once, outputs come back in input order
//! - **Consolidation**: partial outputs from several batches are merged by one final request
//! - **Cancellation**: jobs stop on a cancellation token or a job timeout
//! - **Auto-annotation**: one request per frame, run through the same fan-out
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use framedoc::{Credentials, EngineConfig, Frame, Job, JobRunner};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let runner = JobRunner::with_http(EngineConfig::default())?;
//!     let credentials = Credentials::new(
//!         "my-api-key",
//!         "https://example.openai.azure.com/openai/deployments/gpt-4o/chat/completions?api-version=2024-02-01",
//!     )?;
//!
//!     let frames = (1..=12)
//!         .map(|t| Frame::new(t as f64, format!("https://blob.example/{}.png", t)))
//!         .collect();
//!     let job = Job::new("Write an operation manual for the task shown.", frames);
//!
//!     let output = runner.run(&job, &credentials).await?;
//!     println!("{} ({} requests)", output.text, output.request_count);
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod services;
pub mod utils;

// Re-export main types
pub use config::{Config, EngineConfig, LoggingConfig};
pub use utils::error::{BatchFailure, FrameDocError, Result, UpstreamError};

pub use crate::core::batch::{Batch, BatchResult, BatchSplitter, FanOutConfig, FanOutExecutor};
pub use crate::core::frames::KeyFrameSet;
pub use crate::core::pipeline::{FrameAnnotation, Job, JobDefinition, JobOutput, JobRunner, consolidate};
pub use crate::core::prompt::{MessageFormatter, Scenario, build_consolidation_messages, build_messages};
pub use crate::core::providers::{CompletionEndpoint, Credentials, HttpCompletionClient};
pub use crate::core::types::{
    ChatMessage, ChatRequest, ChatResponse, ContentPart, FewShotExample, Frame, MessageContent,
    MessageRole,
};
pub use services::{HttpThumbnailUploader, ThumbnailUploader};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Build information
#[derive(Debug, Clone)]
pub struct BuildInfo {
    /// Version number
    pub version: &'static str,
    /// Build timestamp, seconds since the epoch
    pub build_time: &'static str,
    /// Git commit hash
    pub git_hash: &'static str,
    /// Rust version
    pub rust_version: &'static str,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            version: VERSION,
            build_time: option_env!("BUILD_TIME").unwrap_or("unknown"),
            git_hash: option_env!("GIT_HASH").unwrap_or("unknown"),
            rust_version: option_env!("RUST_VERSION").unwrap_or("unknown"),
        }
    }
}

/// Build
pub fn build_info() -> BuildInfo {
    BuildInfo::default()
}
