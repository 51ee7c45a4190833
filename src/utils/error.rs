//! Error handling for the frame-to-document engine
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

/// Result type alias for the engine
pub type Result<T> = std::result::Result<T, FrameDocError>;

/// Failure reported by the completion endpoint for a single request
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", describe_upstream(.status, .message))]
pub struct UpstreamError {
    /// HTTP status, `None` for transport failures and malformed bodies
    pub status: Option<u16>,
    /// Response body or transport error text
    pub message: String,
}

impl UpstreamError {
    /// Non-success HTTP status from the endpoint
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
        }
    }

    /// Transport-level failure (connect, TLS, timeout, body read)
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }

    /// Response arrived but did not carry a usable completion
    pub fn malformed(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: format!("Malformed response: {}", message.into()),
        }
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => Self::status(status.as_u16(), err.to_string()),
            None => Self::transport(err.to_string()),
        }
    }
}

fn describe_upstream(status: &Option<u16>, message: &str) -> String {
    match status {
        Some(code) => format!("HTTP {}: {}", code, message),
        None => message.to_string(),
    }
}

/// A batch that failed during fan-out, tagged with its sequence index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFailure {
    /// Sequence index of the failed batch
    pub index: usize,
    /// Underlying upstream failure
    pub error: UpstreamError,
}

/// Main error type for the engine
#[derive(Error, Debug)]
pub enum FrameDocError {
    /// Rejected before any network call
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Single-batch dispatch or consolidation failed
    #[error("Upstream error: {0}")]
    Upstream(#[from] UpstreamError),

    /// At least one batch of a multi-batch fan-out failed
    #[error("{}", describe_partial_failure(.total, .failures))]
    PartialFailure {
        /// Number of batches that were dispatched
        total: usize,
        /// Every failing batch, ordered by index
        failures: Vec<BatchFailure>,
    },

    /// Caller-initiated cancellation or job timeout
    #[error("Job cancelled before completion")]
    Cancelled,

    /// Configuration loading errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Thumbnail upload errors
    #[error("Upload error: {0}")]
    Upload(String),
}

fn describe_partial_failure(total: &usize, failures: &[BatchFailure]) -> String {
    let details: Vec<String> = failures
        .iter()
        .map(|f| format!("batch {}: {}", f.index, f.error))
        .collect();
    format!(
        "{} of {} batches failed ({})",
        failures.len(),
        total,
        details.join("; ")
    )
}

impl FrameDocError {
    /// Whether the job stopped because of cancellation or timeout
    pub fn is_cancelled(&self) -> bool {
        matches!(self, FrameDocError::Cancelled)
    }

    /// Whether the error was raised before any request was sent
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            FrameDocError::InvalidConfiguration(_) | FrameDocError::Config(_)
        )
    }

    /// Indices of failed batches, empty unless this is a partial failure
    pub fn failed_batches(&self) -> Vec<usize> {
        match self {
            FrameDocError::PartialFailure { failures, .. } => {
                failures.iter().map(|f| f.index).collect()
            }
            _ => Vec::new(),
        }
    }

    /// HTTP status of the upstream failure, if there was one
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            FrameDocError::Upstream(err) => err.status,
            _ => None,
        }
    }
}
