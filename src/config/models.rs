//! Configuration models

use crate::core::batch::{BatchSplitter, FanOutConfig};
use crate::core::types::RequestSettings;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default maximum frames per batch
pub const DEFAULT_MAX_BATCH_SIZE: usize = 5;
/// Default maximum output tokens per request
pub const DEFAULT_MAX_TOKENS: u32 = 4096;
/// Default HTTP timeout per request, in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 180;

/// Engine tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum frames per batch
    pub max_batch_size: usize,
    /// Frames shared between consecutive batches
    pub overlap: usize,
    /// Maximum output tokens per request
    pub max_tokens: u32,
    /// Temperature for single-batch and consolidation requests
    pub deterministic_temperature: f32,
    /// Temperature for fan-out batch requests, `None` uses the provider default
    pub batch_temperature: Option<f32>,
    /// Cap on batch requests in flight, `None` sends every batch at once.
    ///
    /// A cap holds back batches past the limit until earlier ones finish, so
    /// the batches are no longer all issued before the first is awaited.
    pub max_concurrency: Option<usize>,
    /// HTTP timeout per request, in seconds
    pub request_timeout_secs: u64,
    /// Whole-job timeout, in seconds
    pub job_timeout_secs: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
            overlap: 0,
            max_tokens: DEFAULT_MAX_TOKENS,
            deterministic_temperature: 0.0,
            batch_temperature: None,
            max_concurrency: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            job_timeout_secs: None,
        }
    }
}

impl EngineConfig {
    /// Batch splitter for these settings
    pub fn splitter(&self) -> Result<BatchSplitter> {
        BatchSplitter::new(self.max_batch_size, self.overlap)
    }

    /// Settings for fan-out batch requests
    pub fn batch_settings(&self) -> RequestSettings {
        RequestSettings {
            max_tokens: self.max_tokens,
            temperature: self.batch_temperature,
        }
    }

    /// Settings for the single-batch path and for consolidation
    pub fn deterministic_settings(&self) -> RequestSettings {
        RequestSettings {
            max_tokens: self.max_tokens,
            temperature: Some(self.deterministic_temperature),
        }
    }

    /// Fan-out executor configuration
    pub fn fan_out(&self) -> FanOutConfig {
        match self.max_concurrency {
            Some(limit) => FanOutConfig::new().with_concurrency(limit),
            None => FanOutConfig::new(),
        }
    }

    /// HTTP timeout per request
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Whole-job timeout
    pub fn job_timeout(&self) -> Option<Duration> {
        self.job_timeout_secs.map(Duration::from_secs)
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive, `RUST_LOG` takes precedence
    pub level: String,
    /// Output format
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
        }
    }
}
