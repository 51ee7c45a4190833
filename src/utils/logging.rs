//! Logging setup
//!
//! `RUST_LOG` wins over the configured level when it is set.

use crate::config::{LogFormat, LoggingConfig};
use crate::utils::error::{FrameDocError, Result};
use tracing_subscriber::EnvFilter;

/// Build the filter for a logging configuration
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    let filter = match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(directives) if !directives.trim().is_empty() => EnvFilter::try_new(directives),
        _ => EnvFilter::try_new(&config.level),
    };
    filter.map_err(|e| FrameDocError::Config(format!("Invalid log filter: {}", e)))
}

/// Install the global tracing subscriber.
///
/// Fails if a subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = env_filter(config)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr);

    let installed = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.try_init(),
    };
    installed.map_err(|e| FrameDocError::Config(format!("Failed to initialize logging: {}", e)))
}
