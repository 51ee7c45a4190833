//! Configuration validation

use super::Config;
use super::models::{EngineConfig, LoggingConfig};
use crate::utils::error::{FrameDocError, Result};
use tracing::debug;

/// Configuration validation trait
pub trait Validate {
    /// Check the configuration before it is used
    fn validate(&self) -> Result<()>;
}

impl Validate for Config {
    fn validate(&self) -> Result<()> {
        debug!("Validating configuration");
        self.engine.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

impl Validate for EngineConfig {
    fn validate(&self) -> Result<()> {
        if self.max_batch_size == 0 {
            return Err(invalid("max_batch_size must be at least 1"));
        }
        if self.overlap >= self.max_batch_size {
            return Err(invalid(format!(
                "overlap ({}) must be smaller than max_batch_size ({})",
                self.overlap, self.max_batch_size
            )));
        }
        if self.max_tokens == 0 {
            return Err(invalid("max_tokens must be greater than 0"));
        }
        check_temperature("deterministic_temperature", self.deterministic_temperature)?;
        if let Some(temperature) = self.batch_temperature {
            check_temperature("batch_temperature", temperature)?;
        }
        if self.max_concurrency == Some(0) {
            return Err(invalid("max_concurrency must be greater than 0"));
        }
        if self.request_timeout_secs == 0 {
            return Err(invalid("request_timeout_secs must be greater than 0"));
        }
        if self.job_timeout_secs == Some(0) {
            return Err(invalid("job_timeout_secs must be greater than 0"));
        }
        Ok(())
    }
}

impl Validate for LoggingConfig {
    fn validate(&self) -> Result<()> {
        if self.level.trim().is_empty() {
            return Err(invalid("logging level must not be empty"));
        }
        Ok(())
    }
}

fn check_temperature(name: &str, value: f32) -> Result<()> {
    if !(0.0..=2.0).contains(&value) {
        return Err(invalid(format!(
            "{} must be between 0.0 and 2.0, got {}",
            name, value
        )));
    }
    Ok(())
}

fn invalid(message: impl Into<String>) -> FrameDocError {
    FrameDocError::InvalidConfiguration(message.into())
}
