//! Configuration loading utilities
//!
//! Environment overrides use the `FRAMEDOC_` prefix.

use super::Config;
use super::models::LogFormat;
use crate::utils::error::{FrameDocError, Result};
use std::str::FromStr;
use tracing::debug;

impl Config {
    /// Apply `FRAMEDOC_*` overrides from the process environment
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_env_from(std::env::vars())
    }

    /// Apply `FRAMEDOC_*` overrides from the given variables
    pub fn apply_env_from<I, K, V>(&mut self, vars: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (key, value) in vars {
            let (key, value) = (key.as_ref(), value.as_ref().trim());
            let engine = &mut self.engine;
            match key {
                "FRAMEDOC_MAX_BATCH_SIZE" => engine.max_batch_size = parse(key, value)?,
                "FRAMEDOC_OVERLAP" => engine.overlap = parse(key, value)?,
                "FRAMEDOC_MAX_TOKENS" => engine.max_tokens = parse(key, value)?,
                "FRAMEDOC_TEMPERATURE" => engine.deterministic_temperature = parse(key, value)?,
                "FRAMEDOC_BATCH_TEMPERATURE" => engine.batch_temperature = parse_optional(key, value)?,
                "FRAMEDOC_MAX_CONCURRENCY" => engine.max_concurrency = parse_optional(key, value)?,
                "FRAMEDOC_REQUEST_TIMEOUT" => engine.request_timeout_secs = parse(key, value)?,
                "FRAMEDOC_JOB_TIMEOUT" => engine.job_timeout_secs = parse_optional(key, value)?,
                "FRAMEDOC_LOG_LEVEL" => self.logging.level = value.to_string(),
                "FRAMEDOC_LOG_FORMAT" => {
                    self.logging.format = match value.to_lowercase().as_str() {
                        "json" => LogFormat::Json,
                        "text" | "pretty" => LogFormat::Text,
                        other => {
                            return Err(FrameDocError::Config(format!(
                                "Invalid {}: {}",
                                key, other
                            )));
                        }
                    }
                }
                _ => continue,
            }
            debug!(key, "Applied environment override");
        }
        Ok(())
    }
}

fn parse<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse()
        .map_err(|e| FrameDocError::Config(format!("Invalid {}: {}", key, e)))
}

/// Empty value clears the setting
fn parse_optional<T>(key: &str, value: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    if value.is_empty() {
        Ok(None)
    } else {
        parse(key, value).map(Some)
    }
}
