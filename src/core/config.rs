//! Logger configuration
//!
//! The configuration is deliberately small: a severity threshold and the
//! buffering knobs of the shared sink.

use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default buffer size for buffered output (32 KiB)
pub const DEFAULT_BUFFER_CAPACITY: usize = 32 * 1024;

/// Default period of the background flusher
pub const DEFAULT_FLUSH_INTERVAL: Duration = Duration::from_secs(1);

/// Configuration consumed by [`LoggerBuilder`](crate::LoggerBuilder)
///
/// # Examples
///
/// ```
/// use rust_structured_logger::{Config, LogLevel};
///
/// let config = Config::new()
///     .with_min_level(LogLevel::DEBUG)
///     .with_buffered_output(true);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Records below this level are dropped without encoding
    pub min_level: LogLevel,
    /// Buffer writes and flush them from a background thread
    pub buffered_output: bool,
    /// Buffer size in bytes, used when `buffered_output` is set
    pub buffer_capacity: usize,
    /// Background flush period in milliseconds
    pub flush_interval_ms: u64,
    /// Escape strings in the JSON format (quotes, backslashes, control characters)
    pub escape_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_level: LogLevel::INFO,
            buffered_output: false,
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            flush_interval_ms: DEFAULT_FLUSH_INTERVAL.as_millis() as u64,
            escape_json: false,
        }
    }
}

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    #[must_use]
    pub fn with_buffered_output(mut self, buffered: bool) -> Self {
        self.buffered_output = buffered;
        self
    }

    #[must_use]
    pub fn with_buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer_capacity = capacity;
        self
    }

    #[must_use]
    pub fn with_flush_interval(mut self, interval: Duration) -> Self {
        self.flush_interval_ms = interval.as_millis() as u64;
        self
    }

    #[must_use]
    pub fn with_escape_json(mut self, escape: bool) -> Self {
        self.escape_json = escape;
        self
    }

    pub fn flush_interval(&self) -> Duration {
        Duration::from_millis(self.flush_interval_ms)
    }

    /// Check that buffering knobs are usable
    pub fn validate(&self) -> Result<()> {
        if !self.buffered_output {
            return Ok(());
        }
        if self.buffer_capacity == 0 {
            return Err(LoggerError::config("Config", "buffer_capacity must be non-zero"));
        }
        if self.flush_interval_ms == 0 {
            return Err(LoggerError::config("Config", "flush_interval_ms must be non-zero"));
        }
        Ok(())
    }

    /// Parse a JSON configuration; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}
