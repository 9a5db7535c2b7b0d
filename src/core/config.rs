//! Logger configuration
//!
//! All knobs of one logger instance in a serde-friendly struct. Missing keys
//! fall back to the defaults, so a JSON document only needs to name what it
//! changes.

use super::buffer::{DEFAULT_BUFFER_CAPACITY, DEFAULT_POOL_SIZE};
use super::error::{LoggerError, Result};
use super::layout::TimeLayout;
use super::log_level::LogLevel;
use super::overflow_policy::OverflowPolicy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default delivery channel capacity
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1024;

/// Delay before the first flush tick
pub const DEFAULT_FLUSH_INITIAL_DELAY: Duration = Duration::from_millis(500);

/// Interval between later flush ticks
pub const DEFAULT_FLUSH_INTERVAL: Duration = Duration::from_millis(1000);

/// Interval between rotate ticks
pub const DEFAULT_ROTATE_INTERVAL: Duration = Duration::from_secs(10);

/// Configuration for one [`Logger`](crate::Logger)
///
/// # Example
///
/// ```
/// use rust_log_pipeline::{LogLevel, LoggerConfig, OverflowPolicy};
///
/// let config = LoggerConfig::from_json(
///     r#"{ "level": "Info", "channel_capacity": 256, "overflow_policy": "DropOldest" }"#,
/// )
/// .unwrap();
///
/// assert_eq!(config.level, LogLevel::Info);
/// assert_eq!(config.channel_capacity, 256);
/// assert_eq!(config.overflow_policy, OverflowPolicy::DropOldest);
/// assert_eq!(config.rotate_interval_ms, 10_000);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Records below this level are discarded before formatting
    pub level: LogLevel,
    /// strftime layout of the timestamp
    pub layout: TimeLayout,
    /// Capacity of the delivery channel
    pub channel_capacity: usize,
    /// Initial capacity of pooled buffers, in bytes
    pub buffer_capacity: usize,
    /// Maximum number of idle buffers retained by the pool
    pub pool_size: usize,
    /// What producers do when the channel is full
    pub overflow_policy: OverflowPolicy,
    pub flush_initial_delay_ms: u64,
    pub flush_interval_ms: u64,
    pub rotate_interval_ms: u64,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Debug,
            layout: TimeLayout::default(),
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            pool_size: DEFAULT_POOL_SIZE,
            overflow_policy: OverflowPolicy::default(),
            flush_initial_delay_ms: DEFAULT_FLUSH_INITIAL_DELAY.as_millis() as u64,
            flush_interval_ms: DEFAULT_FLUSH_INTERVAL.as_millis() as u64,
            rotate_interval_ms: DEFAULT_ROTATE_INTERVAL.as_millis() as u64,
        }
    }
}

impl LoggerConfig {
    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        let config: LoggerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.channel_capacity == 0 {
            return Err(LoggerError::config(
                "LoggerConfig",
                "channel_capacity must be greater than zero",
            ));
        }
        if self.buffer_capacity == 0 {
            return Err(LoggerError::config(
                "LoggerConfig",
                "buffer_capacity must be greater than zero",
            ));
        }
        if self.pool_size == 0 {
            return Err(LoggerError::config(
                "LoggerConfig",
                "pool_size must be greater than zero",
            ));
        }
        for (name, value) in [
            ("flush_initial_delay_ms", self.flush_initial_delay_ms),
            ("flush_interval_ms", self.flush_interval_ms),
            ("rotate_interval_ms", self.rotate_interval_ms),
        ] {
            if value == 0 {
                return Err(LoggerError::config(
                    "LoggerConfig",
                    format!("{} must be greater than zero", name),
                ));
            }
        }
        Ok(())
    }

    pub fn flush_initial_delay(&self) -> Duration {
        Duration::from_millis(self.flush_initial_delay_ms)
    }

    pub fn flush_interval(&self) -> Duration {
        Duration::from_millis(self.flush_interval_ms)
    }

    pub fn rotate_interval(&self) -> Duration {
        Duration::from_millis(self.rotate_interval_ms)
    }
}
