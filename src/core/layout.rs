//! Timestamp layouts
//!
//! Layouts are chrono strftime strings validated once, when they are set,
//! so encoding a record never fails on a bad pattern.

use super::buffer::EncoderBuffer;
use super::error::{LoggerError, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, FixedOffset, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Millisecond precision with the fixed UTC offset: `2025-01-08T10:30:45.123+0800`
pub const DEFAULT_LAYOUT: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

/// Validated strftime layout for the record timestamp
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeLayout(String);

impl TimeLayout {
    /// Validate a strftime layout
    ///
    /// # Examples
    ///
    /// ```
    /// use rust_log_pipeline::TimeLayout;
    ///
    /// assert!(TimeLayout::new("%H:%M:%S").is_ok());
    /// assert!(TimeLayout::new("%Y-%").is_err());
    /// ```
    pub fn new(layout: impl Into<String>) -> Result<Self> {
        let layout = layout.into();
        if StrftimeItems::new(&layout).any(|item| matches!(item, Item::Error)) {
            return Err(LoggerError::layout(layout));
        }
        Ok(Self(layout))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Append `timestamp` rendered with this layout
    pub fn append_to(&self, timestamp: &DateTime<FixedOffset>, buf: &mut EncoderBuffer) {
        let mark = buf.len_mark();
        if buf
            .append_fmt(format_args!("{}", timestamp.format(&self.0)))
            .is_err()
        {
            buf.rewind(mark);
        }
    }

    /// Format into an owned string, for callers outside the hot path
    pub fn format(&self, timestamp: &DateTime<FixedOffset>) -> String {
        timestamp.format(&self.0).to_string()
    }
}

impl Default for TimeLayout {
    fn default() -> Self {
        Self(DEFAULT_LAYOUT.to_string())
    }
}

impl fmt::Display for TimeLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for TimeLayout {
    type Error = LoggerError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<TimeLayout> for String {
    fn from(layout: TimeLayout) -> Self {
        layout.0
    }
}

/// Current local time carrying its fixed UTC offset
pub fn now() -> DateTime<FixedOffset> {
    Local::now().into()
}
