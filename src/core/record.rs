//! Record construction and line encoding
//!
//! Every record becomes exactly one line:
//!
//! ```text
//! [<timestamp>] [<LEVEL>] [<file>:<line>] <body>\n
//! ```

use super::buffer::EncoderBuffer;
use super::field::Field;
use super::layout::{self, TimeLayout};
use super::log_level::LogLevel;
use chrono::{DateTime, FixedOffset};
use std::fmt;
use std::panic::Location;

/// Source location of a logging call, reduced to the file's base name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite {
    file: &'static str,
    line: u32,
}

impl CallSite {
    pub fn new(file: &'static str, line: u32) -> Self {
        Self {
            file: base_name(file),
            line,
        }
    }

    /// Location of the nearest caller not marked `#[track_caller]`
    #[track_caller]
    pub fn caller() -> Option<Self> {
        Self::from_location(Location::caller())
    }

    /// `None` when the location carries no usable file name
    pub fn from_location(location: &'static Location<'static>) -> Option<Self> {
        let file = base_name(location.file());
        if file.is_empty() {
            return None;
        }
        Some(Self {
            file,
            line: location.line(),
        })
    }

    pub fn file(&self) -> &'static str {
        self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }
}

fn base_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or("")
}

/// Record body, either a positional template or a message plus fields
#[derive(Debug, Clone, Copy)]
pub enum Body<'a> {
    Positional(fmt::Arguments<'a>),
    Structured {
        message: &'a str,
        fields: &'a [Field<'a>],
    },
}

/// One log event, built per call and consumed synchronously by [`Record::encode`]
#[derive(Debug, Clone)]
pub struct Record<'a> {
    pub timestamp: DateTime<FixedOffset>,
    pub level: LogLevel,
    pub call_site: Option<CallSite>,
    pub body: Body<'a>,
}

impl<'a> Record<'a> {
    pub fn positional(level: LogLevel, call_site: Option<CallSite>, args: fmt::Arguments<'a>) -> Self {
        Self {
            timestamp: layout::now(),
            level,
            call_site,
            body: Body::Positional(args),
        }
    }

    pub fn structured(
        level: LogLevel,
        call_site: Option<CallSite>,
        message: &'a str,
        fields: &'a [Field<'a>],
    ) -> Self {
        Self {
            timestamp: layout::now(),
            level,
            call_site,
            body: Body::Structured { message, fields },
        }
    }

    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<FixedOffset>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn is_structured(&self) -> bool {
        matches!(self.body, Body::Structured { .. })
    }

    /// Append this record as one terminated line
    pub fn encode(&self, layout: &TimeLayout, buf: &mut EncoderBuffer) {
        buf.push(b'[');
        layout.append_to(&self.timestamp, buf);
        buf.extend(b"] [");
        buf.extend(self.level.to_str().as_bytes());
        buf.extend(b"] [");
        if let Some(site) = self.call_site {
            buf.extend(site.file.as_bytes());
            buf.push(b':');
            let _ = buf.append_fmt(format_args!("{}", site.line));
        } else {
            buf.push(b':');
        }
        buf.extend(b"] ");

        match self.body {
            Body::Structured { message, fields } => {
                buf.append_escaped(message);
                let separator = self.level.field_separator().as_bytes();
                for field in fields {
                    buf.extend(separator);
                    field.write_to(buf);
                }
            }
            Body::Positional(args) => match args.as_str() {
                Some(literal) => buf.append_escaped(literal),
                None => buf.append_user_fmt(args),
            },
        }
        buf.push(b'\n');
    }
}
