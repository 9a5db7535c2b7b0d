//! # Rust Log Pipeline
//!
//! An in-process logging pipeline. Records are formatted on the caller's
//! thread into pooled buffers, pushed through a bounded channel and fanned
//! out by a single background dispatcher to every registered sink.
//!
//! ## Features
//!
//! - **Cheap level gate**: records below the floor are never formatted
//! - **Structured fields**: typed key/value pairs rendered lazily into the line
//! - **Pluggable sinks**: a mandatory [`Writer`] plus optional [`Flusher`] and [`Rotater`]
//! - **Explicit backpressure**: block, block with timeout, drop newest or drop oldest
//!
//! ## Example
//!
//! ```
//! use rust_log_pipeline::prelude::*;
//! use rust_log_pipeline::{info, public};
//!
//! let logger = Logger::builder()
//!     .level(LogLevel::Info)
//!     .sink(ConsoleSink::new())
//!     .build()
//!     .unwrap();
//!
//! info!(logger, "cache warmed in {} ms", 42);
//! public!(logger, "signup"; Field::string("plan", "pro"), Field::uint("seats", 3));
//!
//! logger.close().unwrap();
//! ```

pub mod core;
pub mod global;
pub mod macros;
pub mod sinks;

pub mod prelude {
    #[cfg(feature = "console")]
    pub use crate::sinks::ConsoleSink;
    #[cfg(feature = "file")]
    pub use crate::sinks::FileSink;
    pub use crate::core::{
        DispatcherState, EncoderBuffer, FallbackHandler, Field, Flusher, LogLevel, Logger,
        LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics, OverflowPolicy, Result, Rotater,
        TimeLayout, Writer,
    };
}

#[cfg(feature = "console")]
pub use sinks::ConsoleSink;
#[cfg(feature = "file")]
pub use sinks::FileSink;
pub use crate::core::{
    stderr_fallback, BufferPool, CallSite, DispatcherState, EncoderBuffer, FallbackHandler, Field,
    FieldKind, Flusher, LogLevel, Logger, LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics,
    OverflowPolicy, Record, Result, Rotater, SinkCapabilities, SinkOperation, TimeLayout, Writer,
};
