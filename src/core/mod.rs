//! Core pipeline types and traits

pub mod buffer;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod fallback;
pub mod field;
pub mod layout;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod overflow_policy;
pub mod record;
pub mod sink;

pub use buffer::{BufferPool, EncoderBuffer, DEFAULT_BUFFER_CAPACITY, DEFAULT_POOL_SIZE};
pub use config::{
    LoggerConfig, DEFAULT_CHANNEL_CAPACITY, DEFAULT_FLUSH_INITIAL_DELAY, DEFAULT_FLUSH_INTERVAL,
    DEFAULT_ROTATE_INTERVAL,
};
pub use dispatcher::DispatcherState;
pub use error::{LoggerError, Result, SinkOperation};
pub use fallback::{stderr_fallback, FallbackHandler};
pub use field::{Field, FieldKind};
pub use layout::{TimeLayout, DEFAULT_LAYOUT};
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use overflow_policy::OverflowPolicy;
pub use record::{Body, CallSite, Record};
pub use sink::{Flusher, Rotater, SinkCapabilities, Writer};
