//! Logging macros for ergonomic record construction.
//!
//! Every macro takes a logger expression first, then either a format
//! template with arguments (positional mode) or a message, a `;` and a list
//! of [`Field`](crate::Field)s (structured mode). The call site recorded in
//! the line is the macro invocation.
//!
//! Arguments and field expressions are only evaluated when the level passes
//! the logger's floor.
//!
//! Failures are reported through the logger's fallback handler; call the
//! [`Logger`](crate::Logger) methods directly to receive the `Result`.
//!
//! # Examples
//!
//! ```
//! use rust_log_pipeline::prelude::*;
//! use rust_log_pipeline::info;
//!
//! let logger = Logger::new();
//!
//! // Positional
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//!
//! // Structured
//! info!(logger, "request served"; Field::string("path", "/health"), Field::int("status", 200));
//! # logger.close().unwrap();
//! ```

/// Log at an explicit level.
///
/// # Examples
///
/// ```
/// # use rust_log_pipeline::prelude::*;
/// # let logger = Logger::new();
/// use rust_log_pipeline::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// log!(logger, LogLevel::Public, "order"; Field::uint64("id", 7));
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $msg:expr; $($field:expr),* $(,)?) => {{
        let logger = &$logger;
        let level = $level;
        if logger.enabled(level) {
            let _ = logger.log_structured(level, $msg, &[$($field),*]);
        }
    }};
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        let logger = &$logger;
        let level = $level;
        if logger.enabled(level) {
            let _ = logger.log(level, format_args!($($arg)+));
        }
    }};
}

/// Log a trace-level record.
///
/// # Examples
///
/// ```
/// # use rust_log_pipeline::prelude::*;
/// # let logger = Logger::new();
/// # logger.set_level(LogLevel::Trace);
/// use rust_log_pipeline::trace;
/// trace!(logger, "Entering function: calculate()");
/// trace!(logger, "Variable value: {}", 42);
/// ```
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Trace, $($arg)+)
    };
}

/// Log a debug-level record.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level record.
///
/// # Examples
///
/// ```
/// # use rust_log_pipeline::prelude::*;
/// # let logger = Logger::new();
/// use rust_log_pipeline::info;
/// info!(logger, "Application started");
/// info!(logger, "Processing {} items", 100);
/// info!(logger, "batch done"; Field::int("items", 100));
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level record.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level record.
///
/// # Examples
///
/// ```
/// # use rust_log_pipeline::prelude::*;
/// # let logger = Logger::new();
/// use rust_log_pipeline::error;
/// error!(logger, "Failed to connect to database");
/// error!(logger, "Error code: {}, message: {}", 500, "Internal error");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a fatal-level record. The process keeps running.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Fatal, $($arg)+)
    };
}

/// Log a machine-consumable PUBLIC record.
///
/// Structured PUBLIC records separate fields with `||`.
///
/// # Examples
///
/// ```
/// # use rust_log_pipeline::prelude::*;
/// # let logger = Logger::new();
/// use rust_log_pipeline::public;
/// public!(logger, "payment"; Field::string("user", "u-1"), Field::float64("amount", 9.5));
/// ```
#[macro_export]
macro_rules! public {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Public, $($arg)+)
    };
}
