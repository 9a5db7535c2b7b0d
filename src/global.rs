//! Process-wide default logger
//!
//! The default instance is created on first use with the default
//! configuration and no sinks, or installed explicitly with [`init`] before
//! first use. It mirrors the [`Logger`] operations as free functions and is
//! torn down with [`close`]; records logged after that are rejected with
//! [`LoggerError::LoggerStopped`].
//!
//! Tests should build their own [`Logger`] rather than share this one.
//!
//! # Example
//!
//! ```
//! use rust_log_pipeline::global;
//! use rust_log_pipeline::prelude::*;
//!
//! global::register(ConsoleSink::new());
//! global::info(format_args!("service started")).unwrap();
//! global::info_fields("ready", &[Field::uint("workers", 4)]).unwrap();
//! global::close().unwrap();
//! ```

use crate::core::{Field, LogLevel, Logger, LoggerConfig, LoggerError, Result, Writer};
use std::fmt;
use std::sync::OnceLock;

static LOGGER: OnceLock<Logger> = OnceLock::new();

/// The default logger, created on first use
pub fn logger() -> &'static Logger {
    LOGGER.get_or_init(Logger::new)
}

/// Install a default logger built from `config`
///
/// Fails if the default logger already exists, including when it was
/// created implicitly by an earlier call.
pub fn init(config: LoggerConfig) -> Result<()> {
    let logger = Logger::with_config(config)?;
    LOGGER
        .set(logger)
        .map_err(|_| LoggerError::config("global", "default logger already initialized"))
}

/// # Panics
///
/// Panics if the sink fails to initialize.
pub fn register<W: Writer + 'static>(sink: W) {
    logger().register(sink)
}

pub fn try_register<W: Writer + 'static>(sink: W) -> Result<()> {
    logger().try_register(sink)
}

#[cfg(feature = "file")]
pub fn register_file(path: impl AsRef<std::path::Path>, rotate_pattern: &str) -> Result<()> {
    logger().register_file(path, rotate_pattern)
}

pub fn set_level(level: LogLevel) {
    logger().set_level(level)
}

pub fn level() -> LogLevel {
    logger().level()
}

pub fn set_layout(layout: &str) -> Result<()> {
    logger().set_layout(layout)
}

#[track_caller]
pub fn log(level: LogLevel, args: fmt::Arguments<'_>) -> Result<()> {
    logger().log(level, args)
}

#[track_caller]
pub fn log_structured(level: LogLevel, message: &str, fields: &[Field<'_>]) -> Result<()> {
    logger().log_structured(level, message, fields)
}

#[track_caller]
pub fn trace(args: fmt::Arguments<'_>) -> Result<()> {
    logger().trace(args)
}

#[track_caller]
pub fn debug(args: fmt::Arguments<'_>) -> Result<()> {
    logger().debug(args)
}

#[track_caller]
pub fn info(args: fmt::Arguments<'_>) -> Result<()> {
    logger().info(args)
}

#[track_caller]
pub fn warn(args: fmt::Arguments<'_>) -> Result<()> {
    logger().warn(args)
}

#[track_caller]
pub fn error(args: fmt::Arguments<'_>) -> Result<()> {
    logger().error(args)
}

#[track_caller]
pub fn fatal(args: fmt::Arguments<'_>) -> Result<()> {
    logger().fatal(args)
}

#[track_caller]
pub fn public(args: fmt::Arguments<'_>) -> Result<()> {
    logger().public(args)
}

#[track_caller]
pub fn trace_fields(message: &str, fields: &[Field<'_>]) -> Result<()> {
    logger().trace_fields(message, fields)
}

#[track_caller]
pub fn debug_fields(message: &str, fields: &[Field<'_>]) -> Result<()> {
    logger().debug_fields(message, fields)
}

#[track_caller]
pub fn info_fields(message: &str, fields: &[Field<'_>]) -> Result<()> {
    logger().info_fields(message, fields)
}

#[track_caller]
pub fn warn_fields(message: &str, fields: &[Field<'_>]) -> Result<()> {
    logger().warn_fields(message, fields)
}

#[track_caller]
pub fn error_fields(message: &str, fields: &[Field<'_>]) -> Result<()> {
    logger().error_fields(message, fields)
}

#[track_caller]
pub fn fatal_fields(message: &str, fields: &[Field<'_>]) -> Result<()> {
    logger().fatal_fields(message, fields)
}

#[track_caller]
pub fn public_fields(message: &str, fields: &[Field<'_>]) -> Result<()> {
    logger().public_fields(message, fields)
}

/// Drain and stop the default logger
pub fn close() -> Result<()> {
    logger().close()
}
