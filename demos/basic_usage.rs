//! Basic usage example
//!
//! Demonstrates building a logger, the level gate and the logging macros.
//!
//! Run with: cargo run --example basic_usage

use rust_log_pipeline::prelude::*;
use rust_log_pipeline::{debug, error, fatal, info, public, trace, warn};

fn main() -> Result<()> {
    println!("=== Rust Log Pipeline - Basic Usage Example ===\n");

    let logger = Logger::builder()
        .level(LogLevel::Trace)
        .sink(ConsoleSink::new())
        .build()?;

    println!("1. Logging at every level:");
    trace!(logger, "This is a trace message");
    debug!(logger, "This is a debug message");
    info!(logger, "This is an info message");
    warn!(logger, "This is a warning message");
    error!(logger, "This is an error message");
    fatal!(logger, "This is a fatal message");
    public!(logger, "This is a public message");

    println!("\n2. Formatted arguments:");
    let user = "alice";
    info!(logger, "User {} logged in after {} attempts", user, 2);

    println!("\n3. Raising the level floor to WARN:");
    logger.set_level(LogLevel::Warn);
    debug!(logger, "This debug message is discarded before formatting");
    info!(logger, "So is this info message");
    warn!(logger, "This warning gets through");

    println!("\n4. Changing the timestamp layout:");
    logger.set_layout("%H:%M:%S")?;
    error!(logger, "Only the time of day is shown now");

    logger.close()?;

    let metrics = logger.metrics();
    println!(
        "\nDelivered {} of {} enqueued records",
        metrics.total_delivered(),
        metrics.total_enqueued()
    );
    println!("\n=== Example completed successfully! ===");

    Ok(())
}
