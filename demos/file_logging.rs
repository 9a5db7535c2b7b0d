//! File logging example
//!
//! Demonstrates logging to console and two file sinks at once, one of them
//! rotated by time.
//!
//! Run with: cargo run --example file_logging

use rust_log_pipeline::prelude::*;
use rust_log_pipeline::{debug, info, warn};
use std::time::Duration;

fn main() -> Result<()> {
    println!("=== Rust Log Pipeline - File Logging Example ===\n");

    let dir = std::env::temp_dir().join("rust_log_pipeline_demo");
    let app_log = dir.join("application.log");
    let archive_log = dir.join("archive.log");

    let logger = Logger::builder()
        .level(LogLevel::Debug)
        .rotate_interval(Duration::from_secs(1))
        .sink(ConsoleSink::new())
        .build()?;

    // Rotated once per minute into application-<minute>.log
    let pattern = format!("{}/application-%Y%m%d%H%M.log", dir.display());
    logger.register_file(&app_log, &pattern)?;
    // Never rotated
    logger.register_file(&archive_log, "")?;

    println!("1. Logging to console and both files:");
    info!(logger, "Application started");
    debug!(logger, "Loading configuration...");
    info!(logger, "Configuration loaded successfully");
    warn!(logger, "Using default settings for some options");

    println!("\n2. Performing some operations:");
    for i in 1..=5 {
        info!(logger, "Processing item {}/5", i);
        if i == 3 {
            warn!(logger, "Item 3 took longer than expected");
        }
    }

    info!(logger, "All operations completed");

    // Drains the channel and flushes both files
    logger.close()?;

    println!("\n=== Example completed successfully! ===");
    println!("Check '{}' for the full log output", app_log.display());
    println!("Check '{}' for the unrotated copy", archive_log.display());

    Ok(())
}
