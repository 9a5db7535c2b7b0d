//! Structured logging example
//!
//! Demonstrates typed fields, the PUBLIC level and the process-wide logger.
//!
//! Run with: cargo run --example structured_logging

use rust_log_pipeline::prelude::*;
use rust_log_pipeline::{global, info, public, warn};
use std::fmt;
use std::time::Duration;

struct Endpoint {
    host: &'static str,
    port: u16,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

#[derive(Debug)]
#[allow(dead_code)]
struct Retry {
    attempt: u32,
    backoff_ms: u64,
}

fn main() -> Result<()> {
    println!("=== Rust Log Pipeline - Structured Logging Example ===\n");

    let logger = Logger::builder().sink(ConsoleSink::new()).build()?;

    println!("1. Typed fields:");
    let endpoint = Endpoint { host: "10.0.0.7", port: 5432 };
    info!(
        logger,
        "connected";
        Field::stringer("endpoint", &endpoint),
        Field::uint("pool", 16),
        Field::duration("handshake", Duration::from_millis(12)),
    );

    let retry = Retry { attempt: 2, backoff_ms: 250 };
    warn!(
        logger,
        "query retried";
        Field::object("retry", &retry),
        Field::float64("load", 0.82),
        Field::bool("idempotent", true),
    );

    println!("\n2. PUBLIC records use the `||` separator:");
    public!(
        logger,
        "order_paid";
        Field::uint64("order", 90_211),
        Field::string("currency", "EUR"),
        Field::base64("token", b"\x01\x02\x03"),
    );

    println!("\n3. Values containing newlines stay on one line:");
    info!(logger, "user input"; Field::string("comment", "first line\nsecond line"));

    logger.close()?;

    println!("\n4. The process-wide logger:");
    global::register(ConsoleSink::new());
    global::info_fields("from the default logger", &[Field::int("answer", 42)])?;
    global::close()?;

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
