//! Stress tests for the delivery pipeline
//!
//! These tests verify:
//! - No record is lost under the blocking policy with many producers
//! - Per-producer order survives interleaving
//! - Drop policies account for every record under overload
//! - Concurrent logging to a file sink yields whole lines only

use parking_lot::Mutex;
use rust_log_pipeline::prelude::*;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tempfile::TempDir;

const PRODUCERS: usize = 8;
const PER_PRODUCER: usize = 2_000;

#[derive(Clone, Default)]
struct Collect(Arc<Mutex<Vec<String>>>);

impl Writer for Collect {
    fn init(&mut self) -> Result<()> {
        Ok(())
    }

    fn write(&mut self, buffer: &EncoderBuffer) -> Result<()> {
        self.0.lock().push(buffer.to_string_lossy().into_owned());
        Ok(())
    }

    fn name(&self) -> &str {
        "collect"
    }
}

/// Counts writes and sleeps a little on each to keep the channel full
#[derive(Clone, Default)]
struct Slow(Arc<AtomicUsize>);

impl Writer for Slow {
    fn init(&mut self) -> Result<()> {
        Ok(())
    }

    fn write(&mut self, _buffer: &EncoderBuffer) -> Result<()> {
        self.0.fetch_add(1, Ordering::Relaxed);
        thread::sleep(Duration::from_micros(50));
        Ok(())
    }

    fn name(&self) -> &str {
        "slow"
    }
}

fn spawn_producers(logger: &Arc<Logger>, per_producer: usize) -> Vec<thread::JoinHandle<usize>> {
    (0..PRODUCERS)
        .map(|producer| {
            let logger = Arc::clone(logger);
            thread::spawn(move || {
                let mut accepted = 0;
                for seq in 0..per_producer {
                    let fields = [Field::uint("p", producer), Field::uint("seq", seq)];
                    if logger.info_fields("tick", &fields).is_ok() {
                        accepted += 1;
                    }
                }
                accepted
            })
        })
        .collect()
}

fn parse_pair(line: &str, key: &str) -> usize {
    let marker = format!(" {}=", key);
    let start = line.find(&marker).expect("field present") + marker.len();
    line[start..]
        .split(|c: char| !c.is_ascii_digit())
        .next()
        .and_then(|n| n.parse().ok())
        .expect("numeric field")
}

#[test]
fn test_blocking_policy_loses_nothing() {
    let sink = Collect::default();
    let logger = Arc::new(
        Logger::builder()
            .channel_capacity(16)
            .overflow_policy(OverflowPolicy::Block)
            .sink(sink.clone())
            .build()
            .expect("build"),
    );

    let handles = spawn_producers(&logger, PER_PRODUCER);
    for handle in handles {
        assert_eq!(handle.join().expect("producer"), PER_PRODUCER);
    }
    logger.close().expect("close");

    let lines = sink.0.lock();
    assert_eq!(lines.len(), PRODUCERS * PER_PRODUCER);
    assert_eq!(logger.metrics().dropped_count(), 0);
    assert_eq!(
        logger.metrics().total_delivered(),
        (PRODUCERS * PER_PRODUCER) as u64
    );

    // Each producer's records arrive in the order it pushed them
    let mut next: HashMap<usize, usize> = HashMap::new();
    for line in lines.iter() {
        let producer = parse_pair(line, "p");
        let seq = parse_pair(line, "seq");
        let expected = next.entry(producer).or_insert(0);
        assert_eq!(seq, *expected, "producer {} out of order", producer);
        *expected += 1;
    }
}

#[test]
fn test_drop_newest_accounts_for_every_record() {
    let sink = Slow::default();
    let logger = Arc::new(
        Logger::builder()
            .channel_capacity(4)
            .overflow_policy(OverflowPolicy::DropNewest)
            .fallback(Arc::new(|_: &LoggerError| {}))
            .sink(sink.clone())
            .build()
            .expect("build"),
    );

    let accepted: usize = spawn_producers(&logger, 500)
        .into_iter()
        .map(|h| h.join().expect("producer"))
        .sum();
    logger.close().expect("close");

    let metrics = logger.metrics();
    let total = (PRODUCERS * 500) as u64;
    assert_eq!(accepted as u64, metrics.total_enqueued());
    assert_eq!(metrics.total_enqueued() + metrics.dropped_count(), total);
    assert_eq!(sink.0.load(Ordering::Relaxed) as u64, metrics.total_enqueued());
    assert!(metrics.dropped_count() > 0);
}

#[test]
fn test_drop_oldest_never_rejects_and_recycles_buffers() {
    let sink = Slow::default();
    let logger = Arc::new(
        Logger::builder()
            .channel_capacity(4)
            .overflow_policy(OverflowPolicy::DropOldest)
            .fallback(Arc::new(|_: &LoggerError| {}))
            .sink(sink.clone())
            .build()
            .expect("build"),
    );

    let accepted: usize = spawn_producers(&logger, 500)
        .into_iter()
        .map(|h| h.join().expect("producer"))
        .sum();
    logger.close().expect("close");

    let metrics = logger.metrics();
    assert_eq!(accepted, PRODUCERS * 500);
    assert_eq!(
        sink.0.load(Ordering::Relaxed) as u64 + metrics.dropped_count(),
        metrics.total_enqueued()
    );
    assert_eq!(logger.pool().idle() as u64, logger.pool().allocated());
}

#[test]
fn test_concurrent_file_logging_whole_lines() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("stress.log");

    let logger = Arc::new(Logger::builder().build().expect("build"));
    logger
        .register_file(&log_file, "")
        .expect("register file");

    let handles = spawn_producers(&logger, 250);
    for handle in handles {
        handle.join().expect("producer");
    }
    logger.close().expect("close");

    let content = std::fs::read_to_string(&log_file).expect("Failed to read log file");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), PRODUCERS * 250);
    for line in lines {
        assert!(line.contains("] [INFO] [stress_tests.rs:"));
        assert!(line.contains("] tick p="));
    }
}
