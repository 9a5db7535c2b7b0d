//! Logger facade
//!
//! The producer side of the pipeline: level gate, record formatting on the
//! caller's thread, and handoff of the filled buffer onto the bounded
//! delivery channel. A single dispatcher thread owned by the logger consumes
//! the channel.

use super::{
    buffer::{BufferPool, EncoderBuffer},
    config::LoggerConfig,
    dispatcher::{DispatcherState, Dispatcher, MaintenanceSchedule, SharedSinks, StateCell},
    error::{LoggerError, Result},
    fallback::{should_alert, stderr_fallback, FallbackHandler},
    field::Field,
    layout::TimeLayout,
    log_level::LogLevel,
    metrics::LoggerMetrics,
    overflow_policy::OverflowPolicy,
    record::{CallSite, Record},
    sink::{RegisteredSink, Writer},
};
use crossbeam_channel::{bounded, Receiver, SendTimeoutError, Sender, TrySendError};
use parking_lot::{Mutex, RwLock};
use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

pub struct Logger {
    level: AtomicU8,
    layout: RwLock<Arc<TimeLayout>>,
    /// `None` once the logger is closed
    sender: RwLock<Option<Sender<EncoderBuffer>>>,
    /// Second handle on the channel, used only to evict under `DropOldest`
    evictor: Option<Receiver<EncoderBuffer>>,
    sinks: SharedSinks,
    pool: Arc<BufferPool>,
    metrics: Arc<LoggerMetrics>,
    state: StateCell,
    overflow_policy: OverflowPolicy,
    fallback: FallbackHandler,
    capacity: usize,
    done: Receiver<()>,
    worker: Mutex<Option<thread::JoinHandle<()>>>,
    /// Held for the whole close sequence; `true` once it has completed
    close_guard: Mutex<bool>,
}

impl Logger {
    /// Logger with the default configuration and no sinks
    #[must_use]
    pub fn new() -> Self {
        Self::start(&LoggerConfig::default(), stderr_fallback())
    }

    /// Validate `config` and start a logger from it
    pub fn with_config(config: LoggerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::start(&config, stderr_fallback()))
    }

    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// `config` must already be validated
    fn start(config: &LoggerConfig, fallback: FallbackHandler) -> Self {
        let (sender, receiver) = bounded(config.channel_capacity);
        let (done_tx, done_rx) = bounded(1);
        let sinks: SharedSinks = Arc::new(Mutex::new(Vec::new()));
        let pool = Arc::new(BufferPool::new(config.pool_size, config.buffer_capacity));
        let metrics = Arc::new(LoggerMetrics::new());
        let state = StateCell::new();

        let evictor = match config.overflow_policy {
            OverflowPolicy::DropOldest => Some(receiver.clone()),
            _ => None,
        };

        let dispatcher = Dispatcher {
            receiver,
            sinks: Arc::clone(&sinks),
            pool: Arc::clone(&pool),
            metrics: Arc::clone(&metrics),
            fallback: Arc::clone(&fallback),
            state: state.clone(),
            schedule: MaintenanceSchedule {
                flush_initial_delay: config.flush_initial_delay(),
                flush_interval: config.flush_interval(),
                rotate_interval: config.rotate_interval(),
            },
            done: done_tx,
        };
        let handle = dispatcher.spawn();

        Self {
            level: AtomicU8::new(config.level.as_u8()),
            layout: RwLock::new(Arc::new(config.layout.clone())),
            sender: RwLock::new(Some(sender)),
            evictor,
            sinks,
            pool,
            metrics,
            state,
            overflow_policy: config.overflow_policy.clone(),
            fallback,
            capacity: config.channel_capacity,
            done: done_rx,
            worker: Mutex::new(Some(handle)),
            close_guard: Mutex::new(false),
        }
    }

    /// Initialize `sink` and append it to the sink list
    ///
    /// Returns [`LoggerError::SinkInit`] if the sink's `init` fails and
    /// [`LoggerError::LoggerStopped`] after [`close`](Self::close).
    pub fn try_register<W: Writer + 'static>(&self, mut sink: W) -> Result<()> {
        if self.is_closed() {
            return Err(LoggerError::LoggerStopped);
        }
        if let Err(err) = sink.init() {
            return Err(LoggerError::sink_init(sink.name(), err.to_string()));
        }
        self.sinks.lock().push(RegisteredSink::new(Box::new(sink)));
        Ok(())
    }

    /// Initialize `sink` and append it to the sink list
    ///
    /// # Panics
    ///
    /// Panics if the sink fails to initialize. A sink that cannot start would
    /// otherwise swallow every later record.
    pub fn register<W: Writer + 'static>(&self, sink: W) {
        if let Err(err) = self.try_register(sink) {
            panic!("failed to register sink: {}", err);
        }
    }

    /// Open `path` as a [`FileSink`](crate::sinks::FileSink) and register it
    ///
    /// Rotated files are named by expanding `rotate_pattern` with strftime;
    /// an empty pattern never rotates.
    #[cfg(feature = "file")]
    pub fn register_file(&self, path: impl AsRef<std::path::Path>, rotate_pattern: &str) -> Result<()> {
        use super::sink::Rotater;

        let mut sink = crate::sinks::FileSink::new(path);
        sink.set_path_pattern(rotate_pattern)?;
        self.try_register(sink)
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.lock().len()
    }

    pub fn set_level(&self, level: LogLevel) {
        self.level.store(level.as_u8(), Ordering::Relaxed);
    }

    pub fn level(&self) -> LogLevel {
        LogLevel::from_u8(self.level.load(Ordering::Relaxed))
    }

    /// Replace the timestamp layout; an invalid layout leaves the old one in place
    pub fn set_layout(&self, layout: &str) -> Result<()> {
        let layout = TimeLayout::new(layout)?;
        *self.layout.write() = Arc::new(layout);
        Ok(())
    }

    pub fn layout(&self) -> TimeLayout {
        self.layout.read().as_ref().clone()
    }

    #[inline]
    pub fn enabled(&self, level: LogLevel) -> bool {
        level.as_u8() >= self.level.load(Ordering::Relaxed)
    }

    /// Log a positional record
    ///
    /// A template without arguments is emitted verbatim.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_log_pipeline::{LogLevel, Logger};
    ///
    /// let logger = Logger::new();
    /// logger.log(LogLevel::Info, format_args!("listening on port {}", 8080)).unwrap();
    /// logger.close().unwrap();
    /// ```
    #[track_caller]
    pub fn log(&self, level: LogLevel, args: fmt::Arguments<'_>) -> Result<()> {
        if !self.enabled(level) {
            return Ok(());
        }
        self.submit(&Record::positional(level, CallSite::caller(), args))
    }

    /// Log a message followed by `key=value` fields
    #[track_caller]
    pub fn log_structured(&self, level: LogLevel, message: &str, fields: &[Field<'_>]) -> Result<()> {
        if !self.enabled(level) {
            return Ok(());
        }
        self.submit(&Record::structured(level, CallSite::caller(), message, fields))
    }

    #[track_caller]
    pub fn trace(&self, args: fmt::Arguments<'_>) -> Result<()> {
        self.log(LogLevel::Trace, args)
    }

    #[track_caller]
    pub fn debug(&self, args: fmt::Arguments<'_>) -> Result<()> {
        self.log(LogLevel::Debug, args)
    }

    #[track_caller]
    pub fn info(&self, args: fmt::Arguments<'_>) -> Result<()> {
        self.log(LogLevel::Info, args)
    }

    #[track_caller]
    pub fn warn(&self, args: fmt::Arguments<'_>) -> Result<()> {
        self.log(LogLevel::Warn, args)
    }

    #[track_caller]
    pub fn error(&self, args: fmt::Arguments<'_>) -> Result<()> {
        self.log(LogLevel::Error, args)
    }

    #[track_caller]
    pub fn fatal(&self, args: fmt::Arguments<'_>) -> Result<()> {
        self.log(LogLevel::Fatal, args)
    }

    #[track_caller]
    pub fn public(&self, args: fmt::Arguments<'_>) -> Result<()> {
        self.log(LogLevel::Public, args)
    }

    #[track_caller]
    pub fn trace_fields(&self, message: &str, fields: &[Field<'_>]) -> Result<()> {
        self.log_structured(LogLevel::Trace, message, fields)
    }

    #[track_caller]
    pub fn debug_fields(&self, message: &str, fields: &[Field<'_>]) -> Result<()> {
        self.log_structured(LogLevel::Debug, message, fields)
    }

    #[track_caller]
    pub fn info_fields(&self, message: &str, fields: &[Field<'_>]) -> Result<()> {
        self.log_structured(LogLevel::Info, message, fields)
    }

    #[track_caller]
    pub fn warn_fields(&self, message: &str, fields: &[Field<'_>]) -> Result<()> {
        self.log_structured(LogLevel::Warn, message, fields)
    }

    #[track_caller]
    pub fn error_fields(&self, message: &str, fields: &[Field<'_>]) -> Result<()> {
        self.log_structured(LogLevel::Error, message, fields)
    }

    #[track_caller]
    pub fn fatal_fields(&self, message: &str, fields: &[Field<'_>]) -> Result<()> {
        self.log_structured(LogLevel::Fatal, message, fields)
    }

    /// Structured PUBLIC records separate fields with `||`
    #[track_caller]
    pub fn public_fields(&self, message: &str, fields: &[Field<'_>]) -> Result<()> {
        self.log_structured(LogLevel::Public, message, fields)
    }

    /// Format `record` into a pooled buffer and hand it to the dispatcher
    fn submit(&self, record: &Record<'_>) -> Result<()> {
        // Clone the sender so a blocked push never holds the lock close() needs
        let sender = match self.sender.read().as_ref() {
            Some(sender) => sender.clone(),
            None => return Err(self.reject()),
        };

        let layout = Arc::clone(&*self.layout.read());
        let mut buffer = self.pool.acquire(record.level);
        record.encode(&layout, &mut buffer);

        match sender.try_send(buffer) {
            Ok(()) => {
                self.metrics.record_enqueued();
                Ok(())
            }
            Err(TrySendError::Full(buffer)) => {
                self.metrics.record_queue_full();
                self.handle_overflow(&sender, buffer)
            }
            Err(TrySendError::Disconnected(buffer)) => {
                self.pool.release(buffer);
                Err(self.reject())
            }
        }
    }

    fn handle_overflow(&self, sender: &Sender<EncoderBuffer>, buffer: EncoderBuffer) -> Result<()> {
        match &self.overflow_policy {
            OverflowPolicy::Block => {
                self.metrics.record_block();
                match sender.send(buffer) {
                    Ok(()) => {
                        self.metrics.record_enqueued();
                        Ok(())
                    }
                    Err(err) => {
                        self.pool.release(err.into_inner());
                        Err(self.reject())
                    }
                }
            }

            OverflowPolicy::BlockWithTimeout(timeout) => {
                self.metrics.record_block();
                match sender.send_timeout(buffer, *timeout) {
                    Ok(()) => {
                        self.metrics.record_enqueued();
                        Ok(())
                    }
                    Err(SendTimeoutError::Timeout(buffer)) => {
                        self.discard(buffer);
                        Err(LoggerError::queue_full(self.capacity, self.capacity))
                    }
                    Err(SendTimeoutError::Disconnected(buffer)) => {
                        self.pool.release(buffer);
                        Err(self.reject())
                    }
                }
            }

            OverflowPolicy::DropNewest => {
                self.discard(buffer);
                Err(LoggerError::queue_full(self.capacity, self.capacity))
            }

            OverflowPolicy::DropOldest => self.evict_and_push(sender, buffer),
        }
    }

    /// Evict queued records until `buffer` fits
    fn evict_and_push(&self, sender: &Sender<EncoderBuffer>, mut buffer: EncoderBuffer) -> Result<()> {
        let Some(evictor) = self.evictor.as_ref() else {
            self.discard(buffer);
            return Err(LoggerError::queue_full(self.capacity, self.capacity));
        };

        loop {
            if let Ok(oldest) = evictor.try_recv() {
                self.discard(oldest);
            }
            match sender.try_send(buffer) {
                Ok(()) => {
                    self.metrics.record_enqueued();
                    return Ok(());
                }
                Err(TrySendError::Full(returned)) => buffer = returned,
                Err(TrySendError::Disconnected(returned)) => {
                    self.pool.release(returned);
                    return Err(self.reject());
                }
            }
        }
    }

    /// Drop one formatted record, alerting on the first and every 1000th drop
    fn discard(&self, buffer: EncoderBuffer) {
        self.pool.release(buffer);
        let dropped_before = self.metrics.record_dropped();
        if should_alert(dropped_before) {
            (self.fallback)(&LoggerError::queue_overflow(dropped_before + 1));
        }
    }

    /// Report a log call made after close
    fn reject(&self) -> LoggerError {
        self.metrics.record_rejected();
        let err = LoggerError::LoggerStopped;
        (self.fallback)(&err);
        err
    }

    fn is_closed(&self) -> bool {
        self.sender.read().is_none()
    }

    /// Drain the pipeline and stop the dispatcher
    ///
    /// Closes the delivery channel, waits until the dispatcher has delivered
    /// every queued record and exited, then flushes each flush-capable sink
    /// once in registration order. Flush failures are reported through the
    /// fallback handler and the first one is returned.
    ///
    /// Concurrent callers wait for the first close to finish; once it has,
    /// further calls are no-ops.
    pub fn close(&self) -> Result<()> {
        let mut closed = self.close_guard.lock();
        if *closed {
            return Ok(());
        }
        drop(self.sender.write().take());

        // Err only if the dispatcher died without signalling
        let _ = self.done.recv();
        if let Some(handle) = self.worker.lock().take() {
            if let Err(payload) = handle.join() {
                let err = LoggerError::other(format!(
                    "dispatcher thread panicked: {}",
                    super::error::panic_message(payload.as_ref())
                ));
                (self.fallback)(&err);
            }
        }

        let mut first_error = None;
        {
            let mut sinks = self.sinks.lock();
            for sink in sinks.iter_mut() {
                if let Err(err) = sink.flush() {
                    self.metrics.record_maintenance_error();
                    (self.fallback)(&err);
                    first_error.get_or_insert(err);
                }
            }
        }
        *closed = true;

        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    pub fn dispatcher_state(&self) -> DispatcherState {
        self.state.get()
    }

    pub fn pool(&self) -> &BufferPool {
        &self.pool
    }

    pub fn overflow_policy(&self) -> &OverflowPolicy {
        &self.overflow_policy
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        // Errors were already reported through the fallback handler
        let _ = self.close();

        let dropped = self.metrics.dropped_count();
        if dropped > 0 {
            eprintln!(
                "[LOGGER WARNING] Logger closed with {} dropped records (drop rate: {:.2}%)",
                dropped,
                self.metrics.drop_rate()
            );
        }
    }
}

/// Builder for constructing a [`Logger`] with a fluent API
///
/// # Example
/// ```
/// use rust_log_pipeline::prelude::*;
/// use std::time::Duration;
///
/// let logger = Logger::builder()
///     .level(LogLevel::Info)
///     .layout("%H:%M:%S%.3f")
///     .channel_capacity(4096)
///     .overflow_policy(OverflowPolicy::BlockWithTimeout(Duration::from_millis(50)))
///     .sink(ConsoleSink::stderr())
///     .build()
///     .unwrap();
///
/// logger.close().unwrap();
/// ```
pub struct LoggerBuilder {
    config: LoggerConfig,
    layout: Option<String>,
    sinks: Vec<Box<dyn Writer>>,
    fallback: Option<FallbackHandler>,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self {
            config: LoggerConfig::default(),
            layout: None,
            sinks: Vec::new(),
            fallback: None,
        }
    }

    /// Start from a complete configuration
    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: LoggerConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.config.level = level;
        self
    }

    /// strftime layout; validated by [`build`](Self::build)
    #[must_use = "builder methods return a new value"]
    pub fn layout(mut self, layout: impl Into<String>) -> Self {
        self.layout = Some(layout.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn channel_capacity(mut self, capacity: usize) -> Self {
        self.config.channel_capacity = capacity;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn buffer_capacity(mut self, capacity: usize) -> Self {
        self.config.buffer_capacity = capacity;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn pool_size(mut self, size: usize) -> Self {
        self.config.pool_size = size;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn overflow_policy(mut self, policy: OverflowPolicy) -> Self {
        self.config.overflow_policy = policy;
        self
    }

    /// Delay before the first flush tick, then the interval between ticks
    #[must_use = "builder methods return a new value"]
    pub fn flush_interval(mut self, initial_delay: Duration, interval: Duration) -> Self {
        self.config.flush_initial_delay_ms = initial_delay.as_millis() as u64;
        self.config.flush_interval_ms = interval.as_millis() as u64;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn rotate_interval(mut self, interval: Duration) -> Self {
        self.config.rotate_interval_ms = interval.as_millis() as u64;
        self
    }

    /// Sinks are initialized and registered in the order given
    #[must_use = "builder methods return a new value"]
    pub fn sink<W: Writer + 'static>(mut self, sink: W) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    /// Handler receiving pipeline failures; defaults to stderr
    #[must_use = "builder methods return a new value"]
    pub fn fallback(mut self, handler: FallbackHandler) -> Self {
        self.fallback = Some(handler);
        self
    }

    /// Validate the configuration, start the dispatcher and register sinks
    pub fn build(self) -> Result<Logger> {
        let mut config = self.config;
        if let Some(layout) = self.layout {
            config.layout = TimeLayout::new(layout)?;
        }
        config.validate()?;

        let fallback = self.fallback.unwrap_or_else(stderr_fallback);
        let logger = Logger::start(&config, fallback);
        for mut sink in self.sinks {
            if let Err(err) = sink.init() {
                return Err(LoggerError::sink_init(sink.name(), err.to_string()));
            }
            logger.sinks.lock().push(RegisteredSink::new(sink));
        }
        Ok(logger)
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sink::Flusher;

    #[derive(Clone, Default)]
    struct Capture {
        lines: Arc<Mutex<Vec<String>>>,
        flushes: Arc<Mutex<usize>>,
    }

    impl Writer for Capture {
        fn init(&mut self) -> Result<()> {
            Ok(())
        }

        fn write(&mut self, buffer: &EncoderBuffer) -> Result<()> {
            self.lines.lock().push(buffer.to_string_lossy().into_owned());
            Ok(())
        }

        fn name(&self) -> &str {
            "capture"
        }

        fn as_flusher(&mut self) -> Option<&mut dyn Flusher> {
            Some(self)
        }
    }

    impl Flusher for Capture {
        fn flush(&mut self) -> Result<()> {
            *self.flushes.lock() += 1;
            Ok(())
        }
    }

    struct BrokenInit;

    impl Writer for BrokenInit {
        fn init(&mut self) -> Result<()> {
            Err(LoggerError::writer("no such device"))
        }

        fn write(&mut self, _buffer: &EncoderBuffer) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "broken"
        }
    }

    fn quiet() -> FallbackHandler {
        Arc::new(|_err: &LoggerError| {})
    }

    #[test]
    fn test_builder_defaults() {
        let logger = Logger::builder().fallback(quiet()).build().expect("build");
        assert_eq!(logger.level(), LogLevel::Debug);
        assert_eq!(logger.overflow_policy(), &OverflowPolicy::Block);
        assert_eq!(logger.dispatcher_state(), DispatcherState::Idle);
        assert_eq!(logger.sink_count(), 0);
    }

    #[test]
    fn test_builder_rejects_bad_layout() {
        let result = Logger::builder().layout("%Y-%").build();
        assert!(matches!(result, Err(LoggerError::InvalidLayout { .. })));
    }

    #[test]
    fn test_builder_rejects_zero_capacity() {
        let result = Logger::builder().channel_capacity(0).build();
        assert!(matches!(result, Err(LoggerError::InvalidConfiguration { .. })));
    }

    #[test]
    fn test_builder_surfaces_sink_init_failure() {
        let result = Logger::builder().sink(BrokenInit).build();
        match result {
            Err(LoggerError::SinkInit { sink, .. }) => assert_eq!(sink, "broken"),
            _ => panic!("expected SinkInit"),
        }
    }

    #[test]
    fn test_try_register_reports_init_failure() {
        let logger = Logger::builder().fallback(quiet()).build().expect("build");
        assert!(logger.try_register(BrokenInit).is_err());
        assert_eq!(logger.sink_count(), 0);
    }

    #[test]
    #[should_panic(expected = "failed to register sink")]
    fn test_register_panics_on_init_failure() {
        let logger = Logger::builder().fallback(quiet()).build().expect("build");
        logger.register(BrokenInit);
    }

    #[test]
    fn test_log_and_close_delivers_and_flushes() {
        let capture = Capture::default();
        let logger = Logger::builder()
            .fallback(quiet())
            .sink(capture.clone())
            .build()
            .expect("build");

        logger.info(format_args!("hello {}", "world")).expect("log");
        logger
            .info_fields("user", &[Field::string("name", "ada"), Field::int("age", 36)])
            .expect("log");
        logger.close().expect("close");

        let lines = capture.lines.lock();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("[INFO] [logger.rs:"));
        assert!(lines[0].ends_with("] hello world\n"));
        assert!(lines[1].ends_with("] user name=ada age=36\n"));
        assert_eq!(*capture.flushes.lock(), 1);
        assert_eq!(logger.dispatcher_state(), DispatcherState::Stopped);
        assert_eq!(logger.metrics().total_delivered(), 2);
    }

    #[test]
    fn test_level_gate_skips_formatting() {
        let logger = Logger::builder()
            .fallback(quiet())
            .level(LogLevel::Warn)
            .build()
            .expect("build");

        logger.debug(format_args!("ignored")).expect("log");
        logger.info_fields("ignored", &[Field::bool("b", true)]).expect("log");

        assert!(!logger.enabled(LogLevel::Info));
        assert!(logger.enabled(LogLevel::Public));
        assert_eq!(logger.pool().allocated(), 0);
        assert_eq!(logger.metrics().total_enqueued(), 0);
    }

    #[test]
    fn test_set_level_and_layout() {
        let logger = Logger::builder().fallback(quiet()).build().expect("build");
        logger.set_level(LogLevel::Error);
        assert_eq!(logger.level(), LogLevel::Error);

        logger.set_layout("%H:%M").expect("layout");
        assert_eq!(logger.layout().as_str(), "%H:%M");
        assert!(logger.set_layout("%H:%").is_err());
        assert_eq!(logger.layout().as_str(), "%H:%M");
    }

    #[test]
    fn test_log_after_close_is_an_error() {
        let reported = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&reported);
        let logger = Logger::builder()
            .fallback(Arc::new(move |err: &LoggerError| sink.lock().push(err.to_string())))
            .build()
            .expect("build");

        logger.close().expect("close");
        assert!(logger.close().is_ok());

        let result = logger.warn(format_args!("too late"));
        assert!(matches!(result, Err(LoggerError::LoggerStopped)));
        assert_eq!(logger.metrics().rejected_after_close(), 1);
        assert_eq!(reported.lock().len(), 1);
        assert!(matches!(
            logger.try_register(Capture::default()),
            Err(LoggerError::LoggerStopped)
        ));
    }

    #[test]
    fn test_close_without_records() {
        let logger = Logger::builder().fallback(quiet()).build().expect("build");
        logger.close().expect("close");
        assert_eq!(logger.dispatcher_state(), DispatcherState::Stopped);
    }
}
