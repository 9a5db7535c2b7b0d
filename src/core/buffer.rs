//! Pooled encoder buffers
//!
//! One [`EncoderBuffer`] is checked out per record, filled on the producer's
//! thread, moved through the delivery channel and handed back to the
//! [`BufferPool`] by the dispatcher once every sink has seen it. The free list
//! is itself a bounded channel, so the pool needs no lock of its own: a buffer
//! is owned by exactly one party at a time.

use super::error::panic_message;
use super::log_level::LogLevel;
use crossbeam_channel::{bounded, Receiver, Sender};
use std::fmt;
use std::io;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};

/// Initial capacity of freshly allocated buffers
pub const DEFAULT_BUFFER_CAPACITY: usize = 1024;

/// Maximum number of idle buffers kept by default
pub const DEFAULT_POOL_SIZE: usize = 1024;

/// Buffers that grew past this are freed instead of being pooled
pub const MAX_RETAINED_CAPACITY: usize = 64 * 1024;

/// Growable byte buffer holding one formatted record
#[derive(Debug)]
pub struct EncoderBuffer {
    bytes: Vec<u8>,
    level: LogLevel,
}

impl EncoderBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
            level: LogLevel::default(),
        }
    }

    /// Truncate without releasing capacity
    #[inline]
    pub fn truncate(&mut self) {
        self.bytes.clear();
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Lossy UTF-8 view, mostly useful for tests and diagnostics
    pub fn to_string_lossy(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.bytes.capacity()
    }

    /// Level of the record currently held
    #[inline]
    pub fn level(&self) -> LogLevel {
        self.level
    }

    #[inline]
    pub(crate) fn set_level(&mut self, level: LogLevel) {
        self.level = level;
    }

    #[inline]
    pub(crate) fn push(&mut self, byte: u8) {
        self.bytes.push(byte);
    }

    #[inline]
    pub(crate) fn extend(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }

    /// Append formatted output verbatim
    pub(crate) fn append_fmt(&mut self, args: fmt::Arguments<'_>) -> fmt::Result {
        fmt::write(&mut Verbatim(&mut self.bytes), args)
    }

    /// Append user text with line breaks escaped
    pub(crate) fn append_escaped(&mut self, text: &str) {
        let _ = fmt::Write::write_str(&mut LineSafe(&mut self.bytes), text);
    }

    /// Append formatted user output with line breaks escaped.
    ///
    /// User `Display`/`Debug` impls run here. If one returns an error or
    /// panics, its partial output is discarded and an inline
    /// `<format error: ...>` description takes its place.
    pub(crate) fn append_user_fmt(&mut self, args: fmt::Arguments<'_>) {
        let mark = self.bytes.len();
        let outcome = catch_unwind(AssertUnwindSafe(|| {
            fmt::write(&mut LineSafe(&mut self.bytes), args)
        }));

        let failure = match outcome {
            Ok(Ok(())) => return,
            Ok(Err(_)) => "formatter returned an error".to_string(),
            Err(payload) => panic_message(payload.as_ref()),
        };
        self.bytes.truncate(mark);
        self.bytes.extend_from_slice(b"<format error: ");
        self.append_escaped(&failure);
        self.bytes.push(b'>');
    }

    pub(crate) fn len_mark(&self) -> usize {
        self.bytes.len()
    }

    pub(crate) fn rewind(&mut self, mark: usize) {
        self.bytes.truncate(mark);
    }
}

impl Default for EncoderBuffer {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_BUFFER_CAPACITY)
    }
}

impl io::Write for EncoderBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

struct Verbatim<'b>(&'b mut Vec<u8>);

impl fmt::Write for Verbatim<'_> {
    #[inline]
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0.extend_from_slice(s.as_bytes());
        Ok(())
    }
}

struct LineSafe<'b>(&'b mut Vec<u8>);

impl fmt::Write for LineSafe<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let bytes = s.as_bytes();
        let mut run = 0;
        for (i, &b) in bytes.iter().enumerate() {
            let escaped: &[u8] = match b {
                b'\n' => b"\\n",
                b'\r' => b"\\r",
                _ => continue,
            };
            self.0.extend_from_slice(&bytes[run..i]);
            self.0.extend_from_slice(escaped);
            run = i + 1;
        }
        self.0.extend_from_slice(&bytes[run..]);
        Ok(())
    }
}

/// Free list of reusable [`EncoderBuffer`]s
#[derive(Debug)]
pub struct BufferPool {
    free_tx: Sender<EncoderBuffer>,
    free_rx: Receiver<EncoderBuffer>,
    buffer_capacity: usize,
    allocated: AtomicU64,
}

impl BufferPool {
    /// Create a pool retaining at most `max_idle` buffers of `buffer_capacity` bytes
    pub fn new(max_idle: usize, buffer_capacity: usize) -> Self {
        let (free_tx, free_rx) = bounded(max_idle.max(1));
        Self {
            free_tx,
            free_rx,
            buffer_capacity,
            allocated: AtomicU64::new(0),
        }
    }

    /// Check out a truncated buffer, allocating only when the pool is empty
    pub fn acquire(&self, level: LogLevel) -> EncoderBuffer {
        let mut buffer = match self.free_rx.try_recv() {
            Ok(buffer) => buffer,
            Err(_) => {
                self.allocated.fetch_add(1, Ordering::Relaxed);
                EncoderBuffer::with_capacity(self.buffer_capacity)
            }
        };
        buffer.truncate();
        buffer.set_level(level);
        buffer
    }

    /// Return a buffer; oversized buffers and overflow beyond `max_idle` are freed
    pub fn release(&self, mut buffer: EncoderBuffer) {
        if buffer.capacity() > MAX_RETAINED_CAPACITY {
            return;
        }
        buffer.truncate();
        let _ = self.free_tx.try_send(buffer);
    }

    /// Number of idle buffers currently pooled
    pub fn idle(&self) -> usize {
        self.free_rx.len()
    }

    /// Total buffers ever allocated by this pool
    pub fn allocated(&self) -> u64 {
        self.allocated.load(Ordering::Relaxed)
    }

    pub fn buffer_capacity(&self) -> usize {
        self.buffer_capacity
    }
}

impl Default for BufferPool {
    fn default() -> Self {
        Self::new(DEFAULT_POOL_SIZE, DEFAULT_BUFFER_CAPACITY)
    }
}
