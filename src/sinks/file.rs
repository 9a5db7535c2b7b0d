//! File sink with pattern-named rotation
//!
//! Lines are appended to an active file through a `BufWriter`. When a rotate
//! pattern is set, each rotate tick expands it with strftime; once the
//! expansion changes, the active file is renamed to the name of the period
//! that just ended and a fresh active file is opened.

use crate::core::layout::{self, TimeLayout};
use crate::core::{EncoderBuffer, Flusher, LoggerError, Result, Rotater, Writer};
use chrono::{DateTime, FixedOffset};
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Appends records to a file, optionally rotating by strftime pattern
///
/// # Example
///
/// ```no_run
/// use rust_log_pipeline::prelude::*;
///
/// let logger = Logger::new();
/// logger.register(
///     FileSink::new("/var/log/app.log")
///         .with_path_pattern("/var/log/app.%Y%m%d.log")
///         .unwrap(),
/// );
/// ```
pub struct FileSink {
    path: PathBuf,
    pattern: Option<TimeLayout>,
    /// Pattern expanded at the start of the current period
    period: Option<String>,
    writer: Option<BufWriter<File>>,
    bytes_written: u64,
}

impl FileSink {
    /// Sink for `path`; the file is opened by `init`
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            pattern: None,
            period: None,
            writer: None,
            bytes_written: 0,
        }
    }

    pub fn with_path_pattern(mut self, pattern: &str) -> Result<Self> {
        self.set_path_pattern(pattern)?;
        Ok(self)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Bytes written to the active file since it was opened
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    fn open(&mut self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                LoggerError::io_operation(
                    "create log directory",
                    format!("Failed to create directory '{}'", parent.display()),
                    e,
                )
            })?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| {
                LoggerError::file_sink(self.path.display().to_string(), format!("Failed to open: {}", e))
            })?;

        self.writer = Some(BufWriter::new(file));
        self.bytes_written = 0;
        Ok(())
    }

    /// Rotate if the pattern expands to a new period at `now`
    ///
    /// The active file is reopened whether or not the rename succeeded. On
    /// failure the old period is kept, so the next tick retries.
    fn rotate_at(&mut self, now: &DateTime<FixedOffset>) -> Result<()> {
        let Some(pattern) = self.pattern.as_ref() else {
            return Ok(());
        };
        let current = pattern.format(now);
        let previous = match self.period.as_deref() {
            Some(previous) if previous != current => previous.to_string(),
            Some(_) => return Ok(()),
            None => {
                self.period = Some(current);
                return Ok(());
            }
        };

        let retired = self.retire_active(&previous);
        if retired.is_ok() {
            self.period = Some(current);
        }
        self.open()?;
        retired
    }

    /// Flush and close the active file, then move it to `target`
    fn retire_active(&mut self, target: &str) -> Result<()> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush().map_err(|e| {
                LoggerError::file_rotation(
                    self.path.display().to_string(),
                    format!("Failed to flush before rotation: {}", e),
                )
            })?;
        }

        let target = PathBuf::from(target);
        if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                LoggerError::file_rotation(
                    target.display().to_string(),
                    format!("Failed to create rotation directory: {}", e),
                )
            })?;
        }
        if self.path.exists() {
            fs::rename(&self.path, &target).map_err(|e| {
                LoggerError::file_rotation(
                    self.path.display().to_string(),
                    format!("Failed to rename to '{}': {}", target.display(), e),
                )
            })?;
        }
        Ok(())
    }
}

impl Writer for FileSink {
    fn init(&mut self) -> Result<()> {
        self.open()?;
        if let Some(pattern) = self.pattern.as_ref() {
            self.period = Some(pattern.format(&layout::now()));
        }
        Ok(())
    }

    fn write(&mut self, buffer: &EncoderBuffer) -> Result<()> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| LoggerError::writer("File writer not initialized"))?;
        writer.write_all(buffer.as_bytes())?;
        self.bytes_written += buffer.len() as u64;
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }

    fn as_flusher(&mut self) -> Option<&mut dyn Flusher> {
        Some(self)
    }

    fn as_rotater(&mut self) -> Option<&mut dyn Rotater> {
        Some(self)
    }
}

impl Flusher for FileSink {
    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush()?;
        }
        Ok(())
    }
}

impl Rotater for FileSink {
    fn rotate(&mut self) -> Result<()> {
        self.rotate_at(&layout::now())
    }

    /// An empty pattern disables rotation
    fn set_path_pattern(&mut self, pattern: &str) -> Result<()> {
        if pattern.is_empty() {
            self.pattern = None;
            self.period = None;
            return Ok(());
        }
        let pattern = TimeLayout::new(pattern)?;
        if self.writer.is_some() {
            self.period = Some(pattern.format(&layout::now()));
        }
        self.pattern = Some(pattern);
        Ok(())
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        let _ = Flusher::flush(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LogLevel;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn at(hour: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .expect("offset")
            .with_ymd_and_hms(2024, 3, 1, hour, 0, 0)
            .single()
            .expect("datetime")
    }

    fn line(level: LogLevel, text: &str) -> EncoderBuffer {
        let mut buf = EncoderBuffer::with_capacity(64);
        buf.set_level(level);
        buf.extend(text.as_bytes());
        buf
    }

    #[test]
    fn test_write_and_flush() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("nested/app.log");
        let mut sink = FileSink::new(&path);
        sink.init().expect("init");

        sink.write(&line(LogLevel::Info, "one\n")).expect("write");
        sink.write(&line(LogLevel::Info, "two\n")).expect("write");
        Flusher::flush(&mut sink).expect("flush");

        assert_eq!(fs::read_to_string(&path).expect("read"), "one\ntwo\n");
        assert_eq!(sink.bytes_written(), 8);
    }

    #[test]
    fn test_writes_every_level() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("app.log");
        let mut sink = FileSink::new(&path);
        sink.init().expect("init");

        sink.write(&line(LogLevel::Trace, "trace\n")).expect("write");
        sink.write(&line(LogLevel::Public, "public\n")).expect("write");
        Flusher::flush(&mut sink).expect("flush");

        assert_eq!(fs::read_to_string(&path).expect("read"), "trace\npublic\n");
    }

    #[test]
    fn test_write_before_init_fails() {
        let mut sink = FileSink::new("unused.log");
        assert!(sink.write(&line(LogLevel::Info, "x\n")).is_err());
    }

    #[test]
    fn test_rotate_renames_to_previous_period() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("app.log");
        let pattern = format!("{}/app.%Y%m%d%H.log", dir.path().display());

        let mut sink = FileSink::new(&path);
        sink.init().expect("init");
        sink.set_path_pattern(&pattern).expect("pattern");
        sink.period = Some(TimeLayout::new(pattern.as_str()).expect("layout").format(&at(10)));

        sink.write(&line(LogLevel::Info, "first\n")).expect("write");

        // Same period: nothing happens
        sink.rotate_at(&at(10)).expect("rotate");
        assert!(!dir.path().join("app.2024030110.log").exists());

        sink.rotate_at(&at(11)).expect("rotate");
        sink.write(&line(LogLevel::Info, "second\n")).expect("write");
        Flusher::flush(&mut sink).expect("flush");

        let rotated = dir.path().join("app.2024030110.log");
        assert_eq!(fs::read_to_string(rotated).expect("read rotated"), "first\n");
        assert_eq!(fs::read_to_string(&path).expect("read active"), "second\n");
    }

    #[test]
    fn test_failed_rotation_keeps_sink_writable_and_retries() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("app.log");
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"not a directory").expect("create blocker");
        let pattern = format!("{}/app.%Y%m%d%H.log", blocker.display());

        let mut sink = FileSink::new(&path);
        sink.init().expect("init");
        sink.set_path_pattern(&pattern).expect("pattern");
        sink.period = Some(TimeLayout::new(pattern.as_str()).expect("layout").format(&at(10)));
        sink.write(&line(LogLevel::Info, "first\n")).expect("write");

        assert!(matches!(
            sink.rotate_at(&at(11)),
            Err(LoggerError::FileRotationError { .. })
        ));
        sink.write(&line(LogLevel::Info, "second\n")).expect("write after failed rotation");

        // Period was not advanced, so the same tick tries again
        assert!(sink.rotate_at(&at(11)).is_err());
        sink.write(&line(LogLevel::Info, "third\n")).expect("write after retry");
        Flusher::flush(&mut sink).expect("flush");
        assert_eq!(
            fs::read_to_string(&path).expect("read active"),
            "first\nsecond\nthird\n"
        );

        fs::remove_file(&blocker).expect("remove blocker");
        sink.rotate_at(&at(11)).expect("rotate once unblocked");
        let rotated = blocker.join("app.2024030110.log");
        assert_eq!(
            fs::read_to_string(rotated).expect("read rotated"),
            "first\nsecond\nthird\n"
        );
        sink.write(&line(LogLevel::Info, "fourth\n")).expect("write");
        Flusher::flush(&mut sink).expect("flush");
        assert_eq!(fs::read_to_string(&path).expect("read active"), "fourth\n");
    }

    #[test]
    fn test_rotate_without_pattern_is_noop() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("app.log");
        let mut sink = FileSink::new(&path);
        sink.init().expect("init");
        sink.rotate().expect("rotate");
        assert!(path.exists());
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let mut sink = FileSink::new("unused.log");
        assert!(matches!(
            sink.set_path_pattern("app.%"),
            Err(LoggerError::InvalidLayout { .. })
        ));
    }
}
