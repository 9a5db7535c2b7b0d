//! Console sink implementation

use crate::core::{EncoderBuffer, Flusher, Result, Writer};
use colored::Colorize;
use std::io::{self, Write};

/// Stream a [`ConsoleSink`] writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsoleTarget {
    #[default]
    Stdout,
    Stderr,
}

/// Writes every line verbatim to stdout or stderr
pub struct ConsoleSink {
    target: ConsoleTarget,
    use_colors: bool,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self {
            target: ConsoleTarget::Stdout,
            use_colors: false,
        }
    }

    pub fn stderr() -> Self {
        Self {
            target: ConsoleTarget::Stderr,
            use_colors: false,
        }
    }

    /// Color whole lines by level
    ///
    /// # Example
    ///
    /// ```
    /// use rust_log_pipeline::sinks::ConsoleSink;
    ///
    /// let sink = ConsoleSink::new().with_colors(true);
    /// assert!(sink.uses_colors());
    /// ```
    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    pub fn target(&self) -> ConsoleTarget {
        self.target
    }

    pub fn uses_colors(&self) -> bool {
        self.use_colors
    }

    fn write_to(&self, out: &mut dyn Write, buffer: &EncoderBuffer) -> io::Result<()> {
        if !self.use_colors {
            return out.write_all(buffer.as_bytes());
        }
        let line = buffer.to_string_lossy();
        let line = line.strip_suffix('\n').unwrap_or(&line);
        writeln!(out, "{}", line.color(buffer.level().color_code()))
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Writer for ConsoleSink {
    fn init(&mut self) -> Result<()> {
        Ok(())
    }

    fn write(&mut self, buffer: &EncoderBuffer) -> Result<()> {
        match self.target {
            ConsoleTarget::Stdout => self.write_to(&mut io::stdout().lock(), buffer)?,
            ConsoleTarget::Stderr => self.write_to(&mut io::stderr().lock(), buffer)?,
        }
        Ok(())
    }

    fn name(&self) -> &str {
        match self.target {
            ConsoleTarget::Stdout => "console",
            ConsoleTarget::Stderr => "console-stderr",
        }
    }

    fn as_flusher(&mut self) -> Option<&mut dyn Flusher> {
        Some(self)
    }
}

impl Flusher for ConsoleSink {
    fn flush(&mut self) -> Result<()> {
        match self.target {
            ConsoleTarget::Stdout => io::stdout().flush()?,
            ConsoleTarget::Stderr => io::stderr().flush()?,
        }
        Ok(())
    }
}
