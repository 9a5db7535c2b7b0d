//! Sink capability contracts
//!
//! Every sink is a [`Writer`]. Flushing and rotation are optional
//! capabilities a concrete sink exposes by overriding [`Writer::as_flusher`]
//! and [`Writer::as_rotater`]; the logger probes them once at registration.

use super::buffer::EncoderBuffer;
use super::error::{panic_message, LoggerError, Result, SinkOperation};
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Mandatory sink contract
///
/// # Example
///
/// ```
/// use rust_log_pipeline::core::{EncoderBuffer, Flusher, Result, Writer};
///
/// struct Stdout;
///
/// impl Writer for Stdout {
///     fn init(&mut self) -> Result<()> {
///         Ok(())
///     }
///
///     fn write(&mut self, buffer: &EncoderBuffer) -> Result<()> {
///         use std::io::Write;
///         std::io::stdout().write_all(buffer.as_bytes())?;
///         Ok(())
///     }
///
///     fn name(&self) -> &str {
///         "stdout"
///     }
///
///     fn as_flusher(&mut self) -> Option<&mut dyn Flusher> {
///         Some(self)
///     }
/// }
///
/// impl Flusher for Stdout {
///     fn flush(&mut self) -> Result<()> {
///         use std::io::Write;
///         std::io::stdout().flush()?;
///         Ok(())
///     }
/// }
/// ```
pub trait Writer: Send {
    /// Called once, synchronously, when the sink is registered
    fn init(&mut self) -> Result<()>;

    /// Deliver one complete formatted line. The buffer is only borrowed
    /// for the duration of the call.
    fn write(&mut self, buffer: &EncoderBuffer) -> Result<()>;

    fn name(&self) -> &str;

    fn as_flusher(&mut self) -> Option<&mut dyn Flusher> {
        None
    }

    fn as_rotater(&mut self) -> Option<&mut dyn Rotater> {
        None
    }
}

/// Optional periodic flush capability
pub trait Flusher {
    fn flush(&mut self) -> Result<()>;
}

/// Optional periodic rotation capability
pub trait Rotater {
    fn rotate(&mut self) -> Result<()>;

    /// strftime pattern naming the rotated output
    fn set_path_pattern(&mut self, pattern: &str) -> Result<()>;
}

/// Capabilities probed at registration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SinkCapabilities {
    pub flush: bool,
    pub rotate: bool,
}

/// A registered sink together with its probed capabilities.
///
/// Every call is isolated: errors and panics from the sink come back as a
/// [`LoggerError`] naming the sink and the operation.
pub(crate) struct RegisteredSink {
    writer: Box<dyn Writer>,
    capabilities: SinkCapabilities,
    name: String,
}

impl RegisteredSink {
    pub(crate) fn new(mut writer: Box<dyn Writer>) -> Self {
        let capabilities = SinkCapabilities {
            flush: writer.as_flusher().is_some(),
            rotate: writer.as_rotater().is_some(),
        };
        let name = writer.name().to_string();
        Self {
            writer,
            capabilities,
            name,
        }
    }

    #[cfg(test)]
    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    #[cfg(test)]
    pub(crate) fn capabilities(&self) -> SinkCapabilities {
        self.capabilities
    }

    pub(crate) fn write(&mut self, buffer: &EncoderBuffer) -> Result<()> {
        let writer = &mut self.writer;
        guard_sink(&self.name, SinkOperation::Write, || writer.write(buffer))
    }

    /// No-op for sinks without the flush capability
    pub(crate) fn flush(&mut self) -> Result<()> {
        if !self.capabilities.flush {
            return Ok(());
        }
        match self.writer.as_flusher() {
            Some(flusher) => guard_sink(&self.name, SinkOperation::Flush, || flusher.flush()),
            None => Ok(()),
        }
    }

    /// No-op for sinks without the rotate capability
    pub(crate) fn rotate(&mut self) -> Result<()> {
        if !self.capabilities.rotate {
            return Ok(());
        }
        match self.writer.as_rotater() {
            Some(rotater) => guard_sink(&self.name, SinkOperation::Rotate, || rotater.rotate()),
            None => Ok(()),
        }
    }
}

fn guard_sink<F>(name: &str, operation: SinkOperation, call: F) -> Result<()>
where
    F: FnOnce() -> Result<()>,
{
    match catch_unwind(AssertUnwindSafe(call)) {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(LoggerError::sink_operation(name, operation, e.to_string())),
        Err(payload) => Err(LoggerError::sink_panic(
            name,
            operation,
            panic_message(payload.as_ref()),
        )),
    }
}
