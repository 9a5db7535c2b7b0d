//! Error types for the logging pipeline

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Configuration document could not be parsed
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// A sink refused to initialize at registration time
    #[error("Sink '{sink}' failed to initialize: {message}")]
    SinkInit { sink: String, message: String },

    /// A sink failed during steady-state delivery or maintenance
    #[error("Sink '{sink}' {operation} failed: {message}")]
    SinkOperation {
        sink: String,
        operation: SinkOperation,
        message: String,
    },

    /// A sink panicked while being driven by the dispatcher
    #[error("Sink '{sink}' panicked during {operation}: {message}")]
    SinkPanic {
        sink: String,
        operation: SinkOperation,
        message: String,
    },

    /// Queue full with buffer details
    #[error("Log queue full: {current}/{max} records buffered")]
    QueueFull { current: usize, max: usize },

    /// Queue overflow with dropped record count
    #[error("Log queue overflow: dropped {dropped_count} records")]
    QueueOverflow { dropped_count: u64 },

    /// Logger already closed
    #[error("Logger already stopped")]
    LoggerStopped,

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Timestamp layout rejected by the strftime parser
    #[error("Invalid time layout '{layout}'")]
    InvalidLayout { layout: String },

    /// File sink error with path
    #[error("File sink error for '{path}': {message}")]
    FileSinkError { path: String, message: String },

    /// File rotation error
    #[error("File rotation failed for '{path}': {message}")]
    FileRotationError { path: String, message: String },

    /// Writer error (generic)
    #[error("Writer error: {0}")]
    WriterError(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Sink operation that produced a delivery error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkOperation {
    Write,
    Flush,
    Rotate,
}

impl std::fmt::Display for SinkOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SinkOperation::Write => write!(f, "write"),
            SinkOperation::Flush => write!(f, "flush"),
            SinkOperation::Rotate => write!(f, "rotate"),
        }
    }
}

impl LoggerError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a sink initialization error
    pub fn sink_init(sink: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::SinkInit {
            sink: sink.into(),
            message: message.into(),
        }
    }

    /// Wrap a failure reported by a sink during delivery or maintenance
    pub fn sink_operation(
        sink: impl Into<String>,
        operation: SinkOperation,
        message: impl Into<String>,
    ) -> Self {
        LoggerError::SinkOperation {
            sink: sink.into(),
            operation,
            message: message.into(),
        }
    }

    /// Describe a sink panic caught by the dispatcher
    pub fn sink_panic(
        sink: impl Into<String>,
        operation: SinkOperation,
        message: impl Into<String>,
    ) -> Self {
        LoggerError::SinkPanic {
            sink: sink.into(),
            operation,
            message: message.into(),
        }
    }

    /// Create a queue full error with buffer details
    pub fn queue_full(current: usize, max: usize) -> Self {
        LoggerError::QueueFull { current, max }
    }

    /// Create a queue overflow error
    pub fn queue_overflow(dropped_count: u64) -> Self {
        LoggerError::QueueOverflow { dropped_count }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create an invalid layout error
    pub fn layout(layout: impl Into<String>) -> Self {
        LoggerError::InvalidLayout {
            layout: layout.into(),
        }
    }

    /// Create a file sink error
    pub fn file_sink(path: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::FileSinkError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a file rotation error
    pub fn file_rotation(path: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::FileRotationError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a writer error (generic)
    pub fn writer<S: Into<String>>(msg: S) -> Self {
        LoggerError::WriterError(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }
}

/// Extract a readable message from a caught panic payload
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
