//! Error definitions for the logging collaborators.

use thiserror::Error;

/// Errors raised while opening or writing to a log destination.
#[derive(Debug, Error)]
pub enum LogError {
    /// Opening, writing or flushing the destination failed.
    #[error("log destination I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The logger was closed before this write.
    #[error("log destination is closed")]
    Closed,

    /// The timestamp format is not a valid chrono format string.
    #[error("invalid datetime format '{0}'")]
    InvalidDatetimeFormat(String),

    /// A JSON line could not be serialized.
    #[error("failed to serialize log line: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type for logging operations.
pub type LogResult<T> = Result<T, LogError>;
