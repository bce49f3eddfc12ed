//! Error types for openlog

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for logger operations
#[derive(Error, Debug)]
pub enum LogError {
    /// Configuration combination that cannot be honoured
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The log file (or its directory) could not be created
    #[error("Failed to open log file {}: {source}", path.display())]
    SinkOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A record could not be written to the log file.
    ///
    /// The in-memory entry has already been stored when this is returned.
    #[error("Failed to write log file {}: {source}", path.display())]
    SinkWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line does not follow the record format
    #[error("Malformed log record: {0}")]
    Parse(String),

    /// General I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LogError {
    /// True for failures of the file sink (open or write).
    pub fn is_sink_error(&self) -> bool {
        matches!(self, LogError::SinkOpen { .. } | LogError::SinkWrite { .. })
    }
}

/// Result type alias using LogError
pub type LogResult<T> = Result<T, LogError>;
