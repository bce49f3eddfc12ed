//! Logger construction options.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::error::{LogError, LogResult};
use crate::logging::writer::log_file_path;

/// Options fixed when a [`Logger`](crate::Logger) is built.
///
/// Every field has a default, so a JSON config only names what it changes:
///
/// ```json
/// { "write_to_file": true, "in_dir": true, "prefix": "APP" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Persist entries to a log file in addition to memory and console
    pub write_to_file: bool,

    /// Put the log file under a `logs` subdirectory
    pub in_dir: bool,

    /// Name the file after the time the logger was created
    pub session: bool,

    /// Label shown before the level on the first line of each entry
    pub prefix: String,

    /// Show `HH:MM` instead of the full timestamp on the console
    pub short_timestamp: bool,

    /// Print entries to stdout
    pub echo: bool,

    /// Directory the log file lives under (default: current directory)
    pub base_dir: Option<PathBuf>,

    /// Render width (default: terminal width, or 80)
    pub width: Option<usize>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            write_to_file: false,
            in_dir: false,
            session: false,
            prefix: String::new(),
            short_timestamp: false,
            echo: true,
            base_dir: None,
            width: None,
        }
    }
}

impl LoggerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_to_file(mut self, enabled: bool) -> Self {
        self.write_to_file = enabled;
        self
    }

    pub fn in_dir(mut self, enabled: bool) -> Self {
        self.in_dir = enabled;
        self
    }

    pub fn session(mut self, enabled: bool) -> Self {
        self.session = enabled;
        self
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn short_timestamp(mut self, enabled: bool) -> Self {
        self.short_timestamp = enabled;
        self
    }

    pub fn echo(mut self, enabled: bool) -> Self {
        self.echo = enabled;
        self
    }

    pub fn base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    pub fn width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    /// Parse a JSON config.
    pub fn from_json_str(json: &str) -> LogResult<Self> {
        serde_json::from_str(json).map_err(|e| LogError::Config(e.to_string()))
    }

    /// Load a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> LogResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Reject option combinations a logger cannot honour.
    pub fn validate(&self) -> LogResult<()> {
        if self.session && !self.write_to_file {
            return Err(LogError::Config(
                "session requires write_to_file".to_string(),
            ));
        }
        if self.prefix.contains('\n') || self.prefix.contains("]::") {
            return Err(LogError::Config(format!(
                "prefix {:?} cannot contain a newline or ']::'",
                self.prefix
            )));
        }
        if self.width == Some(0) {
            return Err(LogError::Config("width must be positive".to_string()));
        }
        Ok(())
    }

    /// Path of the log file a logger created at `now` would write.
    pub fn log_file_path(&self, now: DateTime<Local>) -> LogResult<PathBuf> {
        let base = match &self.base_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()?,
        };
        Ok(log_file_path(&base, self.in_dir, self.session, now))
    }
}
