//! Plain-text log file sink.
//!
//! A sink truncates its file when opened, writes a session banner, then
//! appends one record per line of every entry it is given. The handle stays
//! open for the sink's lifetime.

use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use super::entry::{banner, is_banner, FileRecord, LogEntry};
use crate::error::{LogError, LogResult};

/// Directory used when logs are kept in their own folder.
pub const LOGS_DIR: &str = "logs";

/// File name used when every run shares one file.
pub const DEFAULT_FILE_NAME: &str = "log.txt";

/// Where a logger writes its file.
///
/// ```text
/// <base>/log.txt                                  # default
/// <base>/logs/log.txt                             # in_dir
/// <base>/logs/log_2026-01-21_14-13-48.123456.txt  # in_dir + session
/// ```
pub fn log_file_path(base: &Path, in_dir: bool, session: bool, now: DateTime<Local>) -> PathBuf {
    let dir = if in_dir {
        base.join(LOGS_DIR)
    } else {
        base.to_path_buf()
    };
    if session {
        dir.join(format!("log_{}.txt", now.format("%Y-%m-%d_%H-%M-%S%.6f")))
    } else {
        dir.join(DEFAULT_FILE_NAME)
    }
}

/// Writer that appends entry records to a log file.
pub struct FileSink {
    /// Path reported in errors and by [`FileSink::path`]
    path: PathBuf,

    writer: BufWriter<Box<dyn Write + Send>>,
}

impl std::fmt::Debug for FileSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSink").field("path", &self.path).finish()
    }
}

impl FileSink {
    /// Create (or truncate) the file at `path` and write the session banner.
    ///
    /// Missing parent directories are created.
    pub fn create(path: impl Into<PathBuf>) -> LogResult<Self> {
        let path = path.into();
        let open_err = |source| LogError::SinkOpen {
            path: path.clone(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(open_err)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)
            .map_err(open_err)?;

        Self::from_writer(path.clone(), file)
    }

    /// Sink over an arbitrary writer. `path` is only used for reporting.
    pub fn from_writer(path: impl Into<PathBuf>, writer: impl Write + Send + 'static) -> LogResult<Self> {
        let mut sink = Self {
            path: path.into(),
            writer: BufWriter::new(Box::new(writer)),
        };

        let header = banner(Local::now());
        writeln!(sink.writer, "{}", header)
            .and_then(|_| sink.writer.flush())
            .map_err(|source| LogError::SinkOpen {
                path: sink.path.clone(),
                source,
            })?;

        tracing::debug!(path = %sink.path.display(), "log file opened");
        Ok(sink)
    }

    /// Get the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write every record of `entry` and flush.
    pub fn write_entry(&mut self, entry: &LogEntry) -> LogResult<()> {
        let result = entry
            .records()
            .iter()
            .try_for_each(|record| writeln!(self.writer, "{}", record))
            .and_then(|_| self.writer.flush());

        result.map_err(|source| LogError::SinkWrite {
            path: self.path.clone(),
            source,
        })
    }

    /// Flush any buffered data to disk.
    pub fn flush(&mut self) -> LogResult<()> {
        self.writer.flush().map_err(|source| LogError::SinkWrite {
            path: self.path.clone(),
            source,
        })
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        let _ = self.writer.flush();
    }
}

/// Read every record of a log file, oldest first.
///
/// Banner and blank lines are skipped. Lines that do not parse are reported
/// through `tracing` and skipped.
pub fn read_records(path: impl AsRef<Path>) -> LogResult<Vec<FileRecord>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;

    let mut records = Vec::new();
    // Records are newline-terminated; a trailing '\r' belongs to the text.
    for line in content.split('\n') {
        if line.trim().is_empty() || is_banner(line) {
            continue;
        }
        match FileRecord::parse(line) {
            Ok(record) => records.push(record),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipping malformed log line");
            }
        }
    }

    Ok(records)
}
