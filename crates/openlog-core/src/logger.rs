//! The logger: renders payloads, keeps every entry in memory, and mirrors
//! them to the console and (optionally) a log file.
//!
//! Memory is the authoritative copy. When the file write of a call fails the
//! entry is still stored and echoed, and the call returns the sink error.

use std::path::Path;

use chrono::Local;

use crate::batch::BatchAccumulator;
use crate::config::LoggerConfig;
use crate::error::{LogError, LogResult};
use crate::format::Formatter;
use crate::logging::entry::{Level, LogEntry};
use crate::logging::store::LogStore;
use crate::logging::writer::FileSink;
use crate::terminal::ConsoleEcho;
use crate::value::Payload;

/// Lifecycle of a [`Logger`].
///
/// A logger is `Constructed` only while [`Logger::new`] is setting up its
/// sink; every logger handed to a caller is `Active` until dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoggerState {
    Constructed,
    Active,
}

/// Structured console/file logger.
///
/// ```ignore
/// use openlog_core::{Logger, LoggerConfig, Value};
///
/// let mut logger = Logger::new(LoggerConfig::new().prefix("APP"))?;
/// logger.init("System initialized")?;
/// logger.log(Value::map(vec![("port", 8080), ("workers", 4)]))?;
/// logger.log(vec!["first", "second"])?; // two entries
///
/// for line in logger.flush_logs(false) {
///     println!("{}", line);
/// }
/// ```
#[derive(Debug)]
pub struct Logger {
    config: LoggerConfig,
    state: LoggerState,
    store: LogStore,
    batch: BatchAccumulator,
    sink: Option<FileSink>,
    console: Option<ConsoleEcho>,
}

impl Logger {
    /// Validate `config` and open the log file when `write_to_file` is set.
    pub fn new(config: LoggerConfig) -> LogResult<Self> {
        config.validate()?;
        let mut logger = Self::constructed(config);

        if logger.config.write_to_file {
            let path = logger.config.log_file_path(Local::now())?;
            logger.sink = Some(FileSink::create(path)?);
        }

        logger.activate();
        Ok(logger)
    }

    /// Build a file-writing logger around an already opened sink.
    pub fn with_sink(config: LoggerConfig, sink: FileSink) -> LogResult<Self> {
        config.validate()?;
        if !config.write_to_file {
            return Err(LogError::Config(
                "a sink was given but write_to_file is disabled".to_string(),
            ));
        }

        let mut logger = Self::constructed(config);
        logger.sink = Some(sink);
        logger.activate();
        Ok(logger)
    }

    fn constructed(config: LoggerConfig) -> Self {
        let console = config
            .echo
            .then(|| ConsoleEcho::stdout(config.short_timestamp));
        Self {
            config,
            state: LoggerState::Constructed,
            store: LogStore::new(),
            batch: BatchAccumulator::new(),
            sink: None,
            console,
        }
    }

    fn activate(&mut self) {
        self.state = LoggerState::Active;
        tracing::debug!(
            file = ?self.log_file_path(),
            prefix = %self.config.prefix,
            "logger active"
        );
    }

    /// Log at INFO.
    pub fn log(&mut self, payload: impl Into<Payload>) -> LogResult<()> {
        self.emit(Level::Info, payload)
    }

    /// Log at ERROR.
    pub fn error(&mut self, payload: impl Into<Payload>) -> LogResult<()> {
        self.emit(Level::Error, payload)
    }

    /// Log at WARN.
    pub fn warn(&mut self, payload: impl Into<Payload>) -> LogResult<()> {
        self.emit(Level::Warn, payload)
    }

    /// Log at INIT.
    pub fn init(&mut self, payload: impl Into<Payload>) -> LogResult<()> {
        self.emit(Level::Init, payload)
    }

    /// Log `payload` at `level`.
    ///
    /// Text is stored verbatim, values are rendered at the current width, and
    /// messages go through the batch buffer and are flushed immediately.
    pub fn emit(&mut self, level: Level, payload: impl Into<Payload>) -> LogResult<()> {
        match payload.into() {
            Payload::Text(text) => self.record(level, text),
            Payload::Messages(messages) => {
                for message in messages {
                    self.batch.add_message(message);
                }
                self.flush_batch(level)
            }
            Payload::Value(value) => {
                let text = self.formatter().render(&value);
                self.record(level, text)
            }
        }
    }

    /// Queue a message for the next [`flush_batch`](Self::flush_batch).
    pub fn add_message(&mut self, text: impl Into<String>) {
        self.batch.add_message(text);
    }

    /// Messages waiting for a batch flush.
    pub fn pending_messages(&self) -> &[String] {
        self.batch.pending()
    }

    /// Emit every queued message as its own entry at `level`, stamped now.
    ///
    /// The queue is emptied even if the file write fails; every entry is still
    /// stored in memory and the first sink error is returned.
    pub fn flush_batch(&mut self, level: Level) -> LogResult<()> {
        let mut first_err = None;
        for message in self.batch.drain() {
            if let Err(e) = self.record(level, message) {
                first_err.get_or_insert(e);
            }
        }
        first_err.map_or(Ok(()), Err)
    }

    /// Formatted records of the entries selected by [`LogStore::flush`], one
    /// string per entry (multi-line entries keep one record per line).
    pub fn flush_logs(&mut self, from_start: bool) -> Vec<String> {
        self.store
            .flush(from_start)
            .iter()
            .map(LogEntry::to_record_block)
            .collect()
    }

    /// Same selection as [`flush_logs`](Self::flush_logs), as entries.
    pub fn flush_entries(&mut self, from_start: bool) -> Vec<LogEntry> {
        self.store.flush(from_start)
    }

    /// Every entry logged so far.
    pub fn entries(&self) -> &[LogEntry] {
        self.store.entries()
    }

    /// Formatter for the configured width, or the terminal's.
    pub fn formatter(&self) -> Formatter {
        self.config
            .width
            .map(Formatter::new)
            .unwrap_or_else(Formatter::detect)
    }

    pub fn log_file_path(&self) -> Option<&Path> {
        self.sink.as_ref().map(FileSink::path)
    }

    pub fn state(&self) -> LoggerState {
        self.state
    }

    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    fn record(&mut self, level: Level, text: String) -> LogResult<()> {
        let entry = LogEntry::new(level, text, self.config.prefix.as_str());

        let written = match self.sink.as_mut() {
            Some(sink) => sink.write_entry(&entry),
            None => Ok(()),
        };
        if let Err(e) = &written {
            tracing::warn!(error = %e, "log file write failed; entry kept in memory");
        }
        if let Some(console) = &self.console {
            console.echo(&entry);
        }

        self.store.append(entry);
        written
    }
}
