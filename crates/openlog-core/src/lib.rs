//! openlog core library
//!
//! Structured console/file logging with an adaptive pretty-printer for nested
//! values.
//!
//! ## Overview
//!
//! - **Formatter**: renders a [`Value`] inline when it fits in half the
//!   terminal width, vertically (one child per line) when it does not
//! - **Logger**: keeps every entry in memory, echoes it to the console and
//!   optionally appends it to a plain-text log file
//! - **Batches**: queued messages are emitted together, each as its own entry
//!
//! ## Quick Start
//!
//! ```ignore
//! use openlog_core::{Level, Logger, LoggerConfig, Value};
//!
//! fn main() -> Result<(), openlog_core::LogError> {
//!     let mut logger = Logger::new(LoggerConfig::new().write_to_file(true).in_dir(true))?;
//!
//!     logger.init("System initialized")?;
//!     logger.warn(Value::map(vec![("retries", 3), ("timeout_ms", 500)]))?;
//!
//!     logger.add_message("step one");
//!     logger.add_message("step two");
//!     logger.flush_batch(Level::Info)?;
//!
//!     for line in logger.flush_logs(false) {
//!         println!("{}", line);
//!     }
//!     Ok(())
//! }
//! ```

pub mod batch;
pub mod config;
pub mod error;
pub mod format;
pub mod logger;
pub mod logging;
pub mod terminal;
pub mod value;

// Re-exports
pub use batch::BatchAccumulator;
pub use config::LoggerConfig;
pub use error::{LogError, LogResult};
pub use format::{render, Formatter, DEFAULT_WIDTH};
pub use logger::{Logger, LoggerState};
pub use logging::{read_records, FileRecord, FileSink, Level, LogEntry, LogStore, OpenlogLayer};
pub use value::{Mapping, Payload, Scalar, Value};
