//! Entry storage and persistence.
//!
//! ## Layout on disk
//!
//! ```text
//! ./log.txt                              # default
//! ./logs/log.txt                         # in_dir
//! ./logs/log_2026-01-21_14-13-48.123456.txt  # in_dir + session
//! ```
//!
//! Each file starts with a banner line followed by one record per line:
//!
//! ```text
//! -----------------------2026-01-21 14:13:48-----------------------
//! [2026-01-21 14:13:48]::INIT::System initialized
//! [2026-01-21 14:13:49]::[APP]::ERROR::Something went wrong
//! ```
//!
//! ## Reading a file back
//!
//! ```ignore
//! use openlog_core::logging::read_records;
//!
//! for record in read_records("logs/log.txt")? {
//!     println!("{} {} {}", record.ts, record.level, record.text);
//! }
//! ```
//!
//! ## Routing `tracing` events
//!
//! ```ignore
//! use std::sync::Arc;
//! use parking_lot::Mutex;
//! use openlog_core::{Logger, LoggerConfig, OpenlogLayer};
//! use tracing_subscriber::prelude::*;
//!
//! let logger = Arc::new(Mutex::new(Logger::new(LoggerConfig::new())?));
//! let subscriber = tracing_subscriber::registry().with(OpenlogLayer::new(logger.clone()));
//! tracing::subscriber::set_global_default(subscriber)?;
//! ```

pub mod entry;
pub mod layer;
pub mod store;
pub mod writer;

// Re-exports for convenience
pub use entry::{FileRecord, Level, LogEntry};
pub use layer::OpenlogLayer;
pub use store::LogStore;
pub use writer::{log_file_path, read_records, FileSink};
