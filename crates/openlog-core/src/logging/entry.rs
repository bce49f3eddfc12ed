//! Log entries and the plain-text record format.
//!
//! Each entry becomes one record per physical line of its text:
//!
//! ```text
//! [2026-01-21 14:30:45]::INFO::Connected to peer
//! [2026-01-21 14:30:45]::[APP]::WARN::{
//! [2026-01-21 14:30:45]::WARN::  retries: 3
//! [2026-01-21 14:30:45]::WARN::}
//! ```
//!
//! The prefix (when set) only appears on the first line of an entry.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{LogError, LogResult};

/// Timestamp layout used in records (truncated to the second).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Timestamp layout for the console when short timestamps are enabled.
pub const SHORT_TIMESTAMP_FORMAT: &str = "%H:%M";

const SEPARATOR: &str = "::";

/// Severity of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    Info,
    Error,
    Warn,
    Init,
}

impl Level {
    pub const ALL: [Level; 4] = [Level::Info, Level::Error, Level::Warn, Level::Init];

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Info => "INFO",
            Level::Error => "ERROR",
            Level::Warn => "WARN",
            Level::Init => "INIT",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| LogError::Parse(format!("unknown level '{}'", s)))
    }
}

/// A single emitted entry. The text is rendered once, before the entry is
/// built, and never changes afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    timestamp: DateTime<Local>,
    level: Level,
    text: String,
    prefix: String,
}

impl LogEntry {
    /// Create a new entry with the current timestamp.
    pub fn new(level: Level, text: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self::at(Local::now(), level, text, prefix)
    }

    pub fn at(
        timestamp: DateTime<Local>,
        level: Level,
        text: impl Into<String>,
        prefix: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            level,
            text: text.into(),
            prefix: prefix.into(),
        }
    }

    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Timestamp as written in records.
    pub fn timestamp_string(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }

    /// One record per physical line of the text, without trailing newlines.
    pub fn records(&self) -> Vec<String> {
        let ts = self.timestamp_string();
        self.text
            .split('\n')
            .enumerate()
            .map(|(i, line)| {
                if i == 0 && !self.prefix.is_empty() {
                    format!(
                        "[{ts}]{SEPARATOR}[{}]{SEPARATOR}{}{SEPARATOR}{line}",
                        self.prefix, self.level
                    )
                } else {
                    format!("[{ts}]{SEPARATOR}{}{SEPARATOR}{line}", self.level)
                }
            })
            .collect()
    }

    /// All records of the entry joined by newlines.
    pub fn to_record_block(&self) -> String {
        self.records().join("\n")
    }
}

/// A record read back from a log file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Timestamp exactly as written (`YYYY-MM-DD HH:MM:SS`)
    pub ts: String,

    /// Present on the first record of a prefixed entry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,

    pub level: Level,

    pub text: String,
}

impl FileRecord {
    /// Parse one record line.
    pub fn parse(line: &str) -> LogResult<Self> {
        let malformed = || LogError::Parse(line.to_string());

        let rest = line.strip_prefix('[').ok_or_else(malformed)?;
        let (ts, rest) = rest.split_once("]::").ok_or_else(malformed)?;
        NaiveDateTime::parse_from_str(ts, TIMESTAMP_FORMAT).map_err(|_| malformed())?;

        let (prefix, level, text) = match split_level(rest) {
            Some((level, text)) => (None, level, text),
            None => {
                let rest = rest.strip_prefix('[').ok_or_else(malformed)?;
                let (prefix, rest) = rest.split_once("]::").ok_or_else(malformed)?;
                let (level, text) = split_level(rest).ok_or_else(malformed)?;
                (Some(prefix.to_string()), level, text)
            }
        };

        Ok(Self {
            ts: ts.to_string(),
            prefix,
            level,
            text: text.to_string(),
        })
    }

    pub fn timestamp(&self) -> LogResult<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.ts, TIMESTAMP_FORMAT)
            .map_err(|e| LogError::Parse(format!("{}: {}", self.ts, e)))
    }

    /// Serialize to a single JSON line (no trailing newline).
    pub fn to_json_line(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

fn split_level(rest: &str) -> Option<(Level, &str)> {
    Level::ALL.into_iter().find_map(|level| {
        rest.strip_prefix(level.as_str())
            .and_then(|r| r.strip_prefix(SEPARATOR))
            .map(|text| (level, text))
    })
}

/// Session banner written at the top of a freshly opened log file.
pub fn banner(timestamp: DateTime<Local>) -> String {
    format!(
        "-----------------------{}-----------------------",
        timestamp.format(TIMESTAMP_FORMAT)
    )
}

pub fn is_banner(line: &str) -> bool {
    line.starts_with("-----") && line.ends_with("-----")
}
