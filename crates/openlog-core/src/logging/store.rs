//! In-memory record of every emitted entry.

use super::entry::LogEntry;

/// Append-only entry list with a retrieval cursor.
///
/// Flushing only moves the cursor; stored entries are never dropped.
#[derive(Debug, Default)]
pub struct LogStore {
    entries: Vec<LogEntry>,
    /// Index of the first entry not yet returned by an incremental flush
    cursor: usize,
}

impl LogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, entry: LogEntry) {
        self.entries.push(entry);
    }

    /// Entries to hand out.
    ///
    /// Incremental (`from_start == false`): everything appended since the
    /// previous flush; the cursor moves to the end.
    /// Full (`from_start == true`): the whole history; the cursor goes back to
    /// the start, so the next incremental flush returns the whole history again.
    pub fn flush(&mut self, from_start: bool) -> Vec<LogEntry> {
        if from_start {
            self.cursor = 0;
            return self.entries.clone();
        }
        let flushed = self.entries[self.cursor..].to_vec();
        self.cursor = self.entries.len();
        flushed
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Number of entries an incremental flush would return.
    pub fn pending(&self) -> usize {
        self.entries.len() - self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
