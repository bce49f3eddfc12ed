//! Pending messages waiting for an explicit batch flush.

/// Ordered buffer of raw messages.
///
/// Messages carry no timestamp here; entries are stamped when the batch is
/// flushed through the logger.
#[derive(Debug, Default)]
pub struct BatchAccumulator {
    pending: Vec<String>,
}

impl BatchAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_message(&mut self, text: impl Into<String>) {
        self.pending.push(text.into());
    }

    /// Take every pending message in insertion order, leaving the buffer empty.
    pub fn drain(&mut self) -> Vec<String> {
        std::mem::take(&mut self.pending)
    }

    pub fn pending(&self) -> &[String] {
        &self.pending
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
