//! LIFO stack of committed moves.
//!
//! Owned by the caller and passed to [`crate::moves`] explicitly.

use teamfit_core::history::HistoryEntry;

use crate::error::EngineError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    #[must_use]
    pub const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    /// Remove and return the most recent entry.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::EmptyHistory`] when nothing has been recorded.
    pub fn pop(&mut self) -> Result<HistoryEntry, EngineError> {
        self.entries.pop().ok_or(EngineError::EmptyHistory)
    }

    #[must_use]
    pub fn peek(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Entries from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> + '_ {
        self.entries.iter()
    }
}
