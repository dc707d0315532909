//! Capacity-bounded session log

use crate::domain::entry::LogEntry;
use crate::error::{GymlogError, Result};

/// Rows above the history in the workbook layout (title, quick entry, header)
pub const HEADER_ROWS: usize = 11;

/// Last usable row of the history in the workbook layout
pub const LAST_SHEET_ROW: usize = 200;

/// First history row in the workbook layout (1-based)
pub const FIRST_DATA_ROW: usize = HEADER_ROWS + 1;

/// Maximum number of entries the history can hold
pub const LOG_CAPACITY: usize = LAST_SHEET_ROW - HEADER_ROWS;

/// Ordered, append-only history of recorded sets.
///
/// Entries are only ever appended or removed from the end. `version` bumps on
/// every mutation so that readers can detect a changed log.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionLogStore {
    entries: Vec<LogEntry>,
    capacity: usize,
    version: u64,
}

impl SessionLogStore {
    /// Empty store with the standard capacity
    pub fn new() -> Self {
        Self::with_capacity(LOG_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        SessionLogStore {
            entries: Vec::new(),
            capacity,
            version: 0,
        }
    }

    /// Rebuild a store from persisted entries
    pub fn from_entries(entries: Vec<LogEntry>) -> Result<Self> {
        if entries.len() > LOG_CAPACITY {
            return Err(GymlogError::Capacity {
                capacity: LOG_CAPACITY,
            });
        }

        Ok(SessionLogStore {
            entries,
            capacity: LOG_CAPACITY,
            version: 0,
        })
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.last()
    }

    /// Workbook row (1-based) holding the entry at `index`
    pub fn sheet_row(index: usize) -> usize {
        index + FIRST_DATA_ROW
    }

    /// Append an entry, returning its index
    pub(crate) fn push(&mut self, entry: LogEntry) -> Result<usize> {
        if self.is_full() {
            return Err(GymlogError::Capacity {
                capacity: self.capacity,
            });
        }
        self.entries.push(entry);
        self.version += 1;
        Ok(self.entries.len() - 1)
    }

    /// Remove and return the most recent entry
    pub(crate) fn pop(&mut self) -> Option<LogEntry> {
        let entry = self.entries.pop()?;
        self.version += 1;
        Some(entry)
    }
}

impl Default for SessionLogStore {
    fn default() -> Self {
        Self::new()
    }
}
