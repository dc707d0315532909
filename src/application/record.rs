//! Record, clear and undo use cases

use crate::domain::commands::{self, AppendOutcome, UndoPreview};
use crate::domain::{LogEntry, SessionLogStore, StagingEntry};
use crate::error::{GymlogError, Result};
use crate::infrastructure::FileSystemRepository;
use chrono::NaiveDate;

/// An undo that has been previewed but not yet confirmed.
///
/// Holds the log as it was when the preview was taken; committing checks that
/// the saved log still matches.
#[derive(Debug)]
pub struct PendingUndo {
    store: SessionLogStore,
    preview: UndoPreview,
}

impl PendingUndo {
    pub fn preview(&self) -> &UndoPreview {
        &self.preview
    }
}

/// Service for the commands that change the log or the staging entry
pub struct RecordService {
    repository: FileSystemRepository,
}

impl RecordService {
    pub fn new(repository: FileSystemRepository) -> Self {
        RecordService { repository }
    }

    /// Append the staging entry to the log
    pub fn append(&self, today: NaiveDate) -> Result<AppendOutcome> {
        let mut store = self.repository.load_store()?;
        let mut staging = self.repository.load_staging(today)?;

        let previous = store.clone();
        let outcome = commands::append(&mut store, &mut staging)?;

        self.repository.save_store(&store)?;
        if let Err(e) = self.repository.save_staging(&staging) {
            log::warn!("Staging save failed, rolling back the recorded entry");
            self.repository.save_store(&previous)?;
            return Err(e);
        }
        Ok(outcome)
    }

    /// Reset the staging entry
    pub fn clear(&self, today: NaiveDate) -> Result<StagingEntry> {
        let mut staging = self.repository.load_staging(today)?;
        commands::clear(&mut staging, today);
        self.repository.save_staging(&staging)?;

        log::info!("Cleared staging entry");
        Ok(staging)
    }

    /// First phase of undo: describe the last entry
    pub fn begin_undo(&self) -> Result<PendingUndo> {
        let store = self.repository.load_store()?;
        let preview = commands::peek_undo(&store)?;
        Ok(PendingUndo { store, preview })
    }

    /// Second phase of undo: remove the previewed entry and save the log
    pub fn commit_undo(&self, pending: PendingUndo) -> Result<LogEntry> {
        let PendingUndo { mut store, preview } = pending;

        let current = self.repository.load_store()?;
        if current.entries() != store.entries() {
            log::warn!("Log changed while undo was waiting for confirmation");
            return Err(GymlogError::StaleUndo);
        }

        let removed = commands::commit_undo(&mut store, preview)?;
        self.repository.save_store(&store)?;
        Ok(removed)
    }
}
