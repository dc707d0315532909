//! Entry commands: append, clear, undo last, list routine exercises
//!
//! Every command either applies its whole effect or returns an error and
//! leaves the store and staging entry untouched.

use crate::domain::catalog::ExerciseCatalog;
use crate::domain::entry::{LogEntry, StagingEntry};
use crate::domain::store::SessionLogStore;
use crate::error::{GymlogError, Result};
use chrono::NaiveDate;

/// Most exercises reported for a routine
pub const MAX_LISTED_EXERCISES: usize = 20;

/// Result of a successful [`append`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppendOutcome {
    /// Index of the new entry in the store
    pub index: usize,
    /// Workbook row the entry occupies
    pub row: usize,
    /// Set number now waiting in the staging entry
    pub next_set_number: u32,
}

/// Copy the staging entry into the log and prepare staging for the next set.
///
/// Date, routine and exercise stay in place and the set number advances by
/// one (to 2 when it was missing); reps, weight, rest and notes are cleared.
pub fn append(store: &mut SessionLogStore, staging: &mut StagingEntry) -> Result<AppendOutcome> {
    let exercise = staging
        .exercise_name()
        .ok_or_else(|| GymlogError::Validation("missing exercise".to_string()))?
        .to_string();

    if store.is_full() {
        log::warn!("Rejected append: log holds {} entries", store.len());
        return Err(GymlogError::Capacity {
            capacity: store.capacity(),
        });
    }

    let current_set = staging.valid_set_number();
    let next_set_number = match current_set {
        Some(n) => n.checked_add(1).ok_or_else(|| {
            GymlogError::Validation(format!("set number {} cannot be incremented", n))
        })?,
        None => 2,
    };

    let entry = LogEntry {
        date: staging.date,
        routine: staging.routine.clone(),
        exercise,
        set_number: current_set.unwrap_or(1),
        reps: staging.reps,
        weight_kg: staging.weight_kg,
        rest_seconds: staging.rest_seconds,
        notes: staging.notes.clone(),
    };

    let index = store.push(entry)?;

    staging.set_number = Some(next_set_number);
    staging.clear_measurements();

    log::info!(
        "Recorded entry {} ({} set {})",
        index + 1,
        store.entries()[index].exercise,
        store.entries()[index].set_number
    );

    Ok(AppendOutcome {
        index,
        row: SessionLogStore::sheet_row(index),
        next_set_number,
    })
}

/// Blank every staging field and reset the date to `today`
pub fn clear(staging: &mut StagingEntry, today: NaiveDate) {
    *staging = StagingEntry::new(today);
}

/// What [`commit_undo`] would remove, shown to the user for confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoPreview {
    pub index: usize,
    pub row: usize,
    pub date: NaiveDate,
    pub exercise: String,
    version: u64,
}

/// First phase of undo: describe the last entry without touching the store
pub fn peek_undo(store: &SessionLogStore) -> Result<UndoPreview> {
    let entry = store.last().ok_or(GymlogError::EmptyLog)?;
    let index = store.len() - 1;

    Ok(UndoPreview {
        index,
        row: SessionLogStore::sheet_row(index),
        date: entry.date,
        exercise: entry.exercise.clone(),
        version: store.version(),
    })
}

/// Second phase of undo: remove the previewed entry.
///
/// Fails with [`GymlogError::StaleUndo`] if the store changed after the preview.
/// Dropping the preview instead of committing it is the "not confirmed" path.
pub fn commit_undo(store: &mut SessionLogStore, preview: UndoPreview) -> Result<LogEntry> {
    if store.version() != preview.version || store.len() != preview.index + 1 {
        return Err(GymlogError::StaleUndo);
    }

    let removed = store.pop().ok_or(GymlogError::EmptyLog)?;
    log::info!("Removed entry {} ({})", preview.index + 1, removed.exercise);
    Ok(removed)
}

/// Exercises of the first routine whose label contains `label`
/// (case-insensitive), capped at [`MAX_LISTED_EXERCISES`].
pub fn list_exercises_for_routine(catalog: &ExerciseCatalog, label: &str) -> Result<Vec<String>> {
    let routine = catalog.find_routine(label)?;
    Ok(routine
        .exercises
        .iter()
        .take(MAX_LISTED_EXERCISES)
        .cloned()
        .collect())
}
