//! History listing use case

use crate::domain::compliance::classify_entry;
use crate::domain::{Compliance, LogEntry, SessionLogStore};
use crate::error::Result;
use crate::infrastructure::FileSystemRepository;

/// A stored entry with its workbook row and classification
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRow {
    pub row: usize,
    pub entry: LogEntry,
    pub compliance: Compliance,
}

/// Stored entries, newest first, optionally limited to the `limit` most recent
pub fn history(repository: &FileSystemRepository, limit: Option<usize>) -> Result<Vec<HistoryRow>> {
    let store = repository.load_store()?;
    let catalog = repository.load_catalog()?;

    let rows = store
        .entries()
        .iter()
        .enumerate()
        .rev()
        .take(limit.unwrap_or(usize::MAX))
        .map(|(index, entry)| HistoryRow {
            row: SessionLogStore::sheet_row(index),
            entry: entry.clone(),
            compliance: classify_entry(entry, &catalog),
        })
        .collect();

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::init::init;
    use crate::domain::commands::append;
    use crate::domain::StagingEntry;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_history_newest_first_with_limit() {
        let temp = TempDir::new().unwrap();
        let today = NaiveDate::from_ymd_opt(2025, 1, 17).unwrap();
        let repo = init(temp.path(), today).unwrap();

        let mut store = repo.load_store().unwrap();
        let mut staging = StagingEntry::new(today);
        staging.exercise = Some("Sentadillas".to_string());
        for reps in [10, 20, 30] {
            staging.reps = Some(reps);
            append(&mut store, &mut staging).unwrap();
        }
        repo.save_store(&store).unwrap();

        let rows = history(&repo, None).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].row, 14);
        assert_eq!(rows[0].entry.reps, Some(30));
        assert_eq!(rows[0].compliance, Compliance::Above);
        assert_eq!(rows[1].compliance, Compliance::InRange);
        assert_eq!(rows[2].compliance, Compliance::Below);

        let limited = history(&repo, Some(1)).unwrap();
        assert_eq!(limited.len(), 1);
        assert_eq!(limited[0].entry.set_number, 3);
    }
}
