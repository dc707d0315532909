//! Initialize workspace use case

use crate::domain::{ExerciseCatalog, SessionLogStore, StagingEntry};
use crate::error::Result;
use crate::infrastructure::{Config, FileSystemRepository, GymlogRepository};
use chrono::NaiveDate;
use std::fs;
use std::path::Path;

/// Initialize a new workspace at the specified path: default config, the
/// built-in catalog, an empty log and a blank staging entry dated `today`.
pub fn init(path: &Path, today: NaiveDate) -> Result<FileSystemRepository> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }

    let repo = FileSystemRepository::new(path.to_path_buf());
    repo.initialize()?;

    repo.save_config(&Config::new())?;
    repo.save_catalog(&ExerciseCatalog::home_workout())?;
    repo.save_store(&SessionLogStore::new())?;
    repo.save_staging(&StagingEntry::new(today))?;

    log::info!("Initialized workspace at {}", path.display());
    Ok(repo)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GymlogError;
    use tempfile::TempDir;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 17).unwrap()
    }

    #[test]
    fn test_init_creates_all_files() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("gym");

        let repo = init(&root, today()).unwrap();

        for file in ["config.toml", "catalog.toml", "log.csv", "staging.toml"] {
            assert!(root.join(".gymlog").join(file).exists(), "missing {}", file);
        }
        assert!(repo.load_store().unwrap().is_empty());
        assert_eq!(repo.load_staging(today()).unwrap().date, today());
        assert_eq!(repo.load_config().unwrap().workbook_file, "workout_log.xlsx");
    }

    #[test]
    fn test_init_twice_fails() {
        let temp = TempDir::new().unwrap();
        init(temp.path(), today()).unwrap();

        match init(temp.path(), today()).unwrap_err() {
            GymlogError::Config(msg) => assert!(msg.contains("already initialized")),
            other => panic!("Expected Config error, got {:?}", other),
        }
    }
}
