//! File system repository

use crate::domain::{ExerciseCatalog, LogEntry, SessionLogStore, StagingEntry};
use crate::error::{GymlogError, Result};
use crate::infrastructure::config::GYMLOG_DIR;
use crate::infrastructure::Config;
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};

const LOG_FILE: &str = "log.csv";
const STAGING_FILE: &str = "staging.toml";
const CATALOG_FILE: &str = "catalog.toml";

/// Header of the CSV history, in column order
pub const LOG_COLUMNS: [&str; 8] = [
    "date",
    "routine",
    "exercise",
    "set_number",
    "reps",
    "weight_kg",
    "rest_seconds",
    "notes",
];

/// Abstract repository for workout log workspaces
pub trait GymlogRepository {
    /// Get the root directory of this repository
    fn root(&self) -> &Path;

    /// Load configuration from .gymlog/config.toml
    fn load_config(&self) -> Result<Config>;

    /// Save configuration to .gymlog/config.toml
    fn save_config(&self, config: &Config) -> Result<()>;

    /// Check if .gymlog directory exists
    fn is_initialized(&self) -> bool;

    /// Create .gymlog directory structure
    fn initialize(&self) -> Result<()>;
}

/// File system implementation of GymlogRepository
#[derive(Debug, Clone)]
pub struct FileSystemRepository {
    pub root: PathBuf,
}

impl FileSystemRepository {
    /// Create a new repository with the given root directory
    pub fn new(root: PathBuf) -> Self {
        FileSystemRepository { root }
    }

    /// Discover the workspace root by walking up from current directory.
    /// First checks GYMLOG_ROOT environment variable, then falls back to discovery
    pub fn discover() -> Result<Self> {
        if let Ok(root_path) = std::env::var("GYMLOG_ROOT") {
            let path = PathBuf::from(root_path);
            if Self::has_gymlog_dir(&path) {
                return Ok(FileSystemRepository::new(path));
            } else {
                return Err(GymlogError::Config(format!(
                    "GYMLOG_ROOT is set to '{}' but no .gymlog directory found. \
                    Run 'gymlog init' in that directory or unset GYMLOG_ROOT.",
                    path.display()
                )));
            }
        }

        let current_dir = std::env::current_dir()?;
        Self::discover_from(&current_dir)
    }

    /// Discover the workspace root by walking up from a specific starting directory
    pub fn discover_from(start: &Path) -> Result<Self> {
        let mut current = start.to_path_buf();

        loop {
            if Self::has_gymlog_dir(&current) {
                log::debug!("Using workspace at {}", current.display());
                return Ok(FileSystemRepository::new(current));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => return Err(GymlogError::NotGymlogDirectory(start.to_path_buf())),
            }
        }
    }

    fn has_gymlog_dir(path: &Path) -> bool {
        path.join(GYMLOG_DIR).is_dir()
    }

    fn data_path(&self, file: &str) -> PathBuf {
        self.root.join(GYMLOG_DIR).join(file)
    }
}

impl GymlogRepository for FileSystemRepository {
    fn root(&self) -> &Path {
        &self.root
    }

    fn load_config(&self) -> Result<Config> {
        Config::load_from_dir(&self.root)
    }

    fn save_config(&self, config: &Config) -> Result<()> {
        config.save_to_dir(&self.root)
    }

    fn is_initialized(&self) -> bool {
        Self::has_gymlog_dir(&self.root)
    }

    fn initialize(&self) -> Result<()> {
        let gymlog_dir = self.root.join(GYMLOG_DIR);

        if gymlog_dir.exists() {
            return Err(GymlogError::Config(format!(
                "Directory already initialized: {}",
                self.root.display()
            )));
        }

        fs::create_dir(&gymlog_dir)?;
        Ok(())
    }
}

// Workspace data files (not part of trait - filesystem-specific)
impl FileSystemRepository {
    /// Load the history. A missing file is an empty log.
    pub fn load_store(&self) -> Result<SessionLogStore> {
        let path = self.data_path(LOG_FILE);
        if !path.exists() {
            return Ok(SessionLogStore::new());
        }

        let mut reader = csv::Reader::from_path(&path)?;
        let entries = reader
            .deserialize::<LogEntry>()
            .collect::<std::result::Result<Vec<_>, _>>()?;
        log::debug!("Loaded {} entries from {}", entries.len(), path.display());

        SessionLogStore::from_entries(entries)
    }

    /// Persist the history, always writing the header row
    pub fn save_store(&self, store: &SessionLogStore) -> Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());
        writer.write_record(LOG_COLUMNS)?;
        for entry in store.entries() {
            writer.serialize(entry)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| GymlogError::Io(e.into_error()))?;

        self.write_atomic(&self.data_path(LOG_FILE), &bytes)?;
        log::debug!("Saved {} entries", store.len());
        Ok(())
    }

    /// Load the staging entry, or a blank one dated `today` if none was saved
    pub fn load_staging(&self, today: NaiveDate) -> Result<StagingEntry> {
        let path = self.data_path(STAGING_FILE);
        if !path.exists() {
            return Ok(StagingEntry::new(today));
        }

        let contents = fs::read_to_string(&path)?;
        Ok(toml::from_str(&contents)?)
    }

    pub fn save_staging(&self, staging: &StagingEntry) -> Result<()> {
        let contents = toml::to_string_pretty(staging)?;
        self.write_atomic(&self.data_path(STAGING_FILE), contents.as_bytes())
    }

    /// Load the catalog, falling back to the built-in plan
    pub fn load_catalog(&self) -> Result<ExerciseCatalog> {
        let path = self.data_path(CATALOG_FILE);
        if !path.exists() {
            log::debug!("No catalog.toml, using built-in routines");
            return Ok(ExerciseCatalog::home_workout());
        }

        let contents = fs::read_to_string(&path)?;
        toml::from_str(&contents)
            .map_err(|e| GymlogError::Config(format!("Failed to parse catalog.toml: {}", e)))
    }

    pub fn save_catalog(&self, catalog: &ExerciseCatalog) -> Result<()> {
        let contents = toml::to_string_pretty(catalog)?;
        self.write_atomic(&self.data_path(CATALOG_FILE), contents.as_bytes())
    }

    /// Resolve an export file name against an optional output directory
    /// (relative to the workspace root when not absolute)
    pub fn export_path(&self, output_dir: Option<&Path>, file_name: &str) -> PathBuf {
        match output_dir {
            Some(dir) if dir.is_absolute() => dir.join(file_name),
            Some(dir) => self.root.join(dir).join(file_name),
            None => self.root.join(file_name),
        }
    }

    /// Best-effort atomic replace: write to a temp file in the same directory,
    /// then rename into place.
    ///
    /// On Windows, `rename` does not overwrite existing files, so we remove the destination first.
    fn write_atomic(&self, path: &Path, content: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp_name = format!(
            "{}.gymlog-tmp-{}",
            path.file_name()
                .and_then(|s| s.to_str())
                .unwrap_or("data"),
            std::process::id()
        );
        let tmp_path = path.with_file_name(tmp_name);

        fs::write(&tmp_path, content)?;

        if cfg!(windows) && path.exists() {
            fs::remove_file(path)?;
        }

        fs::rename(&tmp_path, path)?;
        Ok(())
    }
}
