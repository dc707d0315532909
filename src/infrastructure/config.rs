//! Configuration management

use crate::error::{GymlogError, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::fs;
use std::path::Path;

/// Name of the workspace metadata directory
pub const GYMLOG_DIR: &str = ".gymlog";

fn default_date_format() -> String {
    "%d/%m/%Y".to_string()
}

fn default_workbook_file() -> String {
    "workout_log.xlsx".to_string()
}

fn default_macros_file() -> String {
    "workout_macros.bas".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// chrono format used when printing dates
    #[serde(default = "default_date_format")]
    pub date_format: String,
    /// File name of the exported workbook
    #[serde(default = "default_workbook_file")]
    pub workbook_file: String,
    /// File name of the exported macro module
    #[serde(default = "default_macros_file")]
    pub macros_file: String,
    pub created: DateTime<Utc>,
}

impl Config {
    /// Create a new config with default values
    pub fn new() -> Self {
        Config {
            date_format: default_date_format(),
            workbook_file: default_workbook_file(),
            macros_file: default_macros_file(),
            created: Utc::now(),
        }
    }

    /// Load config from .gymlog/config.toml in the given directory
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(GYMLOG_DIR).join("config.toml");

        let contents = fs::read_to_string(&config_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                GymlogError::NotGymlogDirectory(path.to_path_buf())
            } else {
                GymlogError::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| GymlogError::Config(format!("Failed to parse config.toml: {}", e)))?;
        Self::validate_date_format(&config.date_format)?;
        Ok(config)
    }

    /// Save config to .gymlog/config.toml in the given directory
    pub fn save_to_dir(&self, path: &Path) -> Result<()> {
        let gymlog_dir = path.join(GYMLOG_DIR);
        let config_path = gymlog_dir.join("config.toml");

        if !gymlog_dir.exists() {
            fs::create_dir(&gymlog_dir)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| GymlogError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&config_path, contents)?;

        Ok(())
    }

    /// Reject chrono format strings that would fail while rendering a date
    pub fn validate_date_format(format: &str) -> Result<()> {
        let invalid = || GymlogError::Config(format!("Invalid date format: '{}'", format));

        if format.trim().is_empty() || StrftimeItems::new(format).any(|i| matches!(i, Item::Error)) {
            return Err(invalid());
        }
        // Time and offset fields parse fine but cannot be rendered from a date
        let sample = NaiveDate::from_ymd_opt(2000, 1, 1).ok_or_else(invalid)?;
        render_date(sample, format).ok_or_else(invalid)?;
        Ok(())
    }

    /// Render a date with the configured format, falling back to ISO 8601
    pub fn format_date(&self, date: NaiveDate) -> String {
        render_date(date, &self.date_format).unwrap_or_else(|| date.format("%Y-%m-%d").to_string())
    }
}

fn render_date(date: NaiveDate, format: &str) -> Option<String> {
    let mut out = String::new();
    write!(out, "{}", date.format(format)).ok()?;
    Some(out)
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_new_config() {
        let config = Config::new();
        assert_eq!(config.date_format, "%d/%m/%Y");
        assert_eq!(config.workbook_file, "workout_log.xlsx");
        assert_eq!(config.macros_file, "workout_macros.bas");
    }

    #[test]
    fn test_save_and_load_config() {
        let temp = TempDir::new().unwrap();
        let mut config = Config::new();
        config.date_format = "%Y-%m-%d".to_string();

        config.save_to_dir(temp.path()).unwrap();

        assert!(temp.path().join(".gymlog").exists());
        assert!(temp.path().join(".gymlog/config.toml").exists());

        let loaded = Config::load_from_dir(temp.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_config() {
        let temp = TempDir::new().unwrap();

        let result = Config::load_from_dir(temp.path());

        match result.unwrap_err() {
            GymlogError::NotGymlogDirectory(_) => {}
            other => panic!("Expected NotGymlogDirectory error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_fills_missing_keys_with_defaults() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".gymlog")).unwrap();
        fs::write(
            temp.path().join(".gymlog/config.toml"),
            "created = \"2025-01-17T08:00:00Z\"\n",
        )
        .unwrap();

        let loaded = Config::load_from_dir(temp.path()).unwrap();
        assert_eq!(loaded.date_format, "%d/%m/%Y");
        assert_eq!(loaded.workbook_file, "workout_log.xlsx");
    }

    #[test]
    fn test_validate_date_format() {
        assert!(Config::validate_date_format("%d/%m/%Y").is_ok());
        assert!(Config::validate_date_format("%Q").is_err());
        assert!(Config::validate_date_format("").is_err());
    }

    #[test]
    fn test_validate_date_format_rejects_time_fields() {
        for format in ["%H:%M", "%d/%m/%Y %S", "%z", "%s"] {
            let result = Config::validate_date_format(format);
            assert!(
                matches!(result, Err(GymlogError::Config(_))),
                "accepted {}",
                format
            );
        }
        assert!(Config::validate_date_format("%A %e %B %Y").is_ok());
    }

    #[test]
    fn test_format_date_falls_back_on_unrenderable_format() {
        let mut config = Config::new();
        config.date_format = "%H:%M".to_string();
        let date = NaiveDate::from_ymd_opt(2025, 1, 7).unwrap();
        assert_eq!(config.format_date(date), "2025-01-07");
    }

    #[test]
    fn test_format_date() {
        let config = Config::new();
        let date = NaiveDate::from_ymd_opt(2025, 1, 7).unwrap();
        assert_eq!(config.format_date(date), "07/01/2025");
    }
}
