//! Config management use case

use crate::error::{GymlogError, Result};
use crate::infrastructure::{Config, FileSystemRepository, GymlogRepository};

const VALID_KEYS: &str = "date_format, workbook_file, macros_file, created";

/// Service for managing workspace configuration
pub struct ConfigService {
    repository: FileSystemRepository,
}

impl ConfigService {
    /// Create a new config service
    pub fn new(repository: FileSystemRepository) -> Self {
        ConfigService { repository }
    }

    /// Get a single config value
    pub fn get(&self, key: &str) -> Result<String> {
        let config = self.repository.load_config()?;

        match key {
            "date_format" => Ok(config.date_format),
            "workbook_file" => Ok(config.workbook_file),
            "macros_file" => Ok(config.macros_file),
            "created" => Ok(config.created.to_rfc3339()),
            _ => Err(GymlogError::Config(format!(
                "Unknown config key: '{}'. Valid keys are: {}",
                key, VALID_KEYS
            ))),
        }
    }

    /// Set a config value
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut config = self.repository.load_config()?;

        match key {
            "date_format" => {
                Config::validate_date_format(value)?;
                config.date_format = value.to_string();
            }
            "workbook_file" => {
                config.workbook_file = file_name(key, value, ".xlsx")?;
            }
            "macros_file" => {
                config.macros_file = file_name(key, value, ".bas")?;
            }
            "created" => {
                return Err(GymlogError::Config(
                    "Cannot modify 'created' field (read-only)".to_string(),
                ));
            }
            _ => {
                return Err(GymlogError::Config(format!(
                    "Unknown config key: '{}'. Valid keys are: date_format, workbook_file, macros_file",
                    key
                )));
            }
        }

        self.repository.save_config(&config)?;
        log::info!("Set config {} = {}", key, value);
        Ok(())
    }

    /// List all config values
    pub fn list(&self) -> Result<Config> {
        self.repository.load_config()
    }
}

/// Export names are plain file names with the expected extension
fn file_name(key: &str, value: &str, extension: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() || value.contains(['/', '\\']) {
        return Err(GymlogError::Config(format!(
            "'{}' must be a file name without directories",
            key
        )));
    }
    if !value.to_lowercase().ends_with(extension) {
        return Err(GymlogError::Config(format!(
            "'{}' must end with {}",
            key, extension
        )));
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::init::init;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn setup() -> (TempDir, ConfigService) {
        let temp = TempDir::new().unwrap();
        let repo = init(temp.path(), NaiveDate::from_ymd_opt(2025, 1, 17).unwrap()).unwrap();
        (temp, ConfigService::new(repo))
    }

    #[test]
    fn test_get_and_set() {
        let (_temp, service) = setup();

        assert_eq!(service.get("date_format").unwrap(), "%d/%m/%Y");
        service.set("date_format", "%Y-%m-%d").unwrap();
        assert_eq!(service.get("date_format").unwrap(), "%Y-%m-%d");

        service.set("workbook_file", "gym.xlsx").unwrap();
        assert_eq!(service.list().unwrap().workbook_file, "gym.xlsx");
    }

    #[test]
    fn test_created_is_read_only() {
        let (_temp, service) = setup();
        assert!(service.get("created").is_ok());
        assert!(matches!(
            service.set("created", "2020-01-01T00:00:00Z"),
            Err(GymlogError::Config(_))
        ));
    }

    #[test]
    fn test_rejects_bad_values() {
        let (_temp, service) = setup();

        assert!(service.set("date_format", "%Q").is_err());
        assert!(service.set("workbook_file", "out/gym.xlsx").is_err());
        assert!(service.set("macros_file", "macros.txt").is_err());
        assert!(service.get("editor").is_err());
        assert_eq!(service.get("date_format").unwrap(), "%d/%m/%Y");
    }
}
