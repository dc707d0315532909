//! Error types for gymlog

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the gymlog application
#[derive(Debug, Error)]
pub enum GymlogError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Log full: the history holds at most {capacity} entries")]
    Capacity { capacity: usize },

    #[error("No entries to undo")]
    EmptyLog,

    #[error("Routine not found: {0}")]
    RoutineNotFound(String),

    #[error("The log changed since the undo was requested; run undo again")]
    StaleUndo,

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Not a gymlog directory: {0}")]
    NotGymlogDirectory(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Workbook error: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),
}

impl GymlogError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            GymlogError::NotGymlogDirectory(_) => 2,
            GymlogError::InvalidDate(_) => 3,
            GymlogError::RoutineNotFound(_) => 4,
            GymlogError::Validation(_) => 5,
            GymlogError::Capacity { .. } => 6,
            GymlogError::EmptyLog | GymlogError::StaleUndo => 7,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            GymlogError::NotGymlogDirectory(path) => {
                format!(
                    "Not a gymlog directory: {}\n\n\
                    Suggestions:\n\
                    • Run 'gymlog init' in this directory to start a new log\n\
                    • Navigate to an existing gymlog directory\n\
                    • Set GYMLOG_ROOT environment variable to your log path",
                    path.display()
                )
            }
            GymlogError::InvalidDate(input) => {
                format!(
                    "Invalid date: '{}'\n\n\
                    Valid dates:\n\
                    • today, yesterday\n\
                    • monday, tuesday, ..., sunday (most recent)\n\
                    • last monday, last friday, etc.\n\
                    • Specific dates: DD/MM/YYYY or YYYY-MM-DD\n\n\
                    Examples:\n\
                    gymlog set --date yesterday\n\
                    gymlog set --date 17/01/2025",
                    input
                )
            }
            GymlogError::RoutineNotFound(label) => {
                format!(
                    "Routine not found: '{}'\n\n\
                    Suggestions:\n\
                    • Use 'gymlog routines' to see the available routines\n\
                    • Matching is case-insensitive and accepts any part of the label (e.g. 'lunes')",
                    label
                )
            }
            GymlogError::Validation(msg) if msg.contains("exercise") => {
                format!(
                    "{}\n\n\
                    Set the exercise before recording:\n\
                    gymlog set --exercise 'Sentadillas'",
                    self
                )
            }
            GymlogError::Capacity { .. } => {
                format!(
                    "{}\n\n\
                    Suggestions:\n\
                    • Export the log with 'gymlog export' and archive it\n\
                    • Start a new log with 'gymlog init' in another directory",
                    self
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using GymlogError
pub type Result<T> = std::result::Result<T, GymlogError>;
