//! CLI command definitions

use crate::domain::{DateReference, StagingUpdate};
use crate::error::Result;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "gymlog")]
#[command(about = "Home workout log with spreadsheet export", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new workout log
    Init {
        /// Directory to initialize (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Edit fields of the staging entry
    Set(SetArgs),

    /// Show the staging entry
    Staging,

    /// Record the staging entry in the log
    Add,

    /// Blank the staging entry and reset its date to today
    Clear,

    /// Remove the most recent log entry
    Undo {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// List the exercises of a routine
    Routine {
        /// Routine label or part of it (case-insensitive)
        label: String,
    },

    /// List all routines
    Routines,

    /// Show recorded entries, newest first
    History {
        /// Show only the N most recent entries
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Show progress statistics
    Dashboard,

    /// Write the workbook and its macro module
    Export {
        /// Output directory (default: workspace root)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// View or modify configuration
    Config {
        /// Config key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all configuration
        #[arg(short, long)]
        list: bool,
    },
}

/// Staging fields to change; omitted flags keep their value and an empty
/// string blanks a text field
#[derive(Args, Debug, Default)]
pub struct SetArgs {
    /// Training date (e.g., today, yesterday, monday, last friday, 17/01/2025)
    #[arg(short, long)]
    pub date: Option<String>,

    /// Routine label or part of it
    #[arg(short, long)]
    pub routine: Option<String>,

    /// Exercise name
    #[arg(short, long)]
    pub exercise: Option<String>,

    /// Set number
    #[arg(short, long = "set")]
    pub set_number: Option<u32>,

    /// Repetitions
    #[arg(long)]
    pub reps: Option<u32>,

    /// Weight in kilograms
    #[arg(short, long)]
    pub weight: Option<f64>,

    /// Rest in seconds
    #[arg(long)]
    pub rest: Option<u32>,

    /// Free-text notes
    #[arg(short, long)]
    pub notes: Option<String>,
}

impl SetArgs {
    /// Convert to a staging update, resolving the date against `today`
    pub fn into_update(self, today: NaiveDate) -> Result<StagingUpdate> {
        let date = match self.date {
            Some(reference) => Some(DateReference::parse(&reference)?.resolve(today)),
            None => None,
        };

        Ok(StagingUpdate {
            date,
            routine: self.routine,
            exercise: self.exercise,
            set_number: self.set_number,
            reps: self.reps,
            weight_kg: self.weight,
            rest_seconds: self.rest,
            notes: self.notes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GymlogError;
    use clap::CommandFactory;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 17).unwrap()
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_set_flags() {
        let cli = Cli::parse_from([
            "gymlog", "set", "--exercise", "Burpees", "--reps", "12", "--weight", "2.5", "--set",
            "3",
        ]);

        match cli.command {
            Some(Commands::Set(args)) => {
                let update = args.into_update(today()).unwrap();
                assert_eq!(update.exercise.as_deref(), Some("Burpees"));
                assert_eq!(update.reps, Some(12));
                assert_eq!(update.weight_kg, Some(2.5));
                assert_eq!(update.set_number, Some(3));
                assert_eq!(update.date, None);
            }
            other => panic!("Expected set command, got {:?}", other),
        }
    }

    #[test]
    fn test_into_update_resolves_date() {
        let args = SetArgs {
            date: Some("monday".to_string()),
            ..Default::default()
        };
        let update = args.into_update(today()).unwrap();
        assert_eq!(update.date, NaiveDate::from_ymd_opt(2025, 1, 13));
    }

    #[test]
    fn test_into_update_rejects_bad_date() {
        let args = SetArgs {
            date: Some("someday".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            args.into_update(today()),
            Err(GymlogError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_empty_set_is_empty_update() {
        let update = SetArgs::default().into_update(today()).unwrap();
        assert!(update.is_empty());
    }
}
