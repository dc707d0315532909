//! Log entries and the staging draft

use crate::domain::catalog::ExerciseCatalog;
use crate::error::{GymlogError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One recorded set in the history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub date: NaiveDate,
    pub routine: Option<String>,
    pub exercise: String,
    pub set_number: u32,
    pub reps: Option<u32>,
    pub weight_kg: Option<f64>,
    pub rest_seconds: Option<u32>,
    pub notes: Option<String>,
}

/// The in-progress set the user is filling in before recording it.
///
/// Owned by the caller's session and passed explicitly to each command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StagingEntry {
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routine: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exercise: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set_number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest_seconds: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl StagingEntry {
    /// Blank draft dated `date`
    pub fn new(date: NaiveDate) -> Self {
        StagingEntry {
            date,
            routine: None,
            exercise: None,
            set_number: None,
            reps: None,
            weight_kg: None,
            rest_seconds: None,
            notes: None,
        }
    }

    /// Trimmed exercise name, or `None` when blank
    pub fn exercise_name(&self) -> Option<&str> {
        self.exercise
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    /// Set number that is usable as-is (present and positive)
    pub fn valid_set_number(&self) -> Option<u32> {
        self.set_number.filter(|n| *n > 0)
    }

    /// Drop the per-set measurements, keeping date, routine, exercise and set number
    pub(crate) fn clear_measurements(&mut self) {
        self.reps = None;
        self.weight_kg = None;
        self.rest_seconds = None;
        self.notes = None;
    }

    /// Apply a batch of field edits. Every field is validated before any is
    /// written, so a rejected update leaves the draft unchanged.
    pub fn apply(&mut self, update: StagingUpdate, catalog: &ExerciseCatalog) -> Result<()> {
        let routine = match update.routine.as_deref().map(str::trim) {
            None => None,
            Some("") => Some(None),
            Some(query) => Some(Some(catalog.resolve_label(query)?.to_string())),
        };

        if update.set_number == Some(0) {
            return Err(GymlogError::Validation(
                "set number must be a positive integer".to_string(),
            ));
        }

        if let Some(weight) = update.weight_kg {
            if !weight.is_finite() || weight < 0.0 {
                return Err(GymlogError::Validation(format!(
                    "weight must be a non-negative number, got {}",
                    weight
                )));
            }
        }

        if let Some(date) = update.date {
            self.date = date;
        }
        if let Some(routine) = routine {
            self.routine = routine;
        }
        if let Some(exercise) = update.exercise {
            self.exercise = non_blank(exercise);
        }
        if let Some(set_number) = update.set_number {
            self.set_number = Some(set_number);
        }
        if let Some(reps) = update.reps {
            self.reps = Some(reps);
        }
        if let Some(weight) = update.weight_kg {
            self.weight_kg = Some(weight);
        }
        if let Some(rest) = update.rest_seconds {
            self.rest_seconds = Some(rest);
        }
        if let Some(notes) = update.notes {
            self.notes = non_blank(notes);
        }

        Ok(())
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Field edits for [`StagingEntry::apply`]. `None` leaves a field alone; an
/// empty string blanks a text field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StagingUpdate {
    pub date: Option<NaiveDate>,
    pub routine: Option<String>,
    pub exercise: Option<String>,
    pub set_number: Option<u32>,
    pub reps: Option<u32>,
    pub weight_kg: Option<f64>,
    pub rest_seconds: Option<u32>,
    pub notes: Option<String>,
}

impl StagingUpdate {
    pub fn is_empty(&self) -> bool {
        *self == StagingUpdate::default()
    }
}
