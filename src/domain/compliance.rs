//! Repetition range compliance

use crate::domain::catalog::ExerciseCatalog;
use crate::domain::entry::{LogEntry, StagingEntry};
use std::fmt;

/// Where a set's repetition count falls relative to the exercise's optimal range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Compliance {
    Below,
    InRange,
    Above,
    /// No reps recorded, or the exercise has no range
    Unknown,
}

impl Compliance {
    /// Training advice for out-of-range sets
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Compliance::Above => Some("increase weight"),
            Compliance::Below => Some("consider decreasing weight"),
            Compliance::InRange | Compliance::Unknown => None,
        }
    }

    pub fn is_classified(&self) -> bool {
        !matches!(self, Compliance::Unknown)
    }
}

impl fmt::Display for Compliance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Compliance::Below => "BELOW",
            Compliance::InRange => "IN RANGE",
            Compliance::Above => "ABOVE",
            Compliance::Unknown => "-",
        };
        f.write_str(label)
    }
}

/// Classify a repetition count against the catalog. Total: never fails.
pub fn classify(exercise: &str, reps: Option<u32>, catalog: &ExerciseCatalog) -> Compliance {
    let (Some(reps), Some(range)) = (reps, catalog.rep_range(exercise)) else {
        return Compliance::Unknown;
    };

    if range.contains(reps) {
        Compliance::InRange
    } else if reps > range.max {
        Compliance::Above
    } else {
        Compliance::Below
    }
}

pub fn classify_entry(entry: &LogEntry, catalog: &ExerciseCatalog) -> Compliance {
    classify(&entry.exercise, entry.reps, catalog)
}

/// Live feedback for the draft before it is recorded
pub fn classify_staging(staging: &StagingEntry, catalog: &ExerciseCatalog) -> Compliance {
    match staging.exercise_name() {
        Some(name) => classify(name, staging.reps, catalog),
        None => Compliance::Unknown,
    }
}
