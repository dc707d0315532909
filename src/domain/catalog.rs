//! Exercise catalog: weekday routines and optimal repetition ranges

use crate::error::{GymlogError, Result};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Number of weekday routines a catalog holds
pub const ROUTINE_COUNT: usize = 5;

/// Range applied to catalog exercises that have no explicit mapping
pub const DEFAULT_REP_RANGE: RepRange = RepRange { min: 8, max: 15 };

fn rep_range_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^\s*(\d+)\s*-\s*(\d+)\s*$").unwrap())
}

/// Optimal repetition bounds for an exercise, inclusive on both ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RepRange {
    pub min: u32,
    pub max: u32,
}

impl RepRange {
    /// Create a range, rejecting `min > max`
    pub fn new(min: u32, max: u32) -> Result<Self> {
        if min > max {
            return Err(GymlogError::Validation(format!(
                "invalid repetition range {}-{}: minimum exceeds maximum",
                min, max
            )));
        }
        Ok(RepRange { min, max })
    }

    pub fn contains(&self, reps: u32) -> bool {
        reps >= self.min && reps <= self.max
    }
}

impl fmt::Display for RepRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

impl FromStr for RepRange {
    type Err = GymlogError;

    /// Parse a `min-max` string such as `10-20`
    fn from_str(s: &str) -> Result<Self> {
        let captures = rep_range_regex().captures(s).ok_or_else(|| {
            GymlogError::Validation(format!(
                "invalid repetition range '{}': expected MIN-MAX",
                s
            ))
        })?;

        let parse = |idx: usize| {
            captures[idx].parse::<u32>().map_err(|_| {
                GymlogError::Validation(format!("repetition bound out of range in '{}'", s))
            })
        };

        RepRange::new(parse(1)?, parse(2)?)
    }
}

impl Serialize for RepRange {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for RepRange {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A weekday routine: its label and ordered exercise list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Routine {
    pub label: String,
    pub exercises: Vec<String>,
}

impl Routine {
    pub fn new(label: impl Into<String>, exercises: &[&str]) -> Self {
        Routine {
            label: label.into(),
            exercises: exercises.iter().map(|e| e.to_string()).collect(),
        }
    }
}

/// On-disk shape of the catalog; converted through [`ExerciseCatalog::new`]
/// so that a loaded file is validated like any other catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogFile {
    routines: Vec<Routine>,
    #[serde(default)]
    rep_ranges: BTreeMap<String, RepRange>,
}

/// Immutable reference data: exactly [`ROUTINE_COUNT`] routines plus the
/// optimal repetition range of each exercise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CatalogFile", into = "CatalogFile")]
pub struct ExerciseCatalog {
    routines: Vec<Routine>,
    rep_ranges: BTreeMap<String, RepRange>,
}

impl TryFrom<CatalogFile> for ExerciseCatalog {
    type Error = GymlogError;

    fn try_from(file: CatalogFile) -> Result<Self> {
        ExerciseCatalog::new(file.routines, file.rep_ranges)
    }
}

impl From<ExerciseCatalog> for CatalogFile {
    fn from(catalog: ExerciseCatalog) -> Self {
        CatalogFile {
            routines: catalog.routines,
            rep_ranges: catalog.rep_ranges,
        }
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

impl ExerciseCatalog {
    /// Build a catalog, validating its invariants
    pub fn new(routines: Vec<Routine>, rep_ranges: BTreeMap<String, RepRange>) -> Result<Self> {
        if routines.len() != ROUTINE_COUNT {
            return Err(GymlogError::Config(format!(
                "catalog must define exactly {} routines, found {}",
                ROUTINE_COUNT,
                routines.len()
            )));
        }

        let mut labels = HashSet::new();
        for routine in &routines {
            if routine.label.trim().is_empty() {
                return Err(GymlogError::Config(
                    "routine labels cannot be blank".to_string(),
                ));
            }
            if !labels.insert(normalize(&routine.label)) {
                return Err(GymlogError::Config(format!(
                    "duplicate routine label: '{}'",
                    routine.label
                )));
            }

            let mut names = HashSet::new();
            for exercise in &routine.exercises {
                if exercise.trim().is_empty() {
                    return Err(GymlogError::Config(format!(
                        "routine '{}' contains a blank exercise name",
                        routine.label
                    )));
                }
                if !names.insert(normalize(exercise)) {
                    return Err(GymlogError::Config(format!(
                        "exercise '{}' appears twice in routine '{}'",
                        exercise, routine.label
                    )));
                }
            }
        }

        Ok(ExerciseCatalog {
            routines,
            rep_ranges,
        })
    }

    /// The built-in five-day home workout plan
    pub fn home_workout() -> Self {
        let routines = vec![
            Routine::new(
                "Lunes - Pecho y Tríceps",
                &[
                    "Flexiones clásicas",
                    "Flexiones diamante",
                    "Flexiones declinadas",
                    "Fondos en silla",
                    "Flexiones abiertas",
                    "Extensión tríceps con mancuerna",
                ],
            ),
            Routine::new(
                "Martes - Espalda y Bíceps",
                &[
                    "Remo con mancuernas",
                    "Dominadas (o banda elástica)",
                    "Remo invertido (mesa)",
                    "Curl bíceps con mancuerna",
                    "Curl martillo",
                    "Superman",
                ],
            ),
            Routine::new(
                "Miércoles - Piernas",
                &[
                    "Sentadillas",
                    "Sentadilla búlgara",
                    "Zancadas",
                    "Peso muerto rumano",
                    "Elevación de talones",
                    "Puente de glúteos",
                ],
            ),
            Routine::new(
                "Jueves - Hombros y Core",
                &[
                    "Press militar con mancuernas",
                    "Elevaciones laterales",
                    "Elevaciones frontales",
                    "Plancha frontal (seg)",
                    "Plancha lateral (seg)",
                    "Crunch abdominal",
                ],
            ),
            Routine::new(
                "Viernes - Full Body",
                &[
                    "Burpees",
                    "Sentadilla con salto",
                    "Flexiones",
                    "Remo con mancuernas",
                    "Zancadas con salto",
                    "Mountain climbers",
                ],
            ),
        ];

        let rep_ranges = [
            ("Flexiones clásicas", 10, 20),
            ("Fondos en silla", 10, 20),
            ("Flexiones abiertas", 10, 20),
            ("Extensión tríceps con mancuerna", 10, 15),
            ("Remo con mancuernas", 8, 12),
            ("Dominadas (o banda elástica)", 5, 10),
            ("Curl bíceps con mancuerna", 10, 15),
            ("Curl martillo", 10, 15),
            ("Superman", 12, 20),
            ("Sentadillas", 15, 25),
            ("Sentadilla búlgara", 8, 12),
            ("Zancadas", 10, 15),
            ("Peso muerto rumano", 8, 12),
            ("Elevación de talones", 15, 25),
            ("Puente de glúteos", 12, 20),
            ("Press militar con mancuernas", 8, 12),
            ("Elevaciones laterales", 12, 15),
            ("Elevaciones frontales", 12, 15),
            ("Plancha frontal (seg)", 30, 60),
            ("Plancha lateral (seg)", 20, 45),
            ("Crunch abdominal", 15, 25),
            ("Sentadilla con salto", 10, 15),
            ("Flexiones", 10, 20),
            ("Zancadas con salto", 10, 15),
            ("Mountain climbers", 20, 40),
        ]
        .into_iter()
        .map(|(name, min, max)| (name.to_string(), RepRange { min, max }))
        .collect();

        ExerciseCatalog {
            routines,
            rep_ranges,
        }
    }

    pub fn routines(&self) -> &[Routine] {
        &self.routines
    }

    /// Routine labels in catalog order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.routines.iter().map(|r| r.label.as_str())
    }

    /// Explicitly configured ranges, keyed by exercise name
    pub fn rep_ranges(&self) -> &BTreeMap<String, RepRange> {
        &self.rep_ranges
    }

    /// Whether any routine lists this exercise (case-insensitive)
    pub fn contains_exercise(&self, name: &str) -> bool {
        let needle = normalize(name);
        self.routines
            .iter()
            .flat_map(|r| r.exercises.iter())
            .any(|e| normalize(e) == needle)
    }

    /// Optimal range for an exercise.
    ///
    /// Explicit mappings win; exercises that appear in a routine without one
    /// get [`DEFAULT_REP_RANGE`]; anything else has no range.
    pub fn rep_range(&self, name: &str) -> Option<RepRange> {
        let needle = normalize(name);
        if needle.is_empty() {
            return None;
        }

        self.rep_ranges
            .iter()
            .find(|(exercise, _)| normalize(exercise) == needle)
            .map(|(_, range)| *range)
            .or_else(|| self.contains_exercise(name).then_some(DEFAULT_REP_RANGE))
    }

    /// Every exercise with a range, paired with that range: routine exercises
    /// first in catalog order, then mapped exercises that no routine lists.
    pub fn effective_rep_ranges(&self) -> Vec<(String, RepRange)> {
        let mut seen = HashSet::new();
        let mut table = Vec::new();

        let routine_names = self.routines.iter().flat_map(|r| r.exercises.iter());
        for name in routine_names.chain(self.rep_ranges.keys()) {
            if seen.insert(normalize(name)) {
                if let Some(range) = self.rep_range(name) {
                    table.push((name.clone(), range));
                }
            }
        }

        table
    }

    /// First routine whose label contains `query`, compared case-insensitively
    pub fn find_routine(&self, query: &str) -> Result<&Routine> {
        let needle = normalize(query);
        if needle.is_empty() {
            return Err(GymlogError::RoutineNotFound(query.to_string()));
        }

        self.routines
            .iter()
            .find(|r| r.label.to_lowercase().contains(&needle))
            .ok_or_else(|| GymlogError::RoutineNotFound(query.to_string()))
    }

    /// Resolve user input to a full routine label. An exact label match wins
    /// over a substring match.
    pub fn resolve_label(&self, query: &str) -> Result<&str> {
        let needle = normalize(query);
        if let Some(routine) = self.routines.iter().find(|r| normalize(&r.label) == needle) {
            return Ok(&routine.label);
        }
        self.find_routine(query).map(|r| r.label.as_str())
    }
}

impl Default for ExerciseCatalog {
    fn default() -> Self {
        ExerciseCatalog::home_workout()
    }
}
