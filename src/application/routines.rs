//! Routine lookup use cases

use crate::domain::commands::list_exercises_for_routine;
use crate::domain::{ExerciseCatalog, RepRange};
use crate::error::Result;
use crate::infrastructure::FileSystemRepository;

/// Exercises of one routine with their target ranges
#[derive(Debug, Clone, PartialEq)]
pub struct RoutineListing {
    pub label: String,
    pub exercises: Vec<(String, Option<RepRange>)>,
}

pub struct RoutineService {
    repository: FileSystemRepository,
}

impl RoutineService {
    pub fn new(repository: FileSystemRepository) -> Self {
        RoutineService { repository }
    }

    /// Exercises of the first routine whose label contains `query`
    pub fn exercises(&self, query: &str) -> Result<RoutineListing> {
        let catalog = self.repository.load_catalog()?;
        let label = catalog.find_routine(query)?.label.clone();
        let exercises = list_exercises_for_routine(&catalog, query)?
            .into_iter()
            .map(|name| {
                let range = catalog.rep_range(&name);
                (name, range)
            })
            .collect();

        Ok(RoutineListing { label, exercises })
    }

    pub fn catalog(&self) -> Result<ExerciseCatalog> {
        self.repository.load_catalog()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::init::init;
    use crate::error::GymlogError;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn setup() -> (TempDir, RoutineService) {
        let temp = TempDir::new().unwrap();
        let repo = init(temp.path(), NaiveDate::from_ymd_opt(2025, 1, 17).unwrap()).unwrap();
        (temp, RoutineService::new(repo))
    }

    #[test]
    fn test_exercises_case_insensitive() {
        let (_temp, service) = setup();

        let listing = service.exercises("LUNES").unwrap();

        assert_eq!(listing.label, "Lunes - Pecho y Tríceps");
        assert_eq!(listing.exercises.len(), 6);
        assert_eq!(
            listing.exercises[0],
            ("Flexiones clásicas".to_string(), Some(RepRange { min: 10, max: 20 }))
        );
        // No explicit range: default applies
        assert_eq!(
            listing.exercises[1],
            ("Flexiones diamante".to_string(), Some(RepRange { min: 8, max: 15 }))
        );
    }

    #[test]
    fn test_exercises_unknown_routine() {
        let (_temp, service) = setup();
        assert!(matches!(
            service.exercises("sábado"),
            Err(GymlogError::RoutineNotFound(_))
        ));
    }

    #[test]
    fn test_catalog_has_five_routines() {
        let (_temp, service) = setup();
        assert_eq!(service.catalog().unwrap().routines().len(), 5);
    }
}
