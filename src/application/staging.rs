//! Staging entry use cases

use crate::domain::compliance::classify_staging;
use crate::domain::{Compliance, RepRange, StagingEntry, StagingUpdate};
use crate::error::Result;
use crate::infrastructure::FileSystemRepository;
use chrono::NaiveDate;

/// The draft together with its live range feedback
#[derive(Debug, Clone, PartialEq)]
pub struct StagingView {
    pub staging: StagingEntry,
    pub compliance: Compliance,
    pub rep_range: Option<RepRange>,
}

/// Service for reading and editing the staging entry
pub struct StagingService {
    repository: FileSystemRepository,
}

impl StagingService {
    pub fn new(repository: FileSystemRepository) -> Self {
        StagingService { repository }
    }

    /// Current draft with feedback
    pub fn show(&self, today: NaiveDate) -> Result<StagingView> {
        let staging = self.repository.load_staging(today)?;
        self.view(staging)
    }

    /// Apply field edits and persist them. A rejected edit leaves the saved draft as it was.
    pub fn update(&self, update: StagingUpdate, today: NaiveDate) -> Result<StagingView> {
        let catalog = self.repository.load_catalog()?;
        let mut staging = self.repository.load_staging(today)?;

        if let Err(e) = staging.apply(update, &catalog) {
            log::warn!("Rejected staging update: {}", e);
            return Err(e);
        }
        self.repository.save_staging(&staging)?;

        log::info!("Updated staging entry");
        self.view(staging)
    }

    fn view(&self, staging: StagingEntry) -> Result<StagingView> {
        let catalog = self.repository.load_catalog()?;
        let compliance = classify_staging(&staging, &catalog);
        let rep_range = staging
            .exercise_name()
            .and_then(|name| catalog.rep_range(name));

        Ok(StagingView {
            staging,
            compliance,
            rep_range,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::init::init;
    use crate::error::GymlogError;
    use tempfile::TempDir;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 17).unwrap()
    }

    fn setup() -> (TempDir, StagingService) {
        let temp = TempDir::new().unwrap();
        let repo = init(temp.path(), today()).unwrap();
        (temp, StagingService::new(repo))
    }

    #[test]
    fn test_update_gives_live_feedback() {
        let (_temp, service) = setup();

        let update = StagingUpdate {
            exercise: Some("Flexiones clásicas".to_string()),
            reps: Some(25),
            ..Default::default()
        };
        let view = service.update(update, today()).unwrap();

        assert_eq!(view.compliance, Compliance::Above);
        assert_eq!(view.rep_range, Some(RepRange { min: 10, max: 20 }));
        assert_eq!(service.show(today()).unwrap(), view);
    }

    #[test]
    fn test_rejected_update_is_not_saved() {
        let (_temp, service) = setup();
        let before = service.show(today()).unwrap();

        let update = StagingUpdate {
            exercise: Some("Burpees".to_string()),
            routine: Some("sunday".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            service.update(update, today()),
            Err(GymlogError::RoutineNotFound(_))
        ));
        assert_eq!(service.show(today()).unwrap(), before);
    }

    #[test]
    fn test_unknown_exercise_has_no_range() {
        let (_temp, service) = setup();

        let update = StagingUpdate {
            exercise: Some("Handstand walk".to_string()),
            reps: Some(5),
            ..Default::default()
        };
        let view = service.update(update, today()).unwrap();

        assert_eq!(view.compliance, Compliance::Unknown);
        assert_eq!(view.rep_range, None);
    }
}
