//! Dashboard use case

use crate::domain::DashboardMetrics;
use crate::error::Result;
use crate::infrastructure::FileSystemRepository;
use chrono::NaiveDate;

/// Derived metrics over the saved log, recomputed on every call
pub fn dashboard(repository: &FileSystemRepository, today: NaiveDate) -> Result<DashboardMetrics> {
    let store = repository.load_store()?;
    let catalog = repository.load_catalog()?;
    Ok(DashboardMetrics::compute(&store, &catalog, today))
}
