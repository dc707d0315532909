//! Export use case: workbook plus macro module

use crate::domain::DashboardMetrics;
use crate::error::Result;
use crate::infrastructure::workbook::save_workbook;
use crate::infrastructure::{FileSystemRepository, GymlogRepository, MacroModule, WorkbookSource};
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};

/// Files written by an export
#[derive(Debug, Clone, PartialEq)]
pub struct ExportReport {
    pub workbook: PathBuf,
    pub macros: PathBuf,
    pub entries: usize,
}

pub struct ExportService {
    repository: FileSystemRepository,
}

impl ExportService {
    pub fn new(repository: FileSystemRepository) -> Self {
        ExportService { repository }
    }

    /// Write the workbook and macro module into `output_dir`, or the
    /// workspace root when none is given. File names come from the config.
    pub fn export(&self, output_dir: Option<&Path>, today: NaiveDate) -> Result<ExportReport> {
        let config = self.repository.load_config()?;
        let catalog = self.repository.load_catalog()?;
        let store = self.repository.load_store()?;
        let staging = self.repository.load_staging(today)?;
        let metrics = DashboardMetrics::compute(&store, &catalog, today);

        let workbook = self.repository.export_path(output_dir, &config.workbook_file);
        let macros = self.repository.export_path(output_dir, &config.macros_file);
        if let Some(parent) = workbook.parent() {
            fs::create_dir_all(parent)?;
        }

        let source = WorkbookSource {
            catalog: &catalog,
            store: &store,
            staging: &staging,
            metrics: &metrics,
        };
        save_workbook(&source, &workbook)?;
        MacroModule::standard().save(&macros)?;

        Ok(ExportReport {
            workbook,
            macros,
            entries: store.len(),
        })
    }
}
