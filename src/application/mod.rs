//! Application layer - Use cases and orchestration

pub mod dashboard;
pub mod export;
pub mod history;
pub mod init;
pub mod manage_config;
pub mod record;
pub mod routines;
pub mod staging;

pub use export::{ExportReport, ExportService};
pub use history::HistoryRow;
pub use record::{PendingUndo, RecordService};
pub use routines::{RoutineListing, RoutineService};
pub use staging::{StagingService, StagingView};
