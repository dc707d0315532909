//! Domain layer - Business logic and domain models

pub mod catalog;
pub mod commands;
pub mod compliance;
pub mod date_ref;
pub mod entry;
pub mod metrics;
pub mod store;

pub use catalog::{ExerciseCatalog, RepRange, Routine};
pub use commands::{AppendOutcome, UndoPreview};
pub use compliance::{classify, Compliance};
pub use date_ref::DateReference;
pub use entry::{LogEntry, StagingEntry, StagingUpdate};
pub use metrics::DashboardMetrics;
pub use store::SessionLogStore;
