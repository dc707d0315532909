//! Infrastructure layer - External I/O and persistence

pub mod config;
pub mod layout;
pub mod macros;
pub mod repository;
pub mod workbook;

pub use config::Config;
pub use macros::MacroModule;
pub use repository::{FileSystemRepository, GymlogRepository};
pub use workbook::WorkbookSource;
