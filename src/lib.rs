//! gymlog - Home workout log
//!
//! Keeps a capacity-bounded history of training sets plus a staging entry
//! for the set being filled in, computes progress metrics and classifies
//! each set against the exercise's optimal repetition range. The log can be
//! exported as a spreadsheet workbook with a matching VBA macro module.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::GymlogError;
