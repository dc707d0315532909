//! Cell coordinates shared by the workbook and macro exports.
//!
//! Rows here are 1-based, as a spreadsheet user sees them. Subtract one
//! before handing them to the xlsx writer.

use crate::domain::store::{FIRST_DATA_ROW, LAST_SHEET_ROW, LOG_CAPACITY};

pub const LOG_SHEET: &str = "Log";
pub const ROUTINES_SHEET: &str = "Routines";
pub const PROGRESS_SHEET: &str = "Progress";
pub const INSTRUCTIONS_SHEET: &str = "Instructions";

/// Quick-entry labels
pub const STAGING_LABEL_ROW: u32 = 5;
/// Quick-entry input cells
pub const STAGING_ROW: u32 = 6;
/// Captions naming the macro for each command
pub const COMMAND_ROW: u32 = 8;
pub const HISTORY_TITLE_ROW: u32 = 10;
pub const HISTORY_HEADER_ROW: u32 = FIRST_DATA_ROW as u32 - 1;
pub const FIRST_ENTRY_ROW: u32 = FIRST_DATA_ROW as u32;
pub const LAST_ENTRY_ROW: u32 = LAST_SHEET_ROW as u32;
pub const CAPACITY: u32 = LOG_CAPACITY as u32;

/// Columns holding the eight entry fields, A to H
pub const ENTRY_COLUMNS: u16 = 8;
/// Classification column (I)
pub const STATUS_COLUMN: u16 = 8;

pub const COL_DATE: u16 = 0;
pub const COL_ROUTINE: u16 = 1;
pub const COL_EXERCISE: u16 = 2;
pub const COL_SET: u16 = 3;
pub const COL_REPS: u16 = 4;
pub const COL_WEIGHT: u16 = 5;
pub const COL_REST: u16 = 6;
pub const COL_NOTES: u16 = 7;

pub const ENTRY_HEADERS: [&str; 9] = [
    "Date",
    "Routine",
    "Exercise",
    "Set",
    "Reps",
    "Weight (kg)",
    "Rest (s)",
    "Notes",
    "Status",
];

/// Workbook-level names for the lookup data on the Routines sheet
pub const NAME_ROUTINE_LABELS: &str = "RoutineLabels";
pub const NAME_REP_EXERCISES: &str = "RepExercises";
pub const NAME_REP_MIN: &str = "RepMin";
pub const NAME_REP_MAX: &str = "RepMax";

/// First row of the rep-range lookup table and the routine label list
pub const LOOKUP_FIRST_ROW: u32 = 5;

/// Exercises listed per routine by the show-exercises macro
pub const MAX_LISTED: u32 = crate::domain::commands::MAX_LISTED_EXERCISES as u32;

/// Spreadsheet column letter for a zero-based column index
pub fn column_letter(col: u16) -> String {
    let mut n = col as u32 + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push((b'A' + rem as u8) as char);
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// Absolute reference to a column of the history, e.g. `Log!$C$12:$C$200`
pub fn history_range(col: u16) -> String {
    let letter = column_letter(col);
    format!(
        "{}!${}${}:${}${}",
        LOG_SHEET, letter, FIRST_ENTRY_ROW, letter, LAST_ENTRY_ROW
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_agree_with_store() {
        assert_eq!(HISTORY_HEADER_ROW, 11);
        assert_eq!(FIRST_ENTRY_ROW, 12);
        assert_eq!(LAST_ENTRY_ROW - FIRST_ENTRY_ROW + 1, CAPACITY);
        assert_eq!(CAPACITY, 189);
    }

    #[test]
    fn test_column_letter() {
        assert_eq!(column_letter(0), "A");
        assert_eq!(column_letter(STATUS_COLUMN), "I");
        assert_eq!(column_letter(25), "Z");
        assert_eq!(column_letter(26), "AA");
    }

    #[test]
    fn test_history_range() {
        assert_eq!(history_range(COL_EXERCISE), "Log!$C$12:$C$200");
    }
}
