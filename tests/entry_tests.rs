//! Integration tests for staging, add, clear and undo

#![allow(deprecated)]

use predicates::prelude::*;
use std::fs;

mod common;
use common::{gymlog_cmd, run_ok, workspace};

fn log_lines(temp: &tempfile::TempDir) -> Vec<String> {
    fs::read_to_string(temp.path().join(".gymlog/log.csv"))
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_set_shows_staging_and_feedback() {
    let temp = workspace();

    gymlog_cmd()
        .current_dir(temp.path())
        .args([
            "set",
            "--routine",
            "lunes",
            "--exercise",
            "Flexiones clásicas",
            "--reps",
            "25",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Routine:   Lunes - Pecho y Tríceps"))
        .stdout(predicate::str::contains("Target:    10-20 reps"))
        .stdout(predicate::str::contains("ABOVE (increase weight)"));

    gymlog_cmd()
        .current_dir(temp.path())
        .arg("staging")
        .assert()
        .success()
        .stdout(predicate::str::contains("Reps:      25"));
}

#[test]
fn test_set_below_range_feedback() {
    let temp = workspace();

    gymlog_cmd()
        .current_dir(temp.path())
        .args(["set", "--exercise", "Sentadillas", "--reps", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("BELOW (consider decreasing weight)"));
}

#[test]
fn test_set_unknown_routine_fails() {
    let temp = workspace();

    gymlog_cmd()
        .current_dir(temp.path())
        .args(["set", "--routine", "domingo"])
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("gymlog routines"));
}

#[test]
fn test_set_invalid_date_fails() {
    let temp = workspace();

    gymlog_cmd()
        .current_dir(temp.path())
        .args(["set", "--date", "someday"])
        .assert()
        .failure()
        .code(3);
}

#[test]
fn test_set_specific_date() {
    let temp = workspace();

    gymlog_cmd()
        .current_dir(temp.path())
        .args(["set", "--date", "2025-01-17"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Date:      17/01/2025"));
}

#[test]
fn test_add_records_and_advances_set() {
    let temp = workspace();
    run_ok(&temp, &["set", "--exercise", "Burpees", "--reps", "12"]);

    gymlog_cmd()
        .current_dir(temp.path())
        .arg("add")
        .assert()
        .success()
        .stdout(predicate::str::contains("Entry recorded in row 12 (next set: 2)"));

    gymlog_cmd()
        .current_dir(temp.path())
        .arg("add")
        .assert()
        .success()
        .stdout(predicate::str::contains("Entry recorded in row 13 (next set: 3)"));

    let lines = log_lines(&temp);
    assert_eq!(lines.len(), 3);
    assert!(lines[1].contains(",Burpees,1,12,"));
    // Reps are cleared after each add
    assert!(lines[2].contains(",Burpees,2,,"));

    gymlog_cmd()
        .current_dir(temp.path())
        .arg("staging")
        .assert()
        .success()
        .stdout(predicate::str::contains("Exercise:  Burpees"))
        .stdout(predicate::str::contains("Set:       3"))
        .stdout(predicate::str::contains("Reps:      -"));
}

#[test]
fn test_add_without_exercise_fails() {
    let temp = workspace();

    gymlog_cmd()
        .current_dir(temp.path())
        .arg("add")
        .assert()
        .failure()
        .code(5)
        .stderr(predicate::str::contains("missing exercise"));

    assert_eq!(log_lines(&temp).len(), 1);
}

#[test]
fn test_clear_resets_staging() {
    let temp = workspace();
    run_ok(&temp, &["set", "--exercise", "Burpees", "--notes", "tired"]);

    gymlog_cmd()
        .current_dir(temp.path())
        .arg("clear")
        .assert()
        .success()
        .stdout(predicate::str::contains("Staging entry cleared"));

    gymlog_cmd()
        .current_dir(temp.path())
        .arg("staging")
        .assert()
        .success()
        .stdout(predicate::str::contains("Exercise:  -"))
        .stdout(predicate::str::contains("Notes:     -"));
}

#[test]
fn test_undo_empty_log_fails() {
    let temp = workspace();

    gymlog_cmd()
        .current_dir(temp.path())
        .args(["undo", "--yes"])
        .assert()
        .failure()
        .code(7)
        .stderr(predicate::str::contains("No entries to undo"));
}

#[test]
fn test_undo_declined_keeps_entry() {
    let temp = workspace();
    run_ok(&temp, &["set", "--exercise", "Burpees"]);
    run_ok(&temp, &["add"]);

    gymlog_cmd()
        .current_dir(temp.path())
        .arg("undo")
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Exercise: Burpees"))
        .stdout(predicate::str::contains("Undo cancelled"));

    assert_eq!(log_lines(&temp).len(), 2);
}

#[test]
fn test_undo_confirmed_removes_last_entry() {
    let temp = workspace();
    run_ok(&temp, &["set", "--exercise", "Burpees"]);
    run_ok(&temp, &["add"]);
    run_ok(&temp, &["set", "--exercise", "Superman"]);
    run_ok(&temp, &["add"]);

    gymlog_cmd()
        .current_dir(temp.path())
        .arg("undo")
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Row:      13"))
        .stdout(predicate::str::contains("Removed Superman"));

    let lines = log_lines(&temp);
    assert_eq!(lines.len(), 2);
    assert!(lines[1].contains("Burpees"));
}

#[test]
fn test_undo_yes_skips_prompt() {
    let temp = workspace();
    run_ok(&temp, &["set", "--exercise", "Burpees"]);
    run_ok(&temp, &["add"]);

    gymlog_cmd()
        .current_dir(temp.path())
        .args(["undo", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed Burpees"));

    assert_eq!(log_lines(&temp).len(), 1);
}
