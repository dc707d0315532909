//! Integration tests for routine listings, history, dashboard and export

#![allow(deprecated)]

use predicates::prelude::*;
use std::fs;

mod common;
use common::{gymlog_cmd, run_ok, workspace};

#[test]
fn test_routine_lists_exercises_in_order() {
    let temp = workspace();

    gymlog_cmd()
        .current_dir(temp.path())
        .args(["routine", "LUNES"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Lunes - Pecho y Tríceps:"))
        .stdout(predicate::str::contains(" 1. Flexiones clásicas (10-20 reps)"))
        .stdout(predicate::str::contains(" 6. Extensión tríceps con mancuerna (10-15 reps)"));
}

#[test]
fn test_routine_not_found() {
    let temp = workspace();

    gymlog_cmd()
        .current_dir(temp.path())
        .args(["routine", "domingo"])
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("Routine not found: 'domingo'"));
}

#[test]
fn test_routines_lists_all_five() {
    let temp = workspace();

    let output = gymlog_cmd()
        .current_dir(temp.path())
        .arg("routines")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 5);
    assert!(stdout.contains("Miércoles - Piernas (6 exercises)"));
}

#[test]
fn test_history_newest_first() {
    let temp = workspace();
    run_ok(&temp, &["set", "--exercise", "Sentadillas", "--reps", "20"]);
    run_ok(&temp, &["add"]);
    run_ok(&temp, &["set", "--exercise", "Zancadas", "--reps", "30", "--routine", "miércoles"]);
    run_ok(&temp, &["add"]);

    let output = gymlog_cmd()
        .current_dir(temp.path())
        .arg("history")
        .output()
        .unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();

    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with(" 13"));
    assert!(lines[0].contains("Zancadas"));
    assert!(lines[0].contains("ABOVE"));
    assert!(lines[0].contains("[Miércoles - Piernas]"));
    assert!(lines[1].contains("Sentadillas"));
    assert!(lines[1].contains("IN RANGE"));

    gymlog_cmd()
        .current_dir(temp.path())
        .args(["history", "--limit", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Zancadas"))
        .stdout(predicate::str::contains("Sentadillas").not());
}

#[test]
fn test_history_empty() {
    let temp = workspace();

    gymlog_cmd()
        .current_dir(temp.path())
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("No entries recorded"));
}

#[test]
fn test_dashboard_counts_by_routine() {
    let temp = workspace();
    run_ok(&temp, &["set", "--routine", "lunes", "--exercise", "Flexiones clásicas", "--reps", "15"]);
    for _ in 0..3 {
        run_ok(&temp, &["add"]);
    }
    run_ok(&temp, &["set", "--routine", "martes", "--exercise", "Superman", "--reps", "30"]);
    run_ok(&temp, &["add"]);

    gymlog_cmd()
        .current_dir(temp.path())
        .arg("dashboard")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total sessions:         4"))
        .stdout(predicate::str::contains("Most frequent exercise: Flexiones clásicas"))
        .stdout(predicate::str::contains("Lunes - Pecho y Tríceps: 3 sets"))
        .stdout(predicate::str::contains("Martes - Espalda y Bíceps: 1 sets"))
        .stdout(predicate::str::contains("Viernes - Full Body: 0 sets"))
        .stdout(predicate::str::contains("Above: 1  Below: 0  In range: 1"));
}

#[test]
fn test_export_writes_workbook_and_macros() {
    let temp = workspace();
    run_ok(&temp, &["set", "--exercise", "Burpees", "--reps", "10"]);
    run_ok(&temp, &["add"]);

    gymlog_cmd()
        .current_dir(temp.path())
        .arg("export")
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 entries"));

    let workbook = fs::read(temp.path().join("workout_log.xlsx")).unwrap();
    assert!(workbook.starts_with(b"PK"));

    let macros = fs::read_to_string(temp.path().join("workout_macros.bas")).unwrap();
    assert!(macros.contains("Sub RecordEntry()"));
    assert!(macros.contains("Sub UndoLast()"));
}

#[test]
fn test_export_to_output_dir() {
    let temp = workspace();

    gymlog_cmd()
        .current_dir(temp.path())
        .args(["export", "--output", "out"])
        .assert()
        .success();

    assert!(temp.path().join("out/workout_log.xlsx").exists());
    assert!(temp.path().join("out/workout_macros.bas").exists());
}
