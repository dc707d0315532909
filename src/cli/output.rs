//! Output formatting utilities

use crate::application::{ExportReport, HistoryRow, RoutineListing, StagingView};
use crate::domain::commands::UndoPreview;
use crate::domain::{AppendOutcome, DashboardMetrics, ExerciseCatalog};
use crate::infrastructure::Config;

const BLANK: &str = "-";

fn or_blank<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| BLANK.to_string())
}

fn decimal(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.1}", v))
        .unwrap_or_else(|| BLANK.to_string())
}

/// Format the staging entry with its live feedback
pub fn format_staging(view: &StagingView, config: &Config) -> String {
    let staging = &view.staging;
    let mut output = String::new();

    output.push_str(&format!("Date:      {}\n", config.format_date(staging.date)));
    output.push_str(&format!("Routine:   {}\n", or_blank(staging.routine.as_deref())));
    output.push_str(&format!("Exercise:  {}\n", or_blank(staging.exercise.as_deref())));
    output.push_str(&format!("Set:       {}\n", or_blank(staging.set_number)));
    output.push_str(&format!("Reps:      {}\n", or_blank(staging.reps)));
    output.push_str(&format!("Weight:    {}\n", or_blank(staging.weight_kg)));
    output.push_str(&format!("Rest:      {}\n", or_blank(staging.rest_seconds)));
    output.push_str(&format!("Notes:     {}\n", or_blank(staging.notes.as_deref())));

    if let Some(range) = view.rep_range {
        output.push_str(&format!("Target:    {} reps\n", range));
    }
    if view.compliance.is_classified() {
        let feedback = match view.compliance.hint() {
            Some(hint) => format!("{} ({})", view.compliance, hint),
            None => view.compliance.to_string(),
        };
        output.push_str(&format!("Status:    {}\n", feedback));
    }
    output
}

pub fn format_append(outcome: &AppendOutcome) -> String {
    format!(
        "Entry recorded in row {} (next set: {})",
        outcome.row, outcome.next_set_number
    )
}

/// Confirmation text shown before an undo
pub fn format_undo_preview(preview: &UndoPreview, config: &Config) -> String {
    format!(
        "Delete the last entry?\n  Row:      {}\n  Date:     {}\n  Exercise: {}",
        preview.row,
        config.format_date(preview.date),
        preview.exercise
    )
}

/// Format one routine's exercises with their target ranges
pub fn format_routine(listing: &RoutineListing) -> String {
    let mut output = format!("{}:\n", listing.label);
    for (idx, (exercise, range)) in listing.exercises.iter().enumerate() {
        match range {
            Some(range) => output.push_str(&format!("{:>2}. {} ({} reps)\n", idx + 1, exercise, range)),
            None => output.push_str(&format!("{:>2}. {}\n", idx + 1, exercise)),
        }
    }
    output
}

pub fn format_routines(catalog: &ExerciseCatalog) -> String {
    let mut output = String::new();
    for routine in catalog.routines() {
        output.push_str(&format!(
            "{} ({} exercises)\n",
            routine.label,
            routine.exercises.len()
        ));
    }
    output
}

/// Format history rows as a table
pub fn format_history(rows: &[HistoryRow], config: &Config) -> String {
    if rows.is_empty() {
        return "No entries recorded".to_string();
    }

    let mut output = String::new();
    for HistoryRow {
        row,
        entry,
        compliance,
    } in rows
    {
        output.push_str(&format!(
            "{:>3}  {}  {}  set {}  {} reps  {} kg  {}",
            row,
            config.format_date(entry.date),
            entry.exercise,
            entry.set_number,
            or_blank(entry.reps),
            or_blank(entry.weight_kg),
            compliance
        ));
        if let Some(routine) = &entry.routine {
            output.push_str(&format!("  [{}]", routine));
        }
        if let Some(notes) = &entry.notes {
            output.push_str(&format!("  \"{}\"", notes));
        }
        output.push('\n');
    }
    output
}

/// Format the dashboard as plain text sections
pub fn format_dashboard(metrics: &DashboardMetrics, config: &Config) -> String {
    let summary = &metrics.summary;
    let insights = &metrics.insights;
    let compliance = &metrics.compliance;
    let mut output = String::new();

    output.push_str("SUMMARY\n");
    output.push_str(&format!("  Total sessions:         {}\n", summary.total_sessions));
    output.push_str(&format!(
        "  Last workout:           {}\n",
        or_blank(summary.last_trained.map(|d| config.format_date(d)))
    ));
    output.push_str(&format!(
        "  Heaviest weight (kg):   {}\n",
        decimal(summary.max_weight_kg)
    ));
    output.push_str(&format!("  Average reps:           {}\n", decimal(summary.avg_reps)));
    output.push_str(&format!(
        "  Most frequent exercise: {}\n",
        or_blank(summary.most_frequent_exercise.as_deref())
    ));

    output.push_str("\nBY ROUTINE\n");
    for routine in &metrics.routines {
        output.push_str(&format!(
            "  {}: {} sets, {} reps, avg {} reps, avg {} kg\n",
            routine.label,
            routine.sets_count,
            routine.total_reps,
            decimal(routine.avg_reps),
            decimal(routine.avg_weight_kg)
        ));
    }

    output.push_str("\nRECENT ACTIVITY\n");
    output.push_str(&format!(
        "  Days since last workout: {}\n",
        or_blank(insights.days_since_last_session)
    ));
    output.push_str(&format!("  Sets this week:          {}\n", insights.sessions_this_week));
    output.push_str(&format!("  Sets this month:         {}\n", insights.sessions_this_month));

    output.push_str("\nREP RANGE COMPLIANCE\n");
    output.push_str(&format!(
        "  Above: {}  Below: {}  In range: {}  ({:.0}% in range)\n",
        compliance.above,
        compliance.below,
        compliance.in_range,
        compliance.in_range_ratio * 100.0
    ));

    output.push_str("\nLATEST ENTRIES\n");
    if metrics.latest.is_empty() {
        output.push_str("  No entries recorded\n");
    }
    for entry in &metrics.latest {
        output.push_str(&format!(
            "  {}  {}  set {}  {} reps  {} kg\n",
            config.format_date(entry.date),
            entry.exercise,
            entry.set_number,
            or_blank(entry.reps),
            or_blank(entry.weight_kg)
        ));
    }
    output
}

pub fn format_export(report: &ExportReport) -> String {
    format!(
        "Exported {} entries\n  Workbook: {}\n  Macros:   {}",
        report.entries,
        report.workbook.display(),
        report.macros.display()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::{append, peek_undo};
    use crate::domain::{Compliance, RepRange, SessionLogStore, StagingEntry};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_format_staging_with_feedback() {
        let mut staging = StagingEntry::new(date(2025, 1, 17));
        staging.exercise = Some("Push-ups".to_string());
        staging.reps = Some(25);
        let view = StagingView {
            staging,
            compliance: Compliance::Above,
            rep_range: Some(RepRange { min: 10, max: 20 }),
        };

        let output = format_staging(&view, &Config::new());
        assert!(output.contains("Date:      17/01/2025"));
        assert!(output.contains("Routine:   -"));
        assert!(output.contains("Target:    10-20 reps"));
        assert!(output.contains("Status:    ABOVE (increase weight)"));
    }

    #[test]
    fn test_format_staging_without_feedback() {
        let view = StagingView {
            staging: StagingEntry::new(date(2025, 1, 17)),
            compliance: Compliance::Unknown,
            rep_range: None,
        };
        let output = format_staging(&view, &Config::new());
        assert!(!output.contains("Status:"));
        assert!(!output.contains("Target:"));
    }

    #[test]
    fn test_format_staging_with_time_only_format() {
        let mut config = Config::new();
        config.date_format = "%H:%M".to_string();
        let view = StagingView {
            staging: StagingEntry::new(date(2025, 1, 17)),
            compliance: Compliance::Unknown,
            rep_range: None,
        };

        let output = format_staging(&view, &config);
        assert!(output.contains("Date:      2025-01-17"));
    }

    #[test]
    fn test_format_append() {
        let outcome = AppendOutcome {
            index: 0,
            row: 12,
            next_set_number: 2,
        };
        assert_eq!(format_append(&outcome), "Entry recorded in row 12 (next set: 2)");
    }

    #[test]
    fn test_format_undo_preview() {
        let mut store = SessionLogStore::new();
        let mut staging = StagingEntry::new(date(2025, 1, 17));
        staging.exercise = Some("Burpees".to_string());
        append(&mut store, &mut staging).unwrap();

        let mut config = Config::new();
        config.date_format = "%Y-%m-%d".to_string();

        let output = format_undo_preview(&peek_undo(&store).unwrap(), &config);
        assert!(output.contains("Row:      12"));
        assert!(output.contains("Date:     2025-01-17"));
        assert!(output.contains("Exercise: Burpees"));
    }

    #[test]
    fn test_format_empty_history() {
        assert_eq!(format_history(&[], &Config::new()), "No entries recorded");
    }

    #[test]
    fn test_format_dashboard_empty() {
        let catalog = ExerciseCatalog::home_workout();
        let metrics = DashboardMetrics::compute(&SessionLogStore::new(), &catalog, date(2025, 1, 17));

        let output = format_dashboard(&metrics, &Config::new());
        assert!(output.contains("Total sessions:         0"));
        assert!(output.contains("Last workout:           -"));
        assert!(output.contains("Most frequent exercise: -"));
        assert!(output.contains("Viernes - Full Body: 0 sets"));
        assert!(output.contains("(100% in range)"));
    }
}
