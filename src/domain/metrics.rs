//! Derived metrics over the session log
//!
//! Everything here is recomputed from the entries on each call; nothing is cached.

use crate::domain::catalog::ExerciseCatalog;
use crate::domain::compliance::{classify_entry, Compliance};
use crate::domain::entry::LogEntry;
use crate::domain::store::SessionLogStore;
use chrono::{Datelike, Duration, NaiveDate};
use std::collections::HashMap;

/// Size of the "latest entries" view
pub const LATEST_ENTRIES: usize = 10;

/// Whole-log statistics
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Summary {
    pub total_sessions: usize,
    pub last_trained: Option<NaiveDate>,
    pub max_weight_kg: Option<f64>,
    pub avg_reps: Option<f64>,
    pub most_frequent_exercise: Option<String>,
}

/// Volume recorded under one routine label
#[derive(Debug, Clone, PartialEq)]
pub struct RoutineBreakdown {
    pub label: String,
    pub sets_count: usize,
    pub total_reps: u64,
    pub avg_reps: Option<f64>,
    pub avg_weight_kg: Option<f64>,
}

/// Training recency relative to a given day
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TimeInsights {
    pub days_since_last_session: Option<i64>,
    pub sessions_this_week: usize,
    pub sessions_this_month: usize,
}

/// How many entries landed inside their optimal repetition range
#[derive(Debug, Clone, PartialEq)]
pub struct ComplianceRollup {
    pub above: usize,
    pub below: usize,
    pub in_range: usize,
    /// Entries whose classification is not [`Compliance::Unknown`]
    pub classifiable: usize,
    /// Share of classifiable entries in range, between 0 and 1
    pub in_range_ratio: f64,
}

/// The full dashboard
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardMetrics {
    pub summary: Summary,
    pub routines: Vec<RoutineBreakdown>,
    pub insights: TimeInsights,
    pub compliance: ComplianceRollup,
    pub latest: Vec<LogEntry>,
}

impl DashboardMetrics {
    pub fn compute(store: &SessionLogStore, catalog: &ExerciseCatalog, today: NaiveDate) -> Self {
        let entries = store.entries();
        log::debug!("Computing dashboard over {} entries", entries.len());

        DashboardMetrics {
            summary: summarize(entries),
            routines: routine_breakdown(entries, catalog),
            insights: time_insights(entries, today),
            compliance: compliance_rollup(entries, catalog),
            latest: latest_entries(entries, LATEST_ENTRIES)
                .into_iter()
                .cloned()
                .collect(),
        }
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

pub fn summarize(entries: &[LogEntry]) -> Summary {
    Summary {
        total_sessions: entries.len(),
        last_trained: entries.iter().map(|e| e.date).max(),
        max_weight_kg: entries
            .iter()
            .filter_map(|e| e.weight_kg)
            .fold(None, |best: Option<f64>, w| Some(best.map_or(w, |b| b.max(w)))),
        avg_reps: mean(entries.iter().filter_map(|e| e.reps).map(f64::from)),
        most_frequent_exercise: most_frequent_exercise(entries),
    }
}

/// Exercise with the most entries. Names are grouped case-insensitively and
/// reported with the spelling first seen; ties go to the first seen.
pub fn most_frequent_exercise(entries: &[LogEntry]) -> Option<String> {
    let mut order: Vec<(&str, usize)> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for entry in entries {
        let key = entry.exercise.trim().to_lowercase();
        if key.is_empty() {
            continue;
        }
        match positions.get(&key) {
            Some(&pos) => order[pos].1 += 1,
            None => {
                positions.insert(key, order.len());
                order.push((entry.exercise.trim(), 1));
            }
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (name, count) in order {
        if best.map_or(true, |(_, top)| count > top) {
            best = Some((name, count));
        }
    }
    best.map(|(name, _)| name.to_string())
}

/// One row per catalog routine, in catalog order, including empty ones
pub fn routine_breakdown(entries: &[LogEntry], catalog: &ExerciseCatalog) -> Vec<RoutineBreakdown> {
    catalog
        .labels()
        .map(|label| {
            let matching: Vec<&LogEntry> = entries
                .iter()
                .filter(|e| e.routine.as_deref() == Some(label))
                .collect();

            RoutineBreakdown {
                label: label.to_string(),
                sets_count: matching.len(),
                total_reps: matching.iter().filter_map(|e| e.reps).map(u64::from).sum(),
                avg_reps: mean(matching.iter().filter_map(|e| e.reps).map(f64::from)),
                avg_weight_kg: mean(matching.iter().filter_map(|e| e.weight_kg)),
            }
        })
        .collect()
}

/// Recency counts; weeks start on Monday
pub fn time_insights(entries: &[LogEntry], today: NaiveDate) -> TimeInsights {
    let week_start = today - Duration::days(today.weekday().num_days_from_monday() as i64);
    let week_end = week_start + Duration::days(6);

    TimeInsights {
        days_since_last_session: entries
            .iter()
            .map(|e| e.date)
            .max()
            .map(|last| (today - last).num_days()),
        sessions_this_week: entries
            .iter()
            .filter(|e| e.date >= week_start && e.date <= week_end)
            .count(),
        sessions_this_month: entries
            .iter()
            .filter(|e| e.date.year() == today.year() && e.date.month() == today.month())
            .count(),
    }
}

pub fn compliance_rollup(entries: &[LogEntry], catalog: &ExerciseCatalog) -> ComplianceRollup {
    let (mut above, mut below, mut in_range) = (0, 0, 0);
    for entry in entries {
        match classify_entry(entry, catalog) {
            Compliance::Above => above += 1,
            Compliance::Below => below += 1,
            Compliance::InRange => in_range += 1,
            Compliance::Unknown => {}
        }
    }

    let classifiable = above + below + in_range;
    let denominator = classifiable.max(1) as f64;

    ComplianceRollup {
        above,
        below,
        in_range,
        classifiable,
        in_range_ratio: 1.0 - (above + below) as f64 / denominator,
    }
}

/// The most recent `n` entries, newest first
pub fn latest_entries(entries: &[LogEntry], n: usize) -> Vec<&LogEntry> {
    entries.iter().rev().take(n).collect()
}
