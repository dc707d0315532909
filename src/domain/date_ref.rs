//! Training date references

use crate::error::{GymlogError, Result};
use chrono::{Datelike, Duration, NaiveDate, Weekday};

const DATE_FORMATS: [&str; 3] = ["%d/%m/%Y", "%Y-%m-%d", "%d-%m-%Y"];

/// A user-supplied date for a workout. Workouts are logged after the fact, so
/// weekday names always point backwards in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateReference {
    Today,
    Yesterday,
    /// Most recent occurrence of a weekday, today included
    Weekday(Weekday),
    /// Occurrence of a weekday strictly before today
    LastWeekday(Weekday),
    Specific(NaiveDate),
}

fn parse_weekday(name: &str) -> Option<Weekday> {
    let weekday = match name {
        "monday" | "lunes" => Weekday::Mon,
        "tuesday" | "martes" => Weekday::Tue,
        "wednesday" | "miércoles" | "miercoles" => Weekday::Wed,
        "thursday" | "jueves" => Weekday::Thu,
        "friday" | "viernes" => Weekday::Fri,
        "saturday" | "sábado" | "sabado" => Weekday::Sat,
        "sunday" | "domingo" => Weekday::Sun,
        _ => return None,
    };
    Some(weekday)
}

impl DateReference {
    /// Parse a date reference; English and Spanish day words are accepted
    pub fn parse(input: &str) -> Result<Self> {
        let normalized = input.trim().to_lowercase();

        match normalized.as_str() {
            "today" | "hoy" => return Ok(DateReference::Today),
            "yesterday" | "ayer" => return Ok(DateReference::Yesterday),
            _ => {}
        }

        if let Some(weekday) = parse_weekday(&normalized) {
            return Ok(DateReference::Weekday(weekday));
        }

        if let Some(rest) = normalized.strip_prefix("last ") {
            return parse_weekday(rest.trim())
                .map(DateReference::LastWeekday)
                .ok_or_else(|| GymlogError::InvalidDate(input.to_string()));
        }

        DATE_FORMATS
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(&normalized, format).ok())
            .map(DateReference::Specific)
            .ok_or_else(|| GymlogError::InvalidDate(input.to_string()))
    }

    /// Resolve against the given "today"
    pub fn resolve(&self, today: NaiveDate) -> NaiveDate {
        match self {
            DateReference::Today => today,
            DateReference::Yesterday => today - Duration::days(1),
            DateReference::Weekday(target) => today - Duration::days(days_back(today, *target)),
            DateReference::LastWeekday(target) => {
                let back = match days_back(today, *target) {
                    0 => 7,
                    n => n,
                };
                today - Duration::days(back)
            }
            DateReference::Specific(date) => *date,
        }
    }
}

fn days_back(today: NaiveDate, target: Weekday) -> i64 {
    ((today.weekday().num_days_from_monday() + 7 - target.num_days_from_monday()) % 7) as i64
}
