//! Result records produced by the aggregation suite.
//!
//! `None` in any field means the statistic is unavailable for the table,
//! either because it has no rows or because the source never supplied the
//! underlying field.

use serde::Serialize;
use std::fmt;

/// Most frequent times of travel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeStats {
    /// Full month name, e.g. `"January"`.
    pub most_common_month: Option<String>,
    /// Full weekday name, e.g. `"Monday"`.
    pub most_common_day: Option<String>,
    /// Hour of day, `0..=23`.
    pub most_common_hour: Option<u32>,
}

/// An ordered (start, end) station pair. `A -> B` differs from `B -> A`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Journey {
    pub start: String,
    pub end: String,
}

impl fmt::Display for Journey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// Most popular stations and trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationStats {
    pub most_common_start: Option<String>,
    pub most_common_end: Option<String>,
    pub most_common_journey: Option<Journey>,
}

/// Total and mean trip duration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationStats {
    pub total_secs: f64,
    /// `floor(total_secs / 3600)`.
    pub total_hours: u64,
    pub mean_secs: Option<f64>,
    /// Mean in minutes, rounded to two decimals.
    pub mean_minutes: Option<f64>,
}

/// User type, gender and birth year breakdowns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserStats {
    pub user_types: Vec<(String, usize)>,
    pub genders: Option<Vec<(String, usize)>>,
    pub most_common_birth_year: Option<i32>,
    pub earliest_birth_year: Option<i32>,
    pub latest_birth_year: Option<i32>,
}

/// All four statistic blocks for one filtered table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub city: String,
    pub month: String,
    pub day: String,
    pub trips: usize,
    pub time: TimeStats,
    pub stations: StationStats,
    pub duration: DurationStats,
    pub users: UserStats,
}
