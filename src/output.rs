//! Output formatting for statistics and raw trip rows.
//!
//! Statistic blocks render as plain text through their `Display` impls;
//! reports and raw rows also render as pretty JSON.

use std::fmt;
use std::time::Duration;

use anyhow::Result;
use serde::Serialize;

use crate::analyzers::types::{DurationStats, Report, StationStats, TimeStats, UserStats};
use crate::loader::TIMESTAMP_FORMAT;
use crate::record::{TripRecord, weekday_name};

/// Horizontal rule printed between statistic blocks.
pub const RULE: &str = "----------------------------------------";

/// A trip row as shown to users when paging through raw data.
#[derive(Debug, Serialize)]
pub struct RawRow<'a> {
    #[serde(rename = "Start Time")]
    pub start_time: String,
    #[serde(rename = "End Time")]
    pub end_time: Option<&'a str>,
    #[serde(rename = "Trip Duration")]
    pub trip_duration: f64,
    #[serde(rename = "Start Station")]
    pub start_station: &'a str,
    #[serde(rename = "End Station")]
    pub end_station: &'a str,
    #[serde(rename = "User Type")]
    pub user_type: Option<&'a str>,
    #[serde(rename = "Gender", skip_serializing_if = "Option::is_none")]
    pub gender: Option<&'a str>,
    #[serde(rename = "Birth Year", skip_serializing_if = "Option::is_none")]
    pub birth_year: Option<i32>,
    pub month: u32,
    pub day_of_week: &'static str,
}

impl<'a> From<&'a TripRecord> for RawRow<'a> {
    fn from(r: &'a TripRecord) -> Self {
        RawRow {
            start_time: r.start_time().format(TIMESTAMP_FORMAT).to_string(),
            end_time: r.end_time.as_deref(),
            trip_duration: r.duration_secs,
            start_station: &r.start_station,
            end_station: &r.end_station,
            user_type: r.user_type.as_deref(),
            gender: r.gender.as_deref(),
            birth_year: r.birth_year,
            month: r.month(),
            day_of_week: weekday_name(r.weekday()),
        }
    }
}

/// Renders a page of raw rows, one pretty JSON object per row.
pub fn render_page(rows: &[TripRecord]) -> Result<String> {
    let mut out = String::new();
    for row in rows {
        out.push_str(&serde_json::to_string_pretty(&RawRow::from(row))?);
        out.push('\n');
    }
    Ok(out)
}

/// Renders a full report as pretty JSON.
pub fn render_json(report: &Report) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

fn or_unavailable<T: ToString>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| "no data available".to_string())
}

/// Writes a titled `label count` listing, or `missing` when there is nothing to list.
fn write_counts(
    f: &mut fmt::Formatter<'_>,
    title: &str,
    counts: Option<&[(String, usize)]>,
    missing: &str,
) -> fmt::Result {
    match counts {
        Some(counts) if !counts.is_empty() => {
            writeln!(f, "{title}")?;
            for (label, count) in counts {
                writeln!(f, "{label:<20}{count:>8}")?;
            }
            Ok(())
        }
        _ => writeln!(f, "{missing}"),
    }
}

fn write_birth_year(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    missing: &str,
    year: Option<i32>,
) -> fmt::Result {
    match year {
        Some(year) => writeln!(f, "{label}: {year}"),
        None => writeln!(f, "{missing}"),
    }
}

impl fmt::Display for TimeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Most Common Month of travel: {}",
            or_unavailable(self.most_common_month.as_deref())
        )?;
        writeln!(
            f,
            "Most Common Day of Travel: {}",
            or_unavailable(self.most_common_day.as_deref())
        )?;
        writeln!(
            f,
            "Most Popular Start Hour: {}",
            or_unavailable(self.most_common_hour)
        )
    }
}

impl fmt::Display for StationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Most Popular Start Station: {}",
            or_unavailable(self.most_common_start.as_deref())
        )?;
        writeln!(
            f,
            "Most Popular End Station: {}",
            or_unavailable(self.most_common_end.as_deref())
        )?;
        writeln!(
            f,
            "Most Popular Journey: {}",
            or_unavailable(self.most_common_journey.as_ref())
        )
    }
}

impl fmt::Display for DurationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total Travel Time: {} hours", self.total_hours)?;
        match self.mean_minutes {
            Some(minutes) => writeln!(f, "Average travel time: {minutes:.2} minutes"),
            None => writeln!(f, "Average travel time: no data available"),
        }
    }
}

impl fmt::Display for UserStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_counts(
            f,
            "User Type",
            Some(self.user_types.as_slice()),
            "No user type data available",
        )?;
        write_counts(
            f,
            "Gender",
            self.genders.as_deref(),
            "No gender data available",
        )?;
        write_birth_year(
            f,
            "Most Common Birth Year",
            "No Common Birth Year data available",
            self.most_common_birth_year,
        )?;
        write_birth_year(
            f,
            "Earliest Birth Year",
            "No Earliest Birth Year data available",
            self.earliest_birth_year,
        )?;
        write_birth_year(
            f,
            "Latest Birth Year",
            "No Latest Birth Year data available",
            self.latest_birth_year,
        )
    }
}

/// All four blocks, separated by [`RULE`], without timings.
impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} trips for {} (month: {}, day: {})",
            self.trips, self.city, self.month, self.day
        )?;
        writeln!(f, "{RULE}")?;
        write!(f, "{}", self.time)?;
        writeln!(f, "{RULE}")?;
        write!(f, "{}", self.stations)?;
        writeln!(f, "{RULE}")?;
        write!(f, "{}", self.duration)?;
        writeln!(f, "{RULE}")?;
        write!(f, "{}", self.users)?;
        writeln!(f, "{RULE}")
    }
}

/// The closing line of each statistic block.
pub fn render_elapsed(elapsed: Duration) -> String {
    format!("This took {} seconds.", elapsed.as_secs_f64())
}
