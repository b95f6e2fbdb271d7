use crate::analyzers::types::DurationStats;
use crate::analyzers::utility::{mean, round2};
use crate::record::Table;

/// Total trip time in whole hours and mean trip time in minutes.
pub fn duration_stats(table: &Table) -> DurationStats {
    let durations: Vec<f64> = table.iter().map(|r| r.duration_secs).collect();
    let total_secs: f64 = durations.iter().sum();
    let mean_secs = mean(&durations);

    DurationStats {
        total_secs,
        total_hours: (total_secs / 3600.0).floor() as u64,
        mean_secs,
        mean_minutes: mean_secs.map(|s| round2(s / 60.0)),
    }
}
