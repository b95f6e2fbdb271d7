//! Descriptive statistics over a filtered trip table.
//!
//! Each aggregation is a pure function from a [`Table`] to a small result
//! record. Modes are computed with a single pass into a [`utility::FrequencyTable`]
//! and ties go to the value seen first in table order.

pub mod duration;
pub mod station;
pub mod time;
pub mod timing;
pub mod types;
pub mod users;
pub mod utility;

pub use duration::duration_stats;
pub use station::station_stats;
pub use time::time_stats;
pub use timing::{Timed, timed};
pub use users::user_stats;

use crate::filter::FilterSpec;
use crate::record::Table;
use types::Report;

/// Runs all four aggregations over `table`, timing each one.
pub fn build_report(spec: &FilterSpec, table: &Table) -> Report {
    Report {
        city: spec.city.to_string(),
        month: spec.month.to_string(),
        day: spec.day.to_string(),
        trips: table.len(),
        time: timed("time", || time_stats(table)).value,
        stations: timed("stations", || station_stats(table)).value,
        duration: timed("duration", || duration_stats(table)).value,
        users: timed("users", || user_stats(table)).value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::test_support::trip;

    #[test]
    fn test_build_report() {
        let spec = FilterSpec::parse("chicago", "all", "all").unwrap();
        let table = Table::new(vec![
            trip("2017-01-01 09:00:00", 1800.0, "A", "B"),
            trip("2017-01-02 09:00:00", 5400.0, "A", "B"),
        ]);

        let report = build_report(&spec, &table);
        assert_eq!(report.city, "Chicago");
        assert_eq!(report.month, "all");
        assert_eq!(report.trips, 2);
        assert_eq!(report.time.most_common_month.as_deref(), Some("January"));
        assert_eq!(report.duration.total_hours, 2);
        assert_eq!(report.duration.mean_minutes, Some(60.0));
    }

    #[test]
    fn test_build_report_empty_table() {
        let spec = FilterSpec::parse("washington", "march", "sunday").unwrap();
        let report = build_report(&spec, &Table::default());
        assert_eq!(report.trips, 0);
        assert_eq!(report.month, "March");
        assert_eq!(report.day, "Sunday");
        assert_eq!(report.stations.most_common_journey, None);
    }
}
