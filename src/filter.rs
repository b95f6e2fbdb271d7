//! Month and day-of-week filtering over a loaded [`Table`].

use std::fmt;
use std::str::FromStr;

use chrono::Weekday;
use tracing::debug;

use crate::error::{BikeshareError, Result};
use crate::record::{Table, TripRecord, month_name, weekday_name};
use crate::registry::City;

/// Months a filter may select, in calendar order.
pub const FILTER_MONTHS: [&str; 6] = ["january", "february", "march", "april", "may", "june"];

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// Month selector: everything, or a single month between January and June.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthFilter {
    All,
    /// 1-based month of year, always within `1..=6`.
    Month(u32),
}

impl MonthFilter {
    fn matches(self, record: &TripRecord) -> bool {
        match self {
            MonthFilter::All => true,
            MonthFilter::Month(m) => record.month() == m,
        }
    }
}

impl FromStr for MonthFilter {
    type Err = BikeshareError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        if wanted == "all" {
            return Ok(MonthFilter::All);
        }
        FILTER_MONTHS
            .iter()
            .position(|m| *m == wanted)
            .map(|idx| MonthFilter::Month(idx as u32 + 1))
            .ok_or_else(|| BikeshareError::UnknownMonth(s.to_string()))
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthFilter::All => f.write_str("all"),
            MonthFilter::Month(m) => f.write_str(month_name(*m).unwrap_or("?")),
        }
    }
}

/// Day selector: every day, or a single weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayFilter {
    All,
    Day(Weekday),
}

impl DayFilter {
    fn matches(self, record: &TripRecord) -> bool {
        match self {
            DayFilter::All => true,
            DayFilter::Day(d) => record.weekday() == d,
        }
    }
}

impl FromStr for DayFilter {
    type Err = BikeshareError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        if wanted == "all" {
            return Ok(DayFilter::All);
        }
        WEEKDAYS
            .into_iter()
            .find(|d| weekday_name(*d).to_lowercase() == wanted)
            .map(DayFilter::Day)
            .ok_or_else(|| BikeshareError::UnknownDay(s.to_string()))
    }
}

impl fmt::Display for DayFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayFilter::All => f.write_str("all"),
            DayFilter::Day(d) => f.write_str(weekday_name(*d)),
        }
    }
}

/// A validated city, month and day selection for one load-and-filter cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSpec {
    pub city: City,
    pub month: MonthFilter,
    pub day: DayFilter,
}

impl FilterSpec {
    /// Parses the three selectors, case-insensitively.
    pub fn parse(city: &str, month: &str, day: &str) -> Result<Self> {
        Ok(FilterSpec {
            city: city.parse()?,
            month: month.parse()?,
            day: day.parse()?,
        })
    }

    pub fn apply(&self, table: &Table) -> Table {
        filter(table, self.month, self.day)
    }
}

/// Returns the records matching both selectors, in their original order.
///
/// The input table is left untouched. An empty result is a valid outcome.
pub fn filter(table: &Table, month: MonthFilter, day: DayFilter) -> Table {
    let records: Vec<TripRecord> = table
        .iter()
        .filter(|r| month.matches(r) && day.matches(r))
        .cloned()
        .collect();

    debug!(
        %month,
        %day,
        before = table.len(),
        after = records.len(),
        "Table filtered"
    );

    Table::new(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::test_support::trip;

    fn sample() -> Table {
        Table::new(vec![
            // Sunday
            trip("2017-01-01 09:00:00", 100.0, "A", "B"),
            // Monday
            trip("2017-01-02 10:00:00", 200.0, "B", "C"),
            // Wednesday
            trip("2017-02-01 11:00:00", 300.0, "C", "A"),
            // Monday
            trip("2017-02-06 12:00:00", 400.0, "A", "C"),
            // Monday
            trip("2017-06-05 13:00:00", 500.0, "A", "B"),
        ])
    }

    #[test]
    fn test_month_filter_parse() {
        assert_eq!("all".parse::<MonthFilter>().unwrap(), MonthFilter::All);
        assert_eq!("January".parse::<MonthFilter>().unwrap(), MonthFilter::Month(1));
        assert_eq!("june".parse::<MonthFilter>().unwrap(), MonthFilter::Month(6));
        assert!("july".parse::<MonthFilter>().is_err());
    }

    #[test]
    fn test_day_filter_parse() {
        assert_eq!("ALL".parse::<DayFilter>().unwrap(), DayFilter::All);
        assert_eq!("monday".parse::<DayFilter>().unwrap(), DayFilter::Day(Weekday::Mon));
        assert_eq!("Sunday".parse::<DayFilter>().unwrap(), DayFilter::Day(Weekday::Sun));
        assert!("mon".parse::<DayFilter>().is_err());
    }

    #[test]
    fn test_filter_all_returns_input() {
        let table = sample();
        assert_eq!(filter(&table, MonthFilter::All, DayFilter::All), table);
    }

    #[test]
    fn test_filter_by_month() {
        let out = filter(&sample(), MonthFilter::Month(2), DayFilter::All);
        let durations: Vec<f64> = out.iter().map(|r| r.duration_secs).collect();
        assert_eq!(durations, vec![300.0, 400.0]);
    }

    #[test]
    fn test_filter_by_day() {
        let out = filter(&sample(), MonthFilter::All, DayFilter::Day(Weekday::Mon));
        let durations: Vec<f64> = out.iter().map(|r| r.duration_secs).collect();
        assert_eq!(durations, vec![200.0, 400.0, 500.0]);
    }

    #[test]
    fn test_filter_month_and_day_compose() {
        let out = filter(&sample(), MonthFilter::Month(1), DayFilter::Day(Weekday::Mon));
        assert_eq!(out.len(), 1);
        assert_eq!(out.records()[0].duration_secs, 200.0);
    }

    #[test]
    fn test_filter_no_match_is_empty() {
        let out = filter(&sample(), MonthFilter::Month(3), DayFilter::All);
        assert!(out.is_empty());
    }

    #[test]
    fn test_filter_is_idempotent() {
        let once = filter(&sample(), MonthFilter::Month(2), DayFilter::Day(Weekday::Mon));
        let twice = filter(&once, MonthFilter::Month(2), DayFilter::Day(Weekday::Mon));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_filter_agrees_with_start_time() {
        use chrono::Datelike;

        let table = sample();
        for m in 1..=6 {
            let out = filter(&table, MonthFilter::Month(m), DayFilter::All);
            let expected: Vec<&TripRecord> =
                table.iter().filter(|r| r.start_time().month() == m).collect();
            assert_eq!(out.iter().collect::<Vec<_>>(), expected, "month {m}");
        }
        for day in WEEKDAYS {
            let out = filter(&table, MonthFilter::All, DayFilter::Day(day));
            assert!(out.iter().all(|r| r.start_time().weekday() == day));
        }
    }

    #[test]
    fn test_filter_spec_parse() {
        let spec = FilterSpec::parse("New York", "March", "friday").unwrap();
        assert_eq!(spec.city, City::NewYork);
        assert_eq!(spec.month, MonthFilter::Month(3));
        assert_eq!(spec.day, DayFilter::Day(Weekday::Fri));
        assert!(FilterSpec::parse("boston", "all", "all").is_err());
    }
}
