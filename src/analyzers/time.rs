use chrono::Timelike;

use crate::analyzers::types::TimeStats;
use crate::analyzers::utility::FrequencyTable;
use crate::record::{Table, month_name, weekday_name};

/// Most common month, day of week and start hour across the table.
pub fn time_stats(table: &Table) -> TimeStats {
    let months: FrequencyTable<u32> = table.iter().map(|r| r.month()).collect();
    let days: FrequencyTable<_> = table.iter().map(|r| r.weekday()).collect();
    let hours: FrequencyTable<u32> = table.iter().map(|r| r.start_time().hour()).collect();

    TimeStats {
        most_common_month: months
            .mode()
            .and_then(|m| month_name(*m))
            .map(str::to_string),
        most_common_day: days.mode().map(|d| weekday_name(*d).to_string()),
        most_common_hour: hours.mode().copied(),
    }
}
