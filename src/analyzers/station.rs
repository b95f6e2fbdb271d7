use crate::analyzers::types::{Journey, StationStats};
use crate::analyzers::utility::FrequencyTable;
use crate::record::Table;

/// Most used start station, end station and (start, end) journey.
pub fn station_stats(table: &Table) -> StationStats {
    let starts: FrequencyTable<&str> = table.iter().map(|r| r.start_station.as_str()).collect();
    let ends: FrequencyTable<&str> = table.iter().map(|r| r.end_station.as_str()).collect();
    let journeys: FrequencyTable<(&str, &str)> = table
        .iter()
        .map(|r| (r.start_station.as_str(), r.end_station.as_str()))
        .collect();

    StationStats {
        most_common_start: starts.mode().map(|s| s.to_string()),
        most_common_end: ends.mode().map(|s| s.to_string()),
        most_common_journey: journeys.mode().map(|(start, end)| Journey {
            start: start.to_string(),
            end: end.to_string(),
        }),
    }
}
