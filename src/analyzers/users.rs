use crate::analyzers::types::UserStats;
use crate::analyzers::utility::FrequencyTable;
use crate::record::Table;

/// User type counts, plus gender and birth year statistics where available.
///
/// Gender and birth year are unavailable (`None`) when no record in the table
/// carries a value for them.
pub fn user_stats(table: &Table) -> UserStats {
    let user_types: FrequencyTable<&str> =
        table.iter().filter_map(|r| r.user_type.as_deref()).collect();
    let genders: FrequencyTable<&str> = table.iter().filter_map(|r| r.gender.as_deref()).collect();
    let birth_years: FrequencyTable<i32> = table.iter().filter_map(|r| r.birth_year).collect();

    let years = table.iter().filter_map(|r| r.birth_year);

    UserStats {
        user_types: owned_counts(&user_types),
        genders: (!genders.is_empty()).then(|| owned_counts(&genders)),
        most_common_birth_year: birth_years.mode().copied(),
        earliest_birth_year: years.clone().min(),
        latest_birth_year: years.max(),
    }
}

fn owned_counts(table: &FrequencyTable<&str>) -> Vec<(String, usize)> {
    table
        .counts()
        .into_iter()
        .map(|(k, n)| (k.to_string(), n))
        .collect()
}
