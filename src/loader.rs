//! CSV loader for city trip files.
//!
//! Columns are located by header name, so extra columns such as an unnamed
//! leading index are ignored. The load fails as a whole on the first row with
//! a missing or unparseable required value.

use std::io::Read;
use std::path::Path;

use chrono::NaiveDateTime;
use csv::StringRecord;
use tracing::{debug, warn};

use crate::error::{BikeshareError, Result};
use crate::record::{Table, TripRecord};

/// Format of the `Start Time` column, e.g. `2017-01-01 00:07:57`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const START_TIME: &str = "Start Time";
const END_TIME: &str = "End Time";
const TRIP_DURATION: &str = "Trip Duration";
const START_STATION: &str = "Start Station";
const END_STATION: &str = "End Station";
const USER_TYPE: &str = "User Type";
const GENDER: &str = "Gender";
const BIRTH_YEAR: &str = "Birth Year";

/// Positions of the known columns within a source's header row.
struct Columns {
    start_time: usize,
    end_time: Option<usize>,
    duration: usize,
    start_station: usize,
    end_station: usize,
    user_type: usize,
    gender: Option<usize>,
    birth_year: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord, path: &Path) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);
        let require = |name: &str| {
            find(name)
                .ok_or_else(|| BikeshareError::malformed(path, format!("missing column '{name}'")))
        };

        Ok(Columns {
            start_time: require(START_TIME)?,
            end_time: find(END_TIME),
            duration: require(TRIP_DURATION)?,
            start_station: require(START_STATION)?,
            end_station: require(END_STATION)?,
            user_type: require(USER_TYPE)?,
            gender: find(GENDER),
            birth_year: find(BIRTH_YEAR),
        })
    }
}

/// Reads a city's trip file into a [`Table`].
///
/// # Errors
///
/// Returns [`BikeshareError::SourceUnreadable`] if the file cannot be opened
/// and [`BikeshareError::MalformedSource`] if a required column is absent or
/// any row has a missing or unparseable start time, duration or station.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn load(path: &Path) -> Result<Table> {
    let reader = csv::Reader::from_path(path).map_err(|source| BikeshareError::SourceUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    read_table(reader, path)
}

/// Reads trips from any CSV byte source. `path` is only used in errors.
pub fn load_from_reader<R: Read>(source: R, path: &Path) -> Result<Table> {
    read_table(csv::Reader::from_reader(source), path)
}

fn read_table<R: Read>(mut reader: csv::Reader<R>, path: &Path) -> Result<Table> {
    let headers = reader
        .headers()
        .map_err(|e| read_error(e, path, "unreadable header"))?
        .clone();
    let columns = Columns::from_headers(&headers, path)?;

    debug!(
        has_gender = columns.gender.is_some(),
        has_birth_year = columns.birth_year.is_some(),
        "Source columns resolved"
    );

    let mut records = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let row = idx + 1;
        let record = result.map_err(|e| read_error(e, path, &format!("row {row}")))?;
        records.push(parse_row(&record, &columns, row, path)?);
    }

    debug!(rows = records.len(), "Source loaded");
    Ok(Table::new(records))
}

/// I/O failures mean the source could not be read at all; anything else is bad CSV.
fn read_error(err: csv::Error, path: &Path, context: &str) -> BikeshareError {
    if err.is_io_error() {
        BikeshareError::SourceUnreadable {
            path: path.to_path_buf(),
            source: err,
        }
    } else {
        BikeshareError::malformed(path, format!("{context}: {err}"))
    }
}

fn parse_row(
    record: &StringRecord,
    columns: &Columns,
    row: usize,
    path: &Path,
) -> Result<TripRecord> {
    let required = |idx: usize, name: &str| required_field(record, idx, name, row, path);
    let optional = |idx: Option<usize>| optional_field(record, idx);

    let raw_start = required(columns.start_time, START_TIME)?;
    let start_time = NaiveDateTime::parse_from_str(raw_start, TIMESTAMP_FORMAT).map_err(|e| {
        let reason = format!("row {row}: bad '{START_TIME}' {raw_start:?}: {e}");
        BikeshareError::malformed(path, reason)
    })?;

    let raw_duration = required(columns.duration, TRIP_DURATION)?;
    let duration_secs = raw_duration
        .parse::<f64>()
        .ok()
        .filter(|d| d.is_finite() && *d >= 0.0)
        .ok_or_else(|| {
            let reason = format!("row {row}: bad '{TRIP_DURATION}' {raw_duration:?}");
            BikeshareError::malformed(path, reason)
        })?;

    let start_station = required(columns.start_station, START_STATION)?.to_string();
    let end_station = required(columns.end_station, END_STATION)?.to_string();

    let birth_year = optional(columns.birth_year).and_then(|raw| {
        let parsed = parse_birth_year(raw);
        if parsed.is_none() {
            warn!(row, value = raw, "Unparseable birth year, treating as absent");
        }
        parsed
    });

    Ok(TripRecord::new(
        start_time,
        optional(columns.end_time).map(str::to_string),
        duration_secs,
        start_station,
        end_station,
        optional(Some(columns.user_type)).map(str::to_string),
        optional(columns.gender).map(str::to_string),
        birth_year,
    ))
}

fn required_field<'r>(
    record: &'r StringRecord,
    idx: usize,
    name: &str,
    row: usize,
    path: &Path,
) -> Result<&'r str> {
    optional_field(record, Some(idx))
        .ok_or_else(|| BikeshareError::malformed(path, format!("row {row}: missing '{name}'")))
}

fn optional_field(record: &StringRecord, idx: Option<usize>) -> Option<&str> {
    idx.and_then(|i| record.get(i))
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Birth years are written as floats (`1992.0`) in some sources.
fn parse_birth_year(raw: &str) -> Option<i32> {
    raw.parse::<f64>()
        .ok()
        .filter(|y| y.is_finite() && *y >= 0.0 && *y <= f64::from(i32::MAX))
        .map(|y| y.trunc() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;
    use std::io::Write;

    fn load_str(content: &str) -> Result<Table> {
        load_from_reader(content.as_bytes(), Path::new("test.csv"))
    }

    const CHICAGO_HEADER: &str =
        ",Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year\n";

    #[test]
    fn test_load_parses_and_derives_fields() {
        let csv = format!(
            "{CHICAGO_HEADER}1423854,2017-06-23 15:09:32,2017-06-23 15:14:53,321,Wood St & Hubbard St,Damen Ave & Chicago Ave,Subscriber,Male,1992.0\n"
        );
        let table = load_str(&csv).unwrap();

        assert_eq!(table.len(), 1);
        let trip = &table.records()[0];
        assert_eq!(trip.month(), 6);
        assert_eq!(trip.weekday(), Weekday::Fri);
        assert_eq!(trip.duration_secs, 321.0);
        assert_eq!(trip.start_station, "Wood St & Hubbard St");
        assert_eq!(trip.end_station, "Damen Ave & Chicago Ave");
        assert_eq!(trip.end_time.as_deref(), Some("2017-06-23 15:14:53"));
        assert_eq!(trip.user_type.as_deref(), Some("Subscriber"));
        assert_eq!(trip.gender.as_deref(), Some("Male"));
        assert_eq!(trip.birth_year, Some(1992));
    }

    #[test]
    fn test_load_without_optional_columns() {
        let csv = ",Start Time,End Time,Trip Duration,Start Station,End Station,User Type\n\
                   0,2017-03-01 08:00:00,2017-03-01 08:10:00,489.066,14th & Belmont St NW,15th & K St NW,Customer\n";
        let table = load_str(csv).unwrap();

        let trip = &table.records()[0];
        assert_eq!(trip.gender, None);
        assert_eq!(trip.birth_year, None);
        assert!((trip.duration_secs - 489.066).abs() < 1e-9);
    }

    #[test]
    fn test_bad_optional_value_degrades_to_absent() {
        let csv = format!(
            "{CHICAGO_HEADER}1,2017-01-02 10:00:00,2017-01-02 10:05:00,300,A,B,Subscriber,,unknown\n"
        );
        let table = load_str(&csv).unwrap();

        let trip = &table.records()[0];
        assert_eq!(trip.gender, None);
        assert_eq!(trip.birth_year, None);
    }

    #[test]
    fn test_missing_required_column_fails() {
        let csv = "Start Time,End Time,Start Station,End Station,User Type\n\
                   2017-01-02 10:00:00,2017-01-02 10:05:00,A,B,Subscriber\n";
        let err = load_str(csv).unwrap_err();
        assert!(err.to_string().contains("missing column 'Trip Duration'"));
    }

    #[test]
    fn test_unparseable_start_time_fails_whole_load() {
        let csv = format!(
            "{CHICAGO_HEADER}1,2017-01-02 10:00:00,x,300,A,B,Subscriber,Male,1980\n\
             2,02/01/2017 10:00,x,300,A,B,Subscriber,Male,1980\n"
        );
        let err = load_str(&csv).unwrap_err();
        assert!(matches!(err, BikeshareError::MalformedSource { .. }));
        assert!(err.to_string().contains("row 2"));
    }

    #[test]
    fn test_empty_station_fails() {
        let csv = format!("{CHICAGO_HEADER}1,2017-01-02 10:00:00,x,300,,B,Subscriber,Male,1980\n");
        let err = load_str(&csv).unwrap_err();
        assert!(err.to_string().contains("missing 'Start Station'"));
    }

    #[test]
    fn test_negative_duration_fails() {
        let csv = format!("{CHICAGO_HEADER}1,2017-01-02 10:00:00,x,-5,A,B,Subscriber,Male,1980\n");
        assert!(load_str(&csv).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "{CHICAGO_HEADER}1,2017-02-14 18:30:00,x,600,A,B,Customer,Female,1975.0\n"
        )
        .unwrap();

        let table = load(file.path()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.records()[0].weekday(), Weekday::Tue);
    }

    #[test]
    fn test_load_directory_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(dir.path()).unwrap_err();
        assert!(matches!(err, BikeshareError::SourceUnreadable { .. }), "{err}");
    }

    #[test]
    fn test_reader_failure_is_unreadable() {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("disk gone"))
            }
        }

        let err = load_from_reader(Broken, Path::new("broken.csv")).unwrap_err();
        assert!(matches!(err, BikeshareError::SourceUnreadable { .. }));
    }

    #[test]
    fn test_ragged_row_is_malformed() {
        let csv = format!("{CHICAGO_HEADER}1,2017-01-02 10:00:00,x,300\n");
        let err = load_str(&csv).unwrap_err();
        assert!(matches!(err, BikeshareError::MalformedSource { .. }));
        assert!(err.to_string().contains("row 1"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load(Path::new("/nonexistent/dir/chicago.csv")).unwrap_err();
        assert!(matches!(err, BikeshareError::SourceUnreadable { .. }));
    }

    #[test]
    fn test_parse_birth_year() {
        assert_eq!(parse_birth_year("1992.0"), Some(1992));
        assert_eq!(parse_birth_year("1985"), Some(1985));
        assert_eq!(parse_birth_year("NaN"), None);
        assert_eq!(parse_birth_year("abc"), None);
    }
}
