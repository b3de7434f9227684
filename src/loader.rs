//! CSV loading and month/weekday filtering of trip records.

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{ExploreError, Result};
use crate::filter::{DayFilter, MonthFilter};
use crate::registry::{City, DatasetRegistry};

pub const START_TIME: &str = "Start Time";
pub const END_TIME: &str = "End Time";
pub const TRIP_DURATION: &str = "Trip Duration";
pub const START_STATION: &str = "Start Station";
pub const END_STATION: &str = "End Station";
pub const USER_TYPE: &str = "User Type";
pub const GENDER: &str = "Gender";
pub const BIRTH_YEAR: &str = "Birth Year";

const REQUIRED_COLUMNS: [&str; 5] = [
    START_TIME,
    TRIP_DURATION,
    START_STATION,
    END_STATION,
    USER_TYPE,
];

/// Layouts the published exports have used for `Start Time`.
const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// What to do with a row whose start timestamp cannot be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimestampPolicy {
    /// Fail the whole load.
    #[default]
    Reject,
    /// Drop the row and keep going.
    Skip,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LoadOptions {
    pub timestamps: TimestampPolicy,
}

/// Optional columns whose presence changes which statistics are available.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionalColumn {
    Gender,
    BirthYear,
}

/// Which optional columns the source file carried.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Schema {
    pub has_end_time: bool,
    pub has_gender: bool,
    pub has_birth_year: bool,
}

impl Schema {
    fn from_headers(headers: &csv::StringRecord) -> Self {
        let has = |name: &str| headers.iter().any(|h| h == name);
        Self {
            has_end_time: has(END_TIME),
            has_gender: has(GENDER),
            has_birth_year: has(BIRTH_YEAR),
        }
    }
}

/// One trip with its calendar fields derived from the start timestamp.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripRecord {
    /// Row label from the source file's unnamed index column, or the row position.
    pub index: usize,
    pub start_time: NaiveDateTime,
    pub end_time: Option<String>,
    /// Seconds.
    pub trip_duration: f64,
    pub start_station: String,
    pub end_station: String,
    pub user_type: Option<String>,
    pub gender: Option<String>,
    pub birth_year: Option<f64>,
    pub month: u32,
    pub day_of_week: Weekday,
    pub hour: u32,
}

/// Row shape as it appears in the CSV, before timestamp parsing.
#[derive(Debug, Deserialize)]
struct RawTrip {
    #[serde(rename = "Start Time", default)]
    start_time: Option<String>,
    #[serde(rename = "End Time", default)]
    end_time: Option<String>,
    #[serde(rename = "Trip Duration")]
    trip_duration: f64,
    #[serde(rename = "Start Station")]
    start_station: String,
    #[serde(rename = "End Station")]
    end_station: String,
    #[serde(rename = "User Type", default)]
    user_type: Option<String>,
    #[serde(rename = "Gender", default)]
    gender: Option<String>,
    #[serde(rename = "Birth Year", default)]
    birth_year: Option<f64>,
}

/// An ordered set of trips owned by one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct TripTable {
    pub source: PathBuf,
    pub schema: Schema,
    pub records: Vec<TripRecord>,
}

impl TripTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_column(&self, column: OptionalColumn) -> bool {
        match column {
            OptionalColumn::Gender => self.schema.has_gender,
            OptionalColumn::BirthYear => self.schema.has_birth_year,
        }
    }

    /// Keeps only the rows matching both filters, preserving their order.
    pub fn filter(mut self, month: MonthFilter, day: DayFilter) -> Self {
        let before = self.records.len();
        self.records
            .retain(|r| month.matches(r.month) && day.matches(r.day_of_week));
        debug!(
            before,
            after = self.records.len(),
            %month,
            %day,
            "Applied filters"
        );
        self
    }

    /// Like [`TripTable::filter`] but leaves `self` untouched.
    pub fn filtered(&self, month: MonthFilter, day: DayFilter) -> Self {
        self.clone().filter(month, day)
    }
}

/// Resolves `city`, reads its whole file and applies the month/day filters.
#[tracing::instrument(skip_all, fields(city = %city, month = %month, day = %day))]
pub fn load_and_filter(
    registry: &DatasetRegistry,
    city: City,
    month: MonthFilter,
    day: DayFilter,
    options: LoadOptions,
) -> Result<TripTable> {
    let path = registry.resolve(city);
    let table = load_table(&path, options)?.filter(month, day);
    info!(rows = table.len(), source = %path.display(), "Loaded trips");
    Ok(table)
}

/// Reads every row of the CSV at `path`.
pub fn load_table(path: &Path, options: LoadOptions) -> Result<TripTable> {
    let reader = csv::Reader::from_path(path).map_err(|source| ExploreError::SourceUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    read_csv(reader, path, options)
}

/// Reads CSV text from any reader; `source` is only used to label errors.
pub fn read_table<R: Read>(reader: R, source: &Path, options: LoadOptions) -> Result<TripTable> {
    read_csv(csv::Reader::from_reader(reader), source, options)
}

fn read_csv<R: Read>(
    mut reader: csv::Reader<R>,
    source: &Path,
    options: LoadOptions,
) -> Result<TripTable> {
    let unreadable = |source_err: csv::Error| ExploreError::SourceUnreadable {
        path: source.to_path_buf(),
        source: source_err,
    };

    let headers = reader.headers().map_err(unreadable)?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(ExploreError::MissingColumn {
                path: source.to_path_buf(),
                column,
            });
        }
    }
    let schema = Schema::from_headers(&headers);
    let index_column = headers
        .get(0)
        .filter(|h| h.is_empty() || h.starts_with("Unnamed"))
        .map(|_| 0);

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for (position, result) in reader.records().enumerate() {
        let row = result.map_err(unreadable)?;
        let line = row
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(position + 2);
        let raw: RawTrip = row.deserialize(Some(&headers)).map_err(unreadable)?;

        let stamp = raw.start_time.as_deref().unwrap_or("").trim();
        let Some(start_time) = parse_timestamp(stamp) else {
            match options.timestamps {
                TimestampPolicy::Reject => {
                    return Err(ExploreError::MalformedTimestamp {
                        path: source.to_path_buf(),
                        line,
                        value: stamp.to_string(),
                    });
                }
                TimestampPolicy::Skip => {
                    warn!(line, value = stamp, "Skipping row with malformed start timestamp");
                    skipped += 1;
                    continue;
                }
            }
        };

        let index = index_column
            .and_then(|i| row.get(i))
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(position);

        records.push(TripRecord {
            index,
            start_time,
            end_time: raw.end_time,
            trip_duration: raw.trip_duration,
            start_station: raw.start_station,
            end_station: raw.end_station,
            user_type: non_empty(raw.user_type),
            gender: non_empty(raw.gender),
            birth_year: raw.birth_year,
            month: start_time.month(),
            day_of_week: start_time.weekday(),
            hour: start_time.hour(),
        });
    }

    if skipped > 0 {
        warn!(skipped, source = %source.display(), "Dropped rows with malformed start timestamps");
    }
    debug!(rows = records.len(), ?schema, "Read trip table");

    Ok(TripTable {
        source: source.to_path_buf(),
        schema,
        records,
    })
}

/// Parses a start timestamp in any of the known export layouts.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
