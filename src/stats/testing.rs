//! Trip and table builders shared by the statistics tests.

use chrono::{Datelike, Timelike};
use std::path::PathBuf;

use crate::loader::{Schema, TripRecord, TripTable, parse_timestamp};

pub fn trip(start: &str) -> TripRecord {
    let start_time = parse_timestamp(start).unwrap();
    TripRecord {
        index: 0,
        start_time,
        end_time: None,
        trip_duration: 600.0,
        start_station: "Canal St & Adams St".to_string(),
        end_station: "Clinton St & Madison St".to_string(),
        user_type: Some("Subscriber".to_string()),
        gender: None,
        birth_year: None,
        month: start_time.month(),
        day_of_week: start_time.weekday(),
        hour: start_time.hour(),
    }
}

pub fn trip_between(start: &str, end: &str) -> TripRecord {
    TripRecord {
        start_station: start.to_string(),
        end_station: end.to_string(),
        ..trip("2017-01-02 08:00:00")
    }
}

pub fn trip_lasting(seconds: f64) -> TripRecord {
    TripRecord {
        trip_duration: seconds,
        ..trip("2017-01-02 08:00:00")
    }
}

pub fn rider(user_type: &str, gender: Option<&str>, birth_year: Option<f64>) -> TripRecord {
    TripRecord {
        user_type: Some(user_type.to_string()),
        gender: gender.map(str::to_string),
        birth_year,
        ..trip("2017-01-02 08:00:00")
    }
}

/// A table whose schema carries every optional column.
pub fn table_of(records: Vec<TripRecord>) -> TripTable {
    TripTable {
        source: PathBuf::from("test.csv"),
        schema: Schema {
            has_end_time: true,
            has_gender: true,
            has_birth_year: true,
        },
        records,
    }
}

/// Same rows, but as if read from a file without gender and birth year columns.
pub fn without_demographics(mut table: TripTable) -> TripTable {
    table.schema.has_gender = false;
    table.schema.has_birth_year = false;
    table
}
