//! Most popular start station, end station and trip.

use serde::Serialize;

use super::mode::{Mode, mode_first_seen};
use crate::error::{ExploreError, Result};
use crate::loader::TripTable;

pub const TRIP_SEPARATOR: &str = " - ";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationStats {
    pub start_station: Mode<String>,
    pub end_station: Mode<String>,
    /// `"<start> - <end>"`.
    pub trip: Mode<String>,
}

pub fn station_stats(table: &TripTable) -> Result<StationStats> {
    let empty = |statistic| ExploreError::EmptyTable { statistic };

    let start_station = mode_first_seen(table.records.iter().map(|r| r.start_station.as_str()))
        .ok_or_else(|| empty("most common start station"))?;
    let end_station = mode_first_seen(table.records.iter().map(|r| r.end_station.as_str()))
        .ok_or_else(|| empty("most common end station"))?;
    let trip = mode_first_seen(
        table
            .records
            .iter()
            .map(|r| format!("{}{TRIP_SEPARATOR}{}", r.start_station, r.end_station)),
    )
    .ok_or_else(|| empty("most common trip"))?;

    Ok(StationStats {
        start_station: owned(start_station),
        end_station: owned(end_station),
        trip,
    })
}

fn owned(mode: Mode<&str>) -> Mode<String> {
    Mode {
        value: mode.value.to_string(),
        count: mode.count,
    }
}
