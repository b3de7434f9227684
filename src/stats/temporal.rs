//! Most popular month, weekday and hour of travel.

use chrono::Weekday;
use serde::Serialize;

use super::mode::{Mode, mode_ascending};
use crate::error::{ExploreError, Result};
use crate::filter::WEEKDAYS;
use crate::loader::TripTable;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemporalStats {
    /// 1-based month.
    pub month: Mode<u32>,
    pub day_of_week: Mode<Weekday>,
    pub hour: Mode<u32>,
}

pub fn temporal_stats(table: &TripTable) -> Result<TemporalStats> {
    Ok(TemporalStats {
        month: popular_month(table)?,
        day_of_week: popular_day(table)?,
        hour: popular_hour(table)?,
    })
}

pub fn popular_month(table: &TripTable) -> Result<Mode<u32>> {
    mode_ascending(table.records.iter().map(|r| r.month)).ok_or(ExploreError::EmptyTable {
        statistic: "most common month",
    })
}

/// Ties resolve Monday-first.
pub fn popular_day(table: &TripTable) -> Result<Mode<Weekday>> {
    mode_ascending(
        table
            .records
            .iter()
            .map(|r| r.day_of_week.num_days_from_monday()),
    )
    .map(|m| Mode {
        value: WEEKDAYS[m.value as usize],
        count: m.count,
    })
    .ok_or(ExploreError::EmptyTable {
        statistic: "most common day of week",
    })
}

pub fn popular_hour(table: &TripTable) -> Result<Mode<u32>> {
    mode_ascending(table.records.iter().map(|r| r.hour)).ok_or(ExploreError::EmptyTable {
        statistic: "most common hour",
    })
}
