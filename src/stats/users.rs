//! User type, gender and birth year breakdowns.
//!
//! Gender and birth year are only published for some cities. Their absence
//! yields [`SubStat::Unavailable`] instead of an error so the rest of the
//! breakdown still reports.

use serde::Serialize;

use super::mode::{mode_ascending, value_counts};
use crate::loader::{OptionalColumn, TripTable};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Unavailable {
    /// The source file has no such column.
    MissingColumn,
    /// The column exists but no row in the table has a value.
    NoValues,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubStat<T> {
    Available(T),
    Unavailable(Unavailable),
}

impl<T> SubStat<T> {
    pub fn available(&self) -> Option<&T> {
        match self {
            SubStat::Available(v) => Some(v),
            SubStat::Unavailable(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BirthYearStats {
    pub earliest: i64,
    pub most_recent: i64,
    /// Ties resolve to the earlier year.
    pub most_common: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserStats {
    /// Most frequent first; equal counts keep first-seen order.
    pub user_types: Vec<(String, usize)>,
    pub genders: SubStat<Vec<(String, usize)>>,
    pub birth_years: SubStat<BirthYearStats>,
}

/// Never fails: an empty table yields empty counts and unavailable birth years.
pub fn user_stats(table: &TripTable) -> UserStats {
    UserStats {
        user_types: owned_counts(value_counts(
            table.records.iter().filter_map(|r| r.user_type.as_deref()),
        )),
        genders: gender_counts(table),
        birth_years: birth_year_stats(table),
    }
}

pub fn gender_counts(table: &TripTable) -> SubStat<Vec<(String, usize)>> {
    if !table.has_column(OptionalColumn::Gender) {
        return SubStat::Unavailable(Unavailable::MissingColumn);
    }
    SubStat::Available(owned_counts(value_counts(
        table.records.iter().filter_map(|r| r.gender.as_deref()),
    )))
}

pub fn birth_year_stats(table: &TripTable) -> SubStat<BirthYearStats> {
    if !table.has_column(OptionalColumn::BirthYear) {
        return SubStat::Unavailable(Unavailable::MissingColumn);
    }

    let years: Vec<i64> = table
        .records
        .iter()
        .filter_map(|r| r.birth_year)
        .filter(|y| y.is_finite())
        .map(|y| y as i64)
        .collect();

    let (Some(&earliest), Some(&most_recent), Some(mode)) = (
        years.iter().min(),
        years.iter().max(),
        mode_ascending(years.iter().copied()),
    ) else {
        return SubStat::Unavailable(Unavailable::NoValues);
    };

    SubStat::Available(BirthYearStats {
        earliest,
        most_recent,
        most_common: mode.value,
    })
}

fn owned_counts(counts: Vec<(&str, usize)>) -> Vec<(String, usize)> {
    counts
        .into_iter()
        .map(|(value, count)| (value.to_string(), count))
        .collect()
}
