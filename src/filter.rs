//! Month and weekday filters with their name tables.

use chrono::Weekday;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::ExploreError;

pub const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Monday-first, matching [`Weekday::num_days_from_monday`].
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Full English name of a weekday, e.g. `Monday`.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Capitalised month name for a 1-based month number.
pub fn month_name(month: u32) -> Option<String> {
    let name = MONTH_NAMES.get(month.checked_sub(1)? as usize)?;
    let mut chars = name.chars();
    chars
        .next()
        .map(|first| first.to_ascii_uppercase().to_string() + chars.as_str())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MonthFilter {
    #[default]
    All,
    /// 1-based calendar month.
    Month(u32),
}

impl MonthFilter {
    /// Accepts `all` or a full month name, case-insensitively.
    pub fn parse(input: &str) -> Result<Self, ExploreError> {
        let normalized = input.trim().to_ascii_lowercase();
        if normalized == "all" {
            return Ok(MonthFilter::All);
        }
        MONTH_NAMES
            .iter()
            .position(|name| *name == normalized)
            .map(|idx| MonthFilter::Month(idx as u32 + 1))
            .ok_or_else(|| ExploreError::InvalidMonth(input.to_string()))
    }

    pub fn matches(self, month: u32) -> bool {
        match self {
            MonthFilter::All => true,
            MonthFilter::Month(wanted) => wanted == month,
        }
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthFilter::All => f.write_str("all"),
            MonthFilter::Month(m) => {
                match m.checked_sub(1).and_then(|i| MONTH_NAMES.get(i as usize)) {
                    Some(name) => f.write_str(name),
                    None => write!(f, "{m}"),
                }
            }
        }
    }
}

impl FromStr for MonthFilter {
    type Err = ExploreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MonthFilter::parse(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DayFilter {
    #[default]
    All,
    Day(Weekday),
}

impl DayFilter {
    /// Accepts `all` or a full weekday name, case-insensitively.
    pub fn parse(input: &str) -> Result<Self, ExploreError> {
        let normalized = input.trim().to_ascii_lowercase();
        if normalized == "all" {
            return Ok(DayFilter::All);
        }
        WEEKDAYS
            .into_iter()
            .find(|day| weekday_name(*day).eq_ignore_ascii_case(&normalized))
            .map(DayFilter::Day)
            .ok_or_else(|| ExploreError::InvalidDay(input.to_string()))
    }

    pub fn matches(self, day: Weekday) -> bool {
        match self {
            DayFilter::All => true,
            DayFilter::Day(wanted) => wanted == day,
        }
    }
}

impl fmt::Display for DayFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayFilter::All => f.write_str("all"),
            DayFilter::Day(day) => f.write_str(&weekday_name(*day).to_ascii_lowercase()),
        }
    }
}

impl FromStr for DayFilter {
    type Err = ExploreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DayFilter::parse(s)
    }
}

impl Serialize for DayFilter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
