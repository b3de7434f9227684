//! Descriptive statistics over a filtered trip table.
//!
//! Each group is a plain function of `&TripTable` returning its own result
//! type, so callers can compute them independently or through
//! [`StatsReport::compute`], which times every group and keeps a failure in
//! one group from hiding the others.
//!
//! Mode tie-breaks: calendar fields (month, weekday, hour) and birth year
//! resolve ties to the smallest value; station names and trips resolve to the
//! value that appears first in the table. Weekdays count Monday as the
//! smallest, which deliberately differs from ranking the day names
//! alphabetically (where Friday would win a tie).

pub mod duration;
pub mod mode;
pub mod report;
pub mod station;
pub mod temporal;
pub mod users;

#[cfg(test)]
pub(crate) mod testing;

pub use duration::{DurationStats, duration_stats};
pub use mode::Mode;
pub use report::{StatsReport, Timed};
pub use station::{StationStats, station_stats};
pub use temporal::{TemporalStats, temporal_stats};
pub use users::{BirthYearStats, SubStat, Unavailable, UserStats, user_stats};
