//! Runs every statistic group over one table, timing each and keeping failures local.

use serde::{Serialize, Serializer};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use super::duration::{DurationStats, duration_stats};
use super::station::{StationStats, station_stats};
use super::temporal::{TemporalStats, temporal_stats};
use super::users::{UserStats, user_stats};
use crate::error::{ExploreError, Result};
use crate::loader::TripTable;

/// Outcome of one statistic group together with its wall-clock cost.
#[derive(Debug, Serialize)]
pub struct Timed<T> {
    #[serde(rename = "elapsed_secs", serialize_with = "as_secs")]
    pub elapsed: Duration,
    pub result: Result<T>,
}

fn as_secs<S: Serializer>(
    elapsed: &Duration,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_f64(elapsed.as_secs_f64())
}

/// Runs `compute`, recording how long it took.
pub fn timed<T>(group: &'static str, compute: impl FnOnce() -> Result<T>) -> Timed<T> {
    let started = Instant::now();
    let result = compute();
    let elapsed = started.elapsed();

    match &result {
        Ok(_) => debug!(group, elapsed_us = elapsed.as_micros() as u64, "Computed statistics"),
        Err(e) => warn!(group, error = %e, "Statistic group failed"),
    }

    Timed { elapsed, result }
}

#[derive(Debug, Serialize)]
pub struct StatsReport {
    pub source: PathBuf,
    pub rows: usize,
    pub temporal: Timed<TemporalStats>,
    pub stations: Timed<StationStats>,
    pub durations: Timed<DurationStats>,
    pub users: Timed<UserStats>,
}

impl StatsReport {
    /// Computes all four groups. A failing group never prevents the others.
    pub fn compute(table: &TripTable) -> Self {
        StatsReport {
            source: table.source.clone(),
            rows: table.len(),
            temporal: timed("temporal", || temporal_stats(table)),
            stations: timed("stations", || station_stats(table)),
            durations: timed("durations", || duration_stats(table)),
            users: timed("users", || Ok::<_, ExploreError>(user_stats(table))),
        }
    }
}
