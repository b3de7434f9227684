//! Total and average trip duration.

use serde::Serialize;

use crate::error::{ExploreError, Result};
use crate::loader::TripTable;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationStats {
    /// Seconds.
    pub total: f64,
    pub mean: f64,
    /// `mean` rounded half-to-even.
    pub mean_rounded: f64,
}

/// NaN and negative durations are summed as they are.
pub fn duration_stats(table: &TripTable) -> Result<DurationStats> {
    if table.is_empty() {
        return Err(ExploreError::EmptyTable {
            statistic: "trip duration",
        });
    }

    let total: f64 = table.records.iter().map(|r| r.trip_duration).sum();
    let mean = total / table.len() as f64;

    Ok(DurationStats {
        total,
        mean,
        mean_rounded: mean.round_ties_even(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{LoadOptions, read_table};
    use crate::stats::testing::{table_of, trip_lasting};
    use std::io::Cursor;
    use std::path::Path;

    #[test]
    fn test_sum_and_mean() {
        let table = table_of(vec![trip_lasting(60.0), trip_lasting(120.0), trip_lasting(180.0)]);
        let stats = duration_stats(&table).unwrap();
        assert_eq!(stats.total, 360.0);
        assert_eq!(stats.mean, 120.0);
        assert_eq!(stats.mean_rounded, 120.0);
    }

    #[test]
    fn test_mean_rounds_half_to_even() {
        let table = table_of(vec![trip_lasting(1.0), trip_lasting(2.0)]);
        assert_eq!(duration_stats(&table).unwrap().mean_rounded, 2.0);

        let table = table_of(vec![trip_lasting(2.0), trip_lasting(3.0)]);
        assert_eq!(duration_stats(&table).unwrap().mean_rounded, 2.0);

        let table = table_of(vec![trip_lasting(100.0), trip_lasting(101.0), trip_lasting(101.0)]);
        assert_eq!(duration_stats(&table).unwrap().mean_rounded, 101.0);
    }

    #[test]
    fn test_negative_durations_pass_through() {
        let table = table_of(vec![trip_lasting(-30.0), trip_lasting(10.0)]);
        let stats = duration_stats(&table).unwrap();
        assert_eq!(stats.total, -20.0);
        assert_eq!(stats.mean_rounded, -10.0);
    }

    #[test]
    fn test_nan_duration_propagates_to_mean() {
        let text = "Start Time,Trip Duration,Start Station,End Station,User Type\n\
                    2017-01-02 08:00:00,NaN,A,B,Subscriber\n\
                    2017-01-02 09:00:00,100,A,B,Subscriber\n";
        let table = read_table(Cursor::new(text), Path::new("nan.csv"), LoadOptions::default())
            .unwrap();
        let stats = duration_stats(&table).unwrap();
        assert!(stats.total.is_nan());
        assert!(stats.mean.is_nan());
        assert!(stats.mean_rounded.is_nan());
    }

    #[test]
    fn test_empty_table() {
        assert!(matches!(
            duration_stats(&table_of(vec![])),
            Err(ExploreError::EmptyTable { .. })
        ));
    }
}
