//! Error taxonomy for loading and summarising trip data.

use serde::{Serialize, Serializer};
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong between picking a dataset and reading its statistics.
#[derive(Debug, Error)]
pub enum ExploreError {
    #[error("unknown dataset '{0}' (expected chicago, new york or washington)")]
    UnknownDataset(String),

    #[error("invalid month filter '{0}' (expected a month name or 'all')")]
    InvalidMonth(String),

    #[error("invalid day filter '{0}' (expected a weekday name or 'all')")]
    InvalidDay(String),

    #[error("cannot read {}: {source}", path.display())]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{} has no '{column}' column", path.display())]
    MissingColumn { path: PathBuf, column: &'static str },

    #[error("{}: line {line} has malformed start timestamp '{value}'", path.display())]
    MalformedTimestamp {
        path: PathBuf,
        line: usize,
        value: String,
    },

    #[error("cannot compute {statistic} over an empty table")]
    EmptyTable { statistic: &'static str },
}

impl Serialize for ExploreError {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

pub type Result<T> = std::result::Result<T, ExploreError>;
