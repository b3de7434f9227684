//! Dataset registry: which CSV file backs each supported city.
//!
//! The built-in locations can be overridden by a JSON file on disk:
//! ```json
//! {
//!   "chicago": "archive/chicago_2017.csv",
//!   "new york": "/data/nyc.csv"
//! }
//! ```
//! Relative locations are resolved against the registry's data directory.

use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::ExploreError;

/// One of the three regions with published trip data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum City {
    Chicago,
    NewYork,
    Washington,
}

impl City {
    pub const ALL: [City; 3] = [City::Chicago, City::NewYork, City::Washington];

    /// Validating constructor. Accepts the prompt spelling in any case.
    pub fn parse(name: &str) -> Result<Self, ExploreError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "chicago" => Ok(City::Chicago),
            "new york" | "new york city" => Ok(City::NewYork),
            "washington" => Ok(City::Washington),
            _ => Err(ExploreError::UnknownDataset(name.to_string())),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            City::Chicago => "chicago",
            City::NewYork => "new york",
            City::Washington => "washington",
        }
    }

    fn default_file(self) -> &'static str {
        match self {
            City::Chicago => "chicago.csv",
            City::NewYork => "new_york_city.csv",
            City::Washington => "washington.csv",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for City {
    type Err = ExploreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        City::parse(s)
    }
}

/// Immutable mapping from [`City`] to the file holding its trips.
#[derive(Debug, Clone)]
pub struct DatasetRegistry {
    data_dir: PathBuf,
    overrides: HashMap<City, PathBuf>,
}

impl DatasetRegistry {
    /// Registry using the built-in file names under `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            overrides: HashMap::new(),
        }
    }

    /// Loads per-city location overrides from the JSON file at `path`.
    pub fn with_overrides_from(self, path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading registry file {}", path.display()))?;
        let entries: HashMap<String, PathBuf> = serde_json::from_str(&content)
            .with_context(|| format!("parsing registry file {}", path.display()))?;
        Ok(self.with_overrides(entries)?)
    }

    /// Applies location overrides keyed by dataset name.
    pub fn with_overrides(
        mut self,
        entries: HashMap<String, PathBuf>,
    ) -> Result<Self, ExploreError> {
        for (name, location) in entries {
            let city = City::parse(&name)?;
            self.overrides.insert(city, location);
        }
        Ok(self)
    }

    /// Returns the source location backing `city`.
    pub fn resolve(&self, city: City) -> PathBuf {
        let location = self
            .overrides
            .get(&city)
            .map(PathBuf::as_path)
            .unwrap_or_else(|| Path::new(city.default_file()));
        self.data_dir.join(location)
    }

    /// Resolves a dataset given by name, rejecting anything unregistered.
    pub fn resolve_name(&self, name: &str) -> Result<PathBuf, ExploreError> {
        City::parse(name).map(|city| self.resolve(city))
    }

    /// Iterates over all `(city, location)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (City, PathBuf)> + '_ {
        City::ALL.into_iter().map(move |city| (city, self.resolve(city)))
    }
}
