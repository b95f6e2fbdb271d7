//! Static mapping from city identifiers to their trip data files.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{BikeshareError, Result};

/// The cities a dataset is published for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum City {
    Chicago,
    NewYork,
    Washington,
}

impl City {
    pub const ALL: [City; 3] = [City::Chicago, City::NewYork, City::Washington];

    /// Lowercase identifier accepted on input, e.g. `"new york"`.
    pub fn id(self) -> &'static str {
        match self {
            City::Chicago => "chicago",
            City::NewYork => "new york",
            City::Washington => "washington",
        }
    }

    /// File name of the city's dataset inside the data directory.
    pub fn file_name(self) -> &'static str {
        match self {
            City::Chicago => "chicago.csv",
            City::NewYork => "new_york_city.csv",
            City::Washington => "washington.csv",
        }
    }
}

impl FromStr for City {
    type Err = BikeshareError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        City::ALL
            .into_iter()
            .find(|c| c.id() == wanted)
            .ok_or_else(|| BikeshareError::UnknownCity(s.to_string()))
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            City::Chicago => "Chicago",
            City::NewYork => "New York",
            City::Washington => "Washington",
        };
        f.write_str(name)
    }
}

/// Resolves cities to file locations under a data directory.
#[derive(Debug, Clone)]
pub struct DatasetRegistry {
    data_dir: PathBuf,
}

impl DatasetRegistry {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Returns the file location for a city identifier.
    ///
    /// # Errors
    ///
    /// Returns [`BikeshareError::UnknownCity`] for identifiers outside
    /// `chicago`, `new york` and `washington`.
    pub fn location(&self, city: &str) -> Result<PathBuf> {
        let city: City = city.parse()?;
        Ok(self.path_for(city))
    }

    pub fn path_for(&self, city: City) -> PathBuf {
        self.data_dir.join(city.file_name())
    }
}
