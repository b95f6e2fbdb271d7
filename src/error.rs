//! Error types for loading and filtering trip data.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while resolving, reading or filtering a trip dataset.
///
/// A missing optional field (gender, birth year) is not an error; the
/// aggregations report it as `None`.
#[derive(Error, Debug)]
pub enum BikeshareError {
    /// The city identifier is not one of the registered datasets.
    #[error("Unknown city: {0}")]
    UnknownCity(String),

    /// The month selector is not `all` or one of January through June.
    #[error("Unknown month filter: {0}")]
    UnknownMonth(String),

    /// The day selector is not `all` or a weekday name.
    #[error("Unknown day filter: {0}")]
    UnknownDay(String),

    /// The source file could not be opened.
    #[error("Failed to open {path}: {source}")]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A required column or value is missing or unparseable.
    #[error("Malformed source {path}: {reason}")]
    MalformedSource { path: PathBuf, reason: String },
}

impl BikeshareError {
    pub(crate) fn malformed(path: &std::path::Path, reason: impl Into<String>) -> Self {
        BikeshareError::MalformedSource {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BikeshareError>;
