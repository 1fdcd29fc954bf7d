//! Error types for guideline evaluation and loading

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by evaluation requests
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}

/// Whole-source load failures. Nothing from a failed source is published.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Guideline source unavailable ({path}): {source}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported guideline source format: {0}")]
    UnsupportedFormat(PathBuf),

    #[error("Invalid guideline JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid guideline CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Guideline CSV is missing the '{0}' column")]
    MissingColumn(&'static str),

    #[error("Unexpected guideline document shape: {0}")]
    InvalidShape(String),
}

/// A single guideline entry that could not be parsed; it is dropped and the
/// rest of the load continues.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Malformed clause data at {location}: {reason}")]
pub struct MalformedClauseData {
    pub location: String,
    pub reason: String,
}

impl MalformedClauseData {
    pub fn new(location: impl Into<String>, reason: impl ToString) -> Self {
        Self {
            location: location.into(),
            reason: reason.to_string(),
        }
    }
}
