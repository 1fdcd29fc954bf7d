//! Guideline source loaders
//!
//! A source is a CSV or JSON file, picked by extension. Entries whose clause
//! data cannot be parsed are dropped and reported; they never abort the load.

mod csv_file;
mod json_file;

pub use csv_file::parse_csv;
pub use json_file::parse_json;

use crate::error::{LoadError, MalformedClauseData};
use crate::store::GuidelineSet;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// A successfully read source: the parsed set plus the entries it dropped
#[derive(Debug, Default)]
pub struct LoadOutcome {
    pub set: GuidelineSet,
    pub skipped: Vec<MalformedClauseData>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    Json,
}

impl SourceFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_lowercase();
        match extension.as_str() {
            "csv" => Some(SourceFormat::Csv),
            "json" => Some(SourceFormat::Json),
            _ => None,
        }
    }
}

/// Read and parse the guideline source at `path`
pub fn load_guidelines(path: &Path) -> Result<LoadOutcome, LoadError> {
    let format = SourceFormat::from_path(path)
        .ok_or_else(|| LoadError::UnsupportedFormat(path.to_path_buf()))?;

    let content = fs::read_to_string(path).map_err(|source| LoadError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;

    let outcome = match format {
        SourceFormat::Csv => parse_csv(&content)?,
        SourceFormat::Json => parse_json(&content)?,
    };

    for skipped in &outcome.skipped {
        warn!("Skipping guideline entry: {}", skipped);
    }
    info!(
        states = outcome.set.state_count(),
        rules = outcome.set.rule_count(),
        skipped = outcome.skipped.len(),
        "Parsed guideline source {}",
        path.display()
    );

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            SourceFormat::from_path(Path::new("rules/guidelines.CSV")),
            Some(SourceFormat::Csv)
        );
        assert_eq!(
            SourceFormat::from_path(Path::new("guidelines.json")),
            Some(SourceFormat::Json)
        );
        assert_eq!(SourceFormat::from_path(Path::new("guidelines.yaml")), None);
        assert_eq!(SourceFormat::from_path(Path::new("guidelines")), None);
    }

    #[test]
    fn test_missing_file_is_source_unavailable() {
        let err = load_guidelines(Path::new("/nonexistent/guidelines.json")).unwrap_err();
        assert!(matches!(err, LoadError::SourceUnavailable { .. }));
    }

    #[test]
    fn test_unsupported_extension() {
        let err = load_guidelines(Path::new("guidelines.xml")).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_loads_csv_file() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "state,ruleId,ruleText,conditions,requirements").unwrap();
        writeln!(
            file,
            r#"CA,CA-1,LLC minimum,"[{{""field"":""businessForm"",""operator"":""="",""value"":""LLC""}}]","[{{""field"":""amount"",""operator"":"">="",""value"":50000}}]""#
        )
        .unwrap();

        let outcome = load_guidelines(file.path()).unwrap();
        assert_eq!(outcome.set.rule_count(), 1);
        assert!(outcome.skipped.is_empty());
    }
}
