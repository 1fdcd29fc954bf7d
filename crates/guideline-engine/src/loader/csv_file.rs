// CSV guideline sources: one row per guideline, clauses as embedded JSON arrays
use super::LoadOutcome;
use crate::clause::Clause;
use crate::error::{LoadError, MalformedClauseData};
use crate::guideline::Guideline;
use crate::store::GuidelineSet;
use csv::{ReaderBuilder, StringRecord, Trim};

/// Column positions resolved from the header row
#[derive(Debug, Default)]
struct Columns {
    state: Option<usize>,
    id: Option<usize>,
    text: Option<usize>,
    conditions: Option<usize>,
    requirements: Option<usize>,
}

impl Columns {
    fn resolve(headers: &StringRecord) -> Self {
        let mut columns = Columns::default();
        for (index, header) in headers.iter().enumerate() {
            let key: String = header
                .chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .collect::<String>()
                .to_lowercase();
            let slot = match key.as_str() {
                "state" => &mut columns.state,
                "ruleid" | "id" => &mut columns.id,
                "ruletext" | "rule" | "text" | "guideline" => &mut columns.text,
                "conditions" => &mut columns.conditions,
                "requirements" => &mut columns.requirements,
                _ => continue,
            };
            slot.get_or_insert(index);
        }
        columns
    }
}

fn cell<'r>(record: &'r StringRecord, column: Option<usize>) -> &'r str {
    column
        .and_then(|index| record.get(index))
        .map(str::trim)
        .unwrap_or("")
}

fn parse_clauses(raw: &str, column: &str) -> Result<Vec<Clause>, String> {
    if raw.is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(raw).map_err(|e| format!("invalid {} JSON: {}", column, e))
}

fn parse_row(record: &StringRecord, columns: &Columns) -> Result<(String, Guideline), String> {
    let state = cell(record, columns.state);
    if state.is_empty() {
        return Err("missing state".to_string());
    }

    let id = cell(record, columns.id);
    let guideline = Guideline {
        id: (!id.is_empty()).then(|| id.to_string()),
        text: cell(record, columns.text).to_string(),
        conditions: parse_clauses(cell(record, columns.conditions), "conditions")?,
        requirements: parse_clauses(cell(record, columns.requirements), "requirements")?,
    };

    Ok((state.to_string(), guideline))
}

/// Parse CSV guideline text. Malformed rows are skipped and reported in the
/// outcome; only an unreadable header or a missing `state` column fails the
/// whole source.
pub fn parse_csv(content: &str) -> Result<LoadOutcome, LoadError> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::Headers)
        .from_reader(content.as_bytes());

    let columns = Columns::resolve(reader.headers()?);
    if columns.state.is_none() {
        return Err(LoadError::MissingColumn("state"));
    }

    let mut builder = GuidelineSet::builder();
    let mut skipped = Vec::new();

    for (index, record) in reader.records().enumerate() {
        // Header is line 1
        let location = format!("line {}", index + 2);
        let parsed = record
            .map_err(|e| e.to_string())
            .and_then(|record| parse_row(&record, &columns));

        match parsed {
            Ok((state, guideline)) => {
                builder.push(&state, guideline);
            }
            Err(reason) => skipped.push(MalformedClauseData::new(location, reason)),
        }
    }

    Ok(LoadOutcome {
        set: builder.build(),
        skipped,
    })
}
