// JSON guideline sources
//
// Two layouts are accepted:
//   { "CA": [ {guideline}, ... ], "TX": [ ... ] }
//   [ { "state": "CA", ...guideline }, ... ]
use super::LoadOutcome;
use crate::error::{LoadError, MalformedClauseData};
use crate::guideline::Guideline;
use crate::store::{GuidelineSet, GuidelineSetBuilder};
use serde_json::Value;

/// Parse JSON guideline text. Each entry is decoded on its own so a bad entry
/// only drops itself; text that is not JSON at all fails the whole source.
pub fn parse_json(content: &str) -> Result<LoadOutcome, LoadError> {
    let document: Value = serde_json::from_str(content)?;

    let mut builder = GuidelineSet::builder();
    let mut skipped = Vec::new();

    match document {
        Value::Object(states) => {
            for (state, entries) in states {
                if state.trim().is_empty() {
                    skipped.push(MalformedClauseData::new("<blank state>", "missing state"));
                    continue;
                }
                let Value::Array(entries) = entries else {
                    skipped.push(MalformedClauseData::new(
                        state,
                        "expected an array of guidelines",
                    ));
                    continue;
                };
                for (index, entry) in entries.into_iter().enumerate() {
                    let location = format!("{}[{}]", state, index);
                    add_entry(&mut builder, &mut skipped, &state, entry, location);
                }
            }
        }
        Value::Array(entries) => {
            for (index, entry) in entries.into_iter().enumerate() {
                let location = format!("[{}]", index);
                let state = entry
                    .get("state")
                    .and_then(Value::as_str)
                    .map(str::trim)
                    .unwrap_or("")
                    .to_string();
                if state.is_empty() {
                    skipped.push(MalformedClauseData::new(location, "missing state"));
                    continue;
                }
                add_entry(&mut builder, &mut skipped, &state, entry, location);
            }
        }
        other => {
            return Err(LoadError::InvalidShape(format!(
                "expected an object keyed by state or an array of guidelines, found {}",
                kind(&other)
            )))
        }
    }

    Ok(LoadOutcome {
        set: builder.build(),
        skipped,
    })
}

fn add_entry(
    builder: &mut GuidelineSetBuilder,
    skipped: &mut Vec<MalformedClauseData>,
    state: &str,
    entry: Value,
    location: String,
) {
    match serde_json::from_value::<Guideline>(entry) {
        Ok(guideline) => {
            builder.push(state, guideline);
        }
        Err(e) => skipped.push(MalformedClauseData::new(location, e)),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
