use serde_json::{Map, Value};
use std::fmt;

/// A deal attribute value, or the literal operand of a guideline clause.
///
/// Numeric attributes are accepted as JSON numbers or as numeric-looking
/// strings; comparison decides how to read them.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// Numeric view of the value. Text counts when it is numeric-looking,
    /// i.e. its trimmed content parses to a finite number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n).filter(|n| n.is_finite()),
            FieldValue::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        }
    }

    /// Trimmed, lowercased text used for equality between categorical values
    pub fn normalized_text(&self) -> String {
        match self {
            FieldValue::Number(n) => n.to_string(),
            FieldValue::Text(s) => s.trim().to_lowercase(),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

/// A loan/lease deal submitted for pricing review
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deal {
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub amount: Option<FieldValue>,
    #[serde(default)]
    pub business_form: Option<String>,
    #[serde(default)]
    pub residual_type: Option<String>,
    /// Fractional yield, e.g. 0.08 for 8%
    #[serde(default, rename = "yield")]
    pub yield_rate: Option<FieldValue>,
    /// Fractional points, e.g. 0.02 for 2 points
    #[serde(default)]
    pub points: Option<FieldValue>,
    /// Any other attributes; guidelines may reference them by name
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Deal {
    pub fn new(state: &str) -> Self {
        Self {
            state: Some(state.to_string()),
            ..Default::default()
        }
    }

    /// Normalized (trimmed, uppercased) state code, `None` when absent or blank
    pub fn state_code(&self) -> Option<String> {
        self.state
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_uppercase)
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Violation {
    #[serde(rename = "ruleId")]
    pub rule_id: String,
    #[serde(rename = "rule")]
    pub rule_text: String,
    pub notes: String,
}

/// A guideline rendered for display, conditions and requirements as prose
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedGuideline {
    pub rule_id: String,
    pub rule: String,
    pub conditions: Vec<String>,
    pub requirements: Vec<String>,
    #[serde(default)]
    pub violated: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationSummary {
    pub total_rules: usize,
    pub rules_evaluated: usize,
    pub rules_passed: usize,
    pub rules_violated: usize,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationReport {
    pub state: String,
    pub violation_count: usize,
    pub violations: Vec<Violation>,
    #[serde(default)]
    pub guidelines: Vec<FormattedGuideline>,
    #[serde(default)]
    pub evaluation_summary: EvaluationSummary,
}

/// Outcome of a guideline reload
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReloadSummary {
    pub success: bool,
    pub states_loaded: usize,
    pub rules_loaded: usize,
    pub skipped_entries: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateRuleCount {
    pub state: String,
    pub rule_count: usize,
}
