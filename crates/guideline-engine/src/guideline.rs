//! Pricing guideline model

use crate::clause::Clause;
use serde::{Deserialize, Serialize};

/// One pricing policy: when every condition holds, every requirement must too
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guideline {
    #[serde(default, alias = "ruleId")]
    pub id: Option<String>,
    #[serde(default, alias = "rule", alias = "ruleText")]
    pub text: String,
    /// Empty means the guideline applies unconditionally
    #[serde(default)]
    pub conditions: Vec<Clause>,
    /// Empty means the guideline can never be violated
    #[serde(default)]
    pub requirements: Vec<Clause>,
}

impl Guideline {
    pub fn new(id: &str, text: &str) -> Self {
        Self {
            id: Some(id.to_string()),
            text: text.to_string(),
            conditions: Vec::new(),
            requirements: Vec::new(),
        }
    }

    pub fn when(mut self, clause: Clause) -> Self {
        self.conditions.push(clause);
        self
    }

    pub fn require(mut self, clause: Clause) -> Self {
        self.requirements.push(clause);
        self
    }

    pub fn display_id(&self) -> &str {
        self.id.as_deref().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_accepts_alternate_field_names() {
        let guideline: Guideline = serde_json::from_str(
            r#"{
                "ruleId": "CA-7",
                "rule": "LLC deals need $50k minimum",
                "conditions": [{"field": "businessForm", "operator": "=", "value": "LLC"}],
                "requirements": [{"field": "amount", "operator": ">=", "value": 50000}]
            }"#,
        )
        .unwrap();

        assert_eq!(
            guideline,
            Guideline::new("CA-7", "LLC deals need $50k minimum")
                .when(Clause::text("businessForm", "=", "LLC"))
                .require(Clause::number("amount", ">=", 50000.0))
        );
    }

    #[test]
    fn test_missing_parts_default_to_empty() {
        let guideline: Guideline = serde_json::from_str(r#"{"text": "Anything goes"}"#).unwrap();
        assert_eq!(guideline.display_id(), "");
        assert!(guideline.conditions.is_empty());
        assert!(guideline.requirements.is_empty());
    }
}
