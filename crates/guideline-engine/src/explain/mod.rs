//! Explanation synthesis
//!
//! Turns a guideline's clauses into prose. This is presentation only: clauses
//! are described, never evaluated.
//!
//! Each known field has its own formatter, looked up by field name; unknown
//! fields fall back to a generic `field operator value` description.

mod formatters;

pub use formatters::{format_money, format_percent};

use crate::clause::Clause;
use crate::guideline::Guideline;
use lazy_static::lazy_static;
use shared_types::FormattedGuideline;
use std::collections::HashMap;

/// Fallback when a guideline has neither conditions nor requirements
pub const NO_CLAUSES: &str = "No specific conditions or requirements.";

/// Whether a clause is being described as a condition or a requirement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClauseRole {
    Condition,
    Requirement,
}

pub type FieldFormatter = fn(&Clause, ClauseRole) -> String;

lazy_static! {
    static ref FORMATTERS: HashMap<&'static str, FieldFormatter> = {
        let mut table: HashMap<&'static str, FieldFormatter> = HashMap::new();
        table.insert("amount", formatters::amount);
        table.insert("businessForm", formatters::business_form);
        table.insert("residualType", formatters::residual_type);
        table.insert("yield", formatters::yield_rate);
        table.insert("points", formatters::points);
        table
    };
}

/// Describe a single clause in its role
pub fn describe_clause(clause: &Clause, role: ClauseRole) -> String {
    match FORMATTERS.get(clause.field.as_str()) {
        Some(format) => format(clause, role),
        None => formatters::generic(clause),
    }
}

/// Build the explanation for a guideline: the condition sentence, then the
/// requirement sentence.
pub fn explain(guideline: &Guideline) -> String {
    let conditions = sentence(&guideline.conditions, ClauseRole::Condition);
    let requirements = sentence(&guideline.requirements, ClauseRole::Requirement);

    match (conditions, requirements) {
        (Some(conditions), Some(requirements)) => format!("{} {}", conditions, requirements),
        (Some(only), None) | (None, Some(only)) => only,
        (None, None) => NO_CLAUSES.to_string(),
    }
}

fn sentence(clauses: &[Clause], role: ClauseRole) -> Option<String> {
    if clauses.is_empty() {
        return None;
    }
    let parts: Vec<String> = clauses
        .iter()
        .map(|clause| describe_clause(clause, role))
        .collect();
    Some(format!("{}.", parts.join(" AND ")))
}

/// Render a guideline for listings, one description per clause
pub fn format_guideline(guideline: &Guideline) -> FormattedGuideline {
    FormattedGuideline {
        rule_id: guideline.display_id().to_string(),
        rule: guideline.text.clone(),
        conditions: guideline
            .conditions
            .iter()
            .map(|clause| describe_clause(clause, ClauseRole::Condition))
            .collect(),
        requirements: guideline
            .requirements
            .iter()
            .map(|clause| describe_clause(clause, ClauseRole::Requirement))
            .collect(),
        violated: false,
    }
}
