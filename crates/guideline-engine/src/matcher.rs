//! Rule matching: applicability from conditions, violation from requirements

use crate::clause::{evaluate, Clause};
use crate::guideline::Guideline;
use crate::values::DealValues;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchOutcome {
    /// Every condition held (vacuously true with no conditions)
    pub applies: bool,
    /// The guideline applies and at least one requirement failed
    pub violated: bool,
}

pub fn match_guideline(guideline: &Guideline, values: &DealValues) -> MatchOutcome {
    let applies = guideline
        .conditions
        .iter()
        .all(|clause| evaluate(clause, values));

    if !applies {
        return MatchOutcome::default();
    }

    let violated = guideline
        .requirements
        .iter()
        .any(|clause| !evaluate(clause, values));

    MatchOutcome { applies, violated }
}

/// Requirement clauses that do not hold for the deal
pub fn failed_requirements<'a>(guideline: &'a Guideline, values: &DealValues) -> Vec<&'a Clause> {
    guideline
        .requirements
        .iter()
        .filter(|clause| !evaluate(clause, values))
        .collect()
}
