//! Pricing guideline evaluation
//!
//! A guideline applies to a deal when all of its conditions hold, and is
//! violated when it applies and any requirement fails. [`GuidelineEngine`]
//! runs every guideline for the deal's state and reports violations with a
//! prose explanation of each.

pub mod clause;
pub mod error;
pub mod explain;
pub mod guideline;
pub mod loader;
pub mod matcher;
pub mod store;
pub mod values;

pub use clause::{Clause, Operator};
pub use error::{EngineError, LoadError, MalformedClauseData};
pub use guideline::Guideline;
pub use matcher::{match_guideline, MatchOutcome};
pub use store::{GuidelineSet, GuidelineStore, ReloadPolicy};
pub use values::{DealValues, FieldValue};

use shared_types::{
    Deal, EvaluationReport, EvaluationSummary, FormattedGuideline, ReloadSummary, StateRuleCount,
    Violation,
};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Evaluation entry point
pub struct GuidelineEngine {
    store: Arc<GuidelineStore>,
}

impl GuidelineEngine {
    pub fn new(store: Arc<GuidelineStore>) -> Self {
        Self { store }
    }

    /// Evaluate a deal against its state's guidelines.
    ///
    /// Fails only when the deal has no state. An unknown state is not an
    /// error; it simply has no guidelines.
    pub fn evaluate(&self, deal: &Deal) -> Result<EvaluationReport, EngineError> {
        let state = deal.state_code().ok_or(EngineError::MissingField("state"))?;

        let snapshot = self.store.snapshot();
        let values = DealValues::from(deal);
        let report = evaluate_guidelines(&state, snapshot.get(&state), &values);

        info!(
            state = %report.state,
            violations = report.violation_count,
            evaluated = report.evaluation_summary.rules_evaluated,
            "Evaluated deal"
        );

        Ok(report)
    }

    /// Every guideline of `state`, formatted for display
    pub fn guidelines_for(&self, state: &str) -> Vec<FormattedGuideline> {
        self.store
            .snapshot()
            .get(state)
            .iter()
            .map(explain::format_guideline)
            .collect()
    }

    pub fn states(&self) -> Vec<StateRuleCount> {
        self.store.snapshot().states()
    }

    /// Re-read the guideline source and publish it
    pub fn reload(&self, path: &Path) -> ReloadSummary {
        self.store.reload_from(path)
    }
}

impl Default for GuidelineEngine {
    fn default() -> Self {
        Self::new(Arc::new(GuidelineStore::default()))
    }
}

/// Run `guidelines` in order against `values` and aggregate the report.
///
/// Pure: the same inputs always give the same report.
pub fn evaluate_guidelines(
    state: &str,
    guidelines: &[Guideline],
    values: &DealValues,
) -> EvaluationReport {
    let mut violations = Vec::new();
    let mut applicable = Vec::new();

    for guideline in guidelines {
        let outcome = match_guideline(guideline, values);
        if !outcome.applies {
            continue;
        }

        let mut formatted = explain::format_guideline(guideline);
        formatted.violated = outcome.violated;
        applicable.push(formatted);

        if outcome.violated {
            debug!(
                rule_id = guideline.display_id(),
                failed = matcher::failed_requirements(guideline, values).len(),
                "Guideline violated"
            );
            violations.push(Violation {
                rule_id: guideline.display_id().to_string(),
                rule_text: guideline.text.clone(),
                notes: format!("{}: {}", state, explain::explain(guideline)),
            });
        }
    }

    let summary = EvaluationSummary {
        total_rules: guidelines.len(),
        rules_evaluated: applicable.len(),
        rules_passed: applicable.len() - violations.len(),
        rules_violated: violations.len(),
    };

    EvaluationReport {
        state: state.to_string(),
        violation_count: violations.len(),
        violations,
        guidelines: applicable,
        evaluation_summary: summary,
    }
}
