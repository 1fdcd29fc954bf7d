pub mod types;

pub use types::{
    Deal, EvaluationReport, EvaluationSummary, FieldValue, FormattedGuideline, ReloadSummary,
    StateRuleCount, Violation,
};
