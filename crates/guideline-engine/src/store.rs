//! In-memory guideline store
//!
//! The active guideline set is an immutable snapshot behind an `Arc`. Readers
//! clone the `Arc` and evaluate against it without holding any lock; a reload
//! builds a complete new set off to the side and swaps it in only once the
//! load has succeeded. Readers therefore see the old set or the new one,
//! never a mixture.

use crate::error::LoadError;
use crate::guideline::Guideline;
use crate::loader::{load_guidelines, LoadOutcome};
use serde::{Deserialize, Serialize};
use shared_types::{ReloadSummary, StateRuleCount};
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{error, info, warn};

/// Uppercased, trimmed state code used as the store key
pub fn normalize_state(state: &str) -> String {
    state.trim().to_uppercase()
}

/// Guidelines grouped by state, in load order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GuidelineSet {
    by_state: HashMap<String, Vec<Guideline>>,
}

impl GuidelineSet {
    pub fn builder() -> GuidelineSetBuilder {
        GuidelineSetBuilder::default()
    }

    /// Guidelines for `state` (case-insensitive); empty for unknown states
    pub fn get(&self, state: &str) -> &[Guideline] {
        self.by_state
            .get(&normalize_state(state))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn state_count(&self) -> usize {
        self.by_state.len()
    }

    pub fn rule_count(&self) -> usize {
        self.by_state.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_state.is_empty()
    }

    /// Loaded states with their rule counts, sorted by state code
    pub fn states(&self) -> Vec<StateRuleCount> {
        let mut states: Vec<StateRuleCount> = self
            .by_state
            .iter()
            .map(|(state, guidelines)| StateRuleCount {
                state: state.clone(),
                rule_count: guidelines.len(),
            })
            .collect();
        states.sort_by(|a, b| a.state.cmp(&b.state));
        states
    }
}

#[derive(Debug, Default)]
pub struct GuidelineSetBuilder {
    by_state: HashMap<String, Vec<Guideline>>,
}

impl GuidelineSetBuilder {
    pub fn push(&mut self, state: &str, guideline: Guideline) -> &mut Self {
        self.by_state
            .entry(normalize_state(state))
            .or_default()
            .push(guideline);
        self
    }

    pub fn with(mut self, state: &str, guideline: Guideline) -> Self {
        self.push(state, guideline);
        self
    }

    pub fn build(self) -> GuidelineSet {
        GuidelineSet {
            by_state: self.by_state,
        }
    }
}

/// What a failed reload does to the active set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReloadPolicy {
    /// Keep serving the previous snapshot
    #[default]
    #[serde(rename = "retain")]
    RetainOnFailure,
    /// Drop to an empty set
    #[serde(rename = "clear")]
    ClearOnFailure,
}

impl FromStr for ReloadPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "retain" => Ok(ReloadPolicy::RetainOnFailure),
            "clear" => Ok(ReloadPolicy::ClearOnFailure),
            other => Err(format!(
                "unknown reload policy '{}', expected 'retain' or 'clear'",
                other
            )),
        }
    }
}

pub struct GuidelineStore {
    current: RwLock<Arc<GuidelineSet>>,
    policy: ReloadPolicy,
}

impl GuidelineStore {
    pub fn new(policy: ReloadPolicy) -> Self {
        Self::with_guidelines(GuidelineSet::default(), policy)
    }

    pub fn with_guidelines(set: GuidelineSet, policy: ReloadPolicy) -> Self {
        Self {
            current: RwLock::new(Arc::new(set)),
            policy,
        }
    }

    /// The currently published guideline set
    pub fn snapshot(&self) -> Arc<GuidelineSet> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Publish `set`, returning the snapshot it replaced
    pub fn replace(&self, set: GuidelineSet) -> Arc<GuidelineSet> {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *current, Arc::new(set))
    }

    /// Load guidelines from `path` and publish them.
    ///
    /// Load errors are absorbed: they are logged, the reload policy decides
    /// what stays published, and the summary reports zero states loaded.
    pub fn reload_from(&self, path: &Path) -> ReloadSummary {
        info!("Loading guidelines from {}", path.display());
        self.apply(load_guidelines(path))
    }

    /// Publish a finished load, or apply the reload policy to a failed one
    pub fn apply(&self, result: Result<LoadOutcome, LoadError>) -> ReloadSummary {
        match result {
            Ok(outcome) => {
                let summary = ReloadSummary {
                    success: true,
                    states_loaded: outcome.set.state_count(),
                    rules_loaded: outcome.set.rule_count(),
                    skipped_entries: outcome.skipped.len(),
                    error: None,
                };
                self.replace(outcome.set);
                info!(
                    states = summary.states_loaded,
                    rules = summary.rules_loaded,
                    skipped = summary.skipped_entries,
                    "Guidelines published"
                );
                summary
            }
            Err(e) => {
                error!("Guideline load failed: {}", e);
                match self.policy {
                    ReloadPolicy::RetainOnFailure => {
                        warn!("Keeping previously loaded guidelines");
                    }
                    ReloadPolicy::ClearOnFailure => {
                        warn!("Clearing guidelines after failed load");
                        self.replace(GuidelineSet::default());
                    }
                }
                ReloadSummary {
                    success: false,
                    states_loaded: 0,
                    rules_loaded: 0,
                    skipped_entries: 0,
                    error: Some(e.to_string()),
                }
            }
        }
    }
}

impl Default for GuidelineStore {
    fn default() -> Self {
        Self::new(ReloadPolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clause::Clause;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn sample_set() -> GuidelineSet {
        GuidelineSet::builder()
            .with(
                "ca",
                Guideline::new("CA-1", "LLC minimum")
                    .when(Clause::text("businessForm", "=", "LLC"))
                    .require(Clause::number("amount", ">=", 50000.0)),
            )
            .with(
                " CA ",
                Guideline::new("CA-2", "Yield cap").require(Clause::number("yield", "<=", 0.08)),
            )
            .with("TX", Guideline::new("TX-1", "Points cap"))
            .build()
    }

    #[test]
    fn test_set_groups_by_normalized_state() {
        let set = sample_set();
        assert_eq!(set.state_count(), 2);
        assert_eq!(set.rule_count(), 3);

        let ids: Vec<&str> = set.get("Ca").iter().map(Guideline::display_id).collect();
        assert_eq!(ids, vec!["CA-1", "CA-2"]);
        assert!(set.get("NV").is_empty());
    }

    #[test]
    fn test_states_sorted_with_counts() {
        assert_eq!(
            sample_set().states(),
            vec![
                StateRuleCount {
                    state: "CA".to_string(),
                    rule_count: 2
                },
                StateRuleCount {
                    state: "TX".to_string(),
                    rule_count: 1
                },
            ]
        );
    }

    #[test]
    fn test_snapshot_survives_replace() {
        let store = GuidelineStore::with_guidelines(sample_set(), ReloadPolicy::RetainOnFailure);
        let before = store.snapshot();

        store.replace(GuidelineSet::default());

        // A reader holding the old snapshot still sees the complete old set
        assert_eq!(before.rule_count(), 3);
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn test_reload_policy_parsing() {
        assert_eq!("retain".parse::<ReloadPolicy>(), Ok(ReloadPolicy::RetainOnFailure));
        assert_eq!(" CLEAR ".parse::<ReloadPolicy>(), Ok(ReloadPolicy::ClearOnFailure));
        assert!("sometimes".parse::<ReloadPolicy>().is_err());
    }

    #[test]
    fn test_failed_reload_retains_previous_snapshot() {
        let store = GuidelineStore::with_guidelines(sample_set(), ReloadPolicy::RetainOnFailure);
        let summary = store.reload_from(Path::new("/nonexistent/guidelines.json"));

        assert!(!summary.success);
        assert_eq!(summary.states_loaded, 0);
        assert!(summary.error.is_some());
        assert_eq!(*store.snapshot(), sample_set());
    }

    #[test]
    fn test_failed_reload_clears_when_configured() {
        let store = GuidelineStore::with_guidelines(sample_set(), ReloadPolicy::ClearOnFailure);
        let summary = store.reload_from(Path::new("/nonexistent/guidelines.csv"));

        assert!(!summary.success);
        assert_eq!(summary.states_loaded, 0);
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn test_successful_reload_replaces_whole_set() {
        let store = GuidelineStore::with_guidelines(sample_set(), ReloadPolicy::RetainOnFailure);

        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{"CA": [{{"id": "CA-9", "text": "New rule", "requirements": []}}]}}"#
        )
        .unwrap();

        let summary = store.reload_from(file.path());
        assert_eq!(
            summary,
            ReloadSummary {
                success: true,
                states_loaded: 1,
                rules_loaded: 1,
                skipped_entries: 0,
                error: None,
            }
        );

        let snapshot = store.snapshot();
        // Old CA rules are not merged with the new ones and TX is gone
        let ids: Vec<&str> = snapshot.get("CA").iter().map(Guideline::display_id).collect();
        assert_eq!(ids, vec!["CA-9"]);
        assert!(snapshot.get("TX").is_empty());
    }

    #[test]
    fn test_invalid_source_does_not_publish_partial_data() {
        let store = GuidelineStore::with_guidelines(sample_set(), ReloadPolicy::RetainOnFailure);

        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"CA": [{{"id": "CA-9""#).unwrap();

        let summary = store.reload_from(file.path());
        assert!(!summary.success);
        assert_eq!(*store.snapshot(), sample_set());
    }
}
