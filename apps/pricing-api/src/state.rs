//! Application state for the pricing API

use crate::config::ApiConfig;
use guideline_engine::{GuidelineEngine, GuidelineStore};
use std::sync::Arc;
use tracing::{info, warn};

pub struct AppState {
    pub engine: GuidelineEngine,
    pub config: ApiConfig,
}

impl AppState {
    /// Build the engine and run the initial guideline load.
    ///
    /// A failed initial load is not fatal: the service starts with whatever
    /// the reload policy leaves published and can be reloaded later.
    pub fn new(config: ApiConfig) -> Self {
        let store = Arc::new(GuidelineStore::new(config.reload_policy));
        let engine = GuidelineEngine::new(store);

        let summary = engine.reload(&config.guidelines_path);
        if summary.success {
            info!(
                "Loaded {} guidelines for {} states",
                summary.rules_loaded, summary.states_loaded
            );
        } else {
            warn!(
                "Starting without guidelines from {}: {}",
                config.guidelines_path.display(),
                summary.error.as_deref().unwrap_or("unknown error")
            );
        }

        Self { engine, config }
    }
}
