//! HTTP handlers for the pricing API

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use shared_types::{Deal, EvaluationReport, FormattedGuideline, ReloadSummary, StateRuleCount};
use std::sync::Arc;

use crate::error::ApiError;
use crate::state::AppState;

/// Health check endpoint
pub async fn health() -> &'static str {
    "OK"
}

/// Evaluate a deal against its state's guidelines
pub async fn evaluate(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Deal>, JsonRejection>,
) -> Result<Json<EvaluationReport>, ApiError> {
    let Json(deal) = payload.map_err(|e| ApiError::InvalidRequest(e.body_text()))?;

    let report = state.engine.evaluate(&deal)?;
    Ok(Json(report))
}

/// Re-read the guideline source. Load failures are reported in the summary.
pub async fn reload_guidelines(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ReloadSummary>, ApiError> {
    let summary = tokio::task::spawn_blocking(move || {
        state.engine.reload(&state.config.guidelines_path)
    })
    .await
    .map_err(|e| ApiError::Internal(e.into()))?;

    tracing::info!(
        "Reload finished: success={} states={} rules={}",
        summary.success,
        summary.states_loaded,
        summary.rules_loaded
    );

    Ok(Json(summary))
}

/// States with loaded guidelines
pub async fn list_states(State(state): State<Arc<AppState>>) -> Json<Vec<StateRuleCount>> {
    Json(state.engine.states())
}

/// Formatted guidelines of one state; empty for unknown states
pub async fn state_guidelines(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Json<Vec<FormattedGuideline>> {
    Json(state.engine.guidelines_for(&code))
}
