//! Pricing guideline API
//!
//! Provides REST endpoints for:
//! - Deal evaluation against state guidelines
//! - Guideline reload and listing

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod config;
pub mod error;
pub mod handlers;
pub mod state;

pub use config::ApiConfig;
pub use state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    // CORS configuration for web clients
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/evaluate", post(handlers::evaluate))
        .route("/api/guidelines", get(handlers::list_states))
        // Static segment wins over `:state`, so `GET /api/guidelines/reload` is a 405
        .route("/api/guidelines/reload", post(handlers::reload_guidelines))
        .route("/api/guidelines/:state", get(handlers::state_guidelines))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
