//! Pricing API server

use anyhow::Result;
use pricing_api::{router, ApiConfig, AppState};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pricing_api=info".parse()?)
                .add_directive("guideline_engine=info".parse()?)
                .add_directive("tower_http=debug".parse()?),
        )
        .init();

    let config = ApiConfig::from_env()?;
    info!("Initializing pricing API...");
    let state = Arc::new(AppState::new(config.clone()));

    let app = router(state);

    let addr = config.socket_addr();
    info!("Starting pricing API on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
