//! Ledgerbook API Server
//!
//! Main entry point for the Ledgerbook backend service.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use ledgerbook_api::{AppState, create_router};
use ledgerbook_shared::AppConfig;
use ledgerbook_shared::config::LoggingConfig;
use ledgerbook_store::{MemoryStore, seed_demo};

fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter));
    tracing_subscriber::registry()
        .with(filter)
        .with(logging.json.then(|| fmt::layer().json()))
        .with((!logging.json).then(fmt::layer))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    init_tracing(&config.logging);

    let state = AppState::new(Arc::new(MemoryStore::new()));
    if config.store.seed_demo {
        let chart_id = seed_demo(state.ledger.as_ref()).await?;
        info!(chart_id = %chart_id, "Demo data loaded");
    }

    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
