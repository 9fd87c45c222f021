//! Folio API Server
//!
//! Main entry point for the Folio accounting service.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio_api::{AppState, create_router};
use folio_ledger::{Ledger, NewAccount};
use folio_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "folio=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().context("failed to load configuration")?;
    info!(
        currency = %config.ledger.currency,
        minor_unit_scale = config.ledger.minor_unit_scale,
        lock_timeout_ms = config.ledger.lock_timeout_ms,
        "ledger configuration loaded"
    );

    // Load the default chart of accounts, if configured
    let default_chart: Vec<NewAccount> = match &config.ledger.chart_path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read chart file {path}"))?;
            let chart: Vec<NewAccount> = serde_json::from_str(&raw)
                .with_context(|| format!("failed to parse chart file {path}"))?;
            info!(path = %path, accounts = chart.len(), "default chart loaded");
            chart
        }
        None => Vec::new(),
    };

    // Create application state
    let ledger = Arc::new(Ledger::new(&config.ledger));
    let state = AppState {
        ledger,
        config: Arc::new(config.clone()),
        default_chart: Arc::new(default_chart),
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
