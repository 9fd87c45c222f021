//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes over the ledger
//! - Uniform error responses derived from the ledger error taxonomy

pub mod routes;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use folio_ledger::{Ledger, NewAccount};
use folio_shared::AppConfig;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The accounting core.
    pub ledger: Arc<Ledger>,
    /// Loaded configuration.
    pub config: Arc<AppConfig>,
    /// Default chart of accounts loaded from `ledger.chart_path`, used by
    /// the import-default route. Empty when no chart file is configured.
    pub default_chart: Arc<Vec<NewAccount>>,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
