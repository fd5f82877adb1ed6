//! Router configuration for the HTTP dashboard.
//!
//! This module sets up all routes and middleware (compression, tracing) and
//! creates the axum router ready for serving.

use axum::{routing::get, Router};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/sites", get(handlers::list_sites))
        .route("/pie", get(handlers::get_pie))
        .route("/scatter", get(handlers::get_scatter));

    Router::new()
        .route("/", get(handlers::dashboard))
        .route("/health", get(handlers::health_check))
        .nest("/api", api)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
