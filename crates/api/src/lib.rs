//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - Report start and status routes
//! - Health check
//! - JSON error responses

pub mod error;
pub mod routes;

use axum::Router;
use std::sync::Arc;
use tally_core::jobs::JobOrchestrator;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Report job orchestrator.
    pub orchestrator: Arc<JobOrchestrator>,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .fallback(routes::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
