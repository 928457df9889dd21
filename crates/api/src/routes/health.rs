//! Liveness endpoint.

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use tally_core::jobs::JobStatus;
use tally_core::reports::ReportScope;

use crate::AppState;

/// Liveness report.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Always `healthy` when the server answers.
    pub status: &'static str,
    /// Crate version.
    pub version: &'static str,
    /// Scopes whose latest run has not reported back yet.
    pub running_reports: usize,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let store = state.orchestrator.store();
    let running_reports = ReportScope::ALL
        .into_iter()
        .filter(|&scope| store.snapshot(scope).status == JobStatus::Starting)
        .count();

    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        running_reports,
    })
}

/// Creates the liveness route.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
