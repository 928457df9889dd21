//! Report routes.
//!
//! `GET /reports/{scope}` starts a report run and returns at once;
//! `GET /reports/status/{scope}` reads the scope's status without waiting.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use tally_core::jobs::{StartAck, StatusReport};
use tally_core::reports::ReportScope;
use tally_shared::AppError;
use tracing::debug;

use crate::{AppState, error::ApiError};

/// Creates the report routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reports/{scope}", get(start_report))
        .route("/reports/status/{scope}", get(report_status))
}

fn parse_scope(raw: &str) -> Result<ReportScope, ApiError> {
    raw.parse::<ReportScope>()
        .map_err(|err| AppError::UnsupportedScope(err.0).into())
}

async fn start_report(
    State(state): State<AppState>,
    Path(scope): Path<String>,
) -> Result<Json<StartAck>, ApiError> {
    let scope = parse_scope(&scope)?;
    debug!(%scope, "start requested");
    Ok(Json(state.orchestrator.start(scope)))
}

async fn report_status(
    State(state): State<AppState>,
    Path(scope): Path<String>,
) -> Result<Json<StatusReport>, ApiError> {
    let scope = parse_scope(&scope)?;
    Ok(Json(state.orchestrator.status(scope)))
}
