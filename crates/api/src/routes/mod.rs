//! API route definitions.

use axum::{Router, http::Uri};
use tally_shared::AppError;

use crate::{AppState, error::ApiError};

pub mod health;
pub mod reports;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(reports::routes())
}

/// Fallback for unknown paths.
pub async fn not_found(uri: Uri) -> ApiError {
    AppError::NotFound(uri.path().to_string()).into()
}
