/// Health check API routes
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
    pub version: String,
}

/// GET /api/health - Health check endpoint
/// Reports 503 while the database cannot be reached
pub async fn health(State(app_state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let (status, database) = match app_state.db.ping().await {
        Ok(()) => (StatusCode::OK, "ok"),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
        }
    };

    let body = HealthResponse {
        status: if status == StatusCode::OK { "ok" } else { "degraded" }.to_string(),
        database: database.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (status, Json(body))
}
