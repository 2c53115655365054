//! Health check endpoints.

use crate::state::AppState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::{routing::get, Json, Router};
use chrono::{SecondsFormat, Utc};
use serde_json::json;

/// Registers health check routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// Simple health check endpoint.
///
/// Reports the configured environment name and the current time,
/// without requiring authentication.
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "OK",
        "environment": state.config.environment,
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    }))
}
