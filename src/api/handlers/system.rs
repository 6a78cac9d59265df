//! System endpoints: health check.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;

use crate::app_state::DeviceState;

/// Health check response.
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    timestamp: String,
    version: String,
    count: i64,
    running: bool,
    clients: usize,
}

/// `GET /health` — Device health and counter state.
pub async fn health_handler(State(state): State<DeviceState>) -> impl IntoResponse {
    let counter = state.counter.snapshot().await;
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            count: counter.count(),
            running: counter.is_running(),
            clients: state.counter.status_bus().receiver_count(),
        }),
    )
}

/// System routes.
pub fn routes() -> Router<DeviceState> {
    Router::new().route("/health", get(health_handler))
}
