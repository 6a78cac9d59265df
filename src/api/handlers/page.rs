//! The control page served from the device's web port.

use axum::Router;
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse};
use axum::routing::get;

use crate::app_state::DeviceState;

const INDEX_HTML: &str = include_str!("../../../assets/index.html");
const SCRIPT_JS: &str = include_str!("../../../assets/script.js");

/// `GET /` — the control page.
pub async fn index_handler() -> impl IntoResponse {
    Html(INDEX_HTML)
}

/// `GET /script.js` — the page script.
pub async fn script_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript")],
        SCRIPT_JS,
    )
}

/// Fallback for every unknown path.
pub async fn not_found_handler() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        [(header::CONTENT_TYPE, "text/plain")],
        "File not found",
    )
}

/// Page routes.
pub fn routes() -> Router<DeviceState> {
    Router::new()
        .route("/", get(index_handler))
        .route("/script.js", get(script_handler))
}
