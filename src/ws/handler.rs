//! Axum WebSocket upgrade handler.

use axum::extract::State;
use axum::extract::ws::WebSocketUpgrade;
use axum::response::IntoResponse;

use super::connection::run_connection;
use crate::app_state::DeviceState;
use crate::domain::ClientId;

/// `GET /` on the WebSocket port: upgrade to a panel session.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<DeviceState>,
) -> impl IntoResponse {
    let status_rx = state.counter.status_bus().subscribe();
    let counter = std::sync::Arc::clone(&state.counter);
    let shutdown = state.shutdown.clone();
    let client_id = ClientId::new();

    ws.on_upgrade(move |socket| run_connection(client_id, socket, status_rx, counter, shutdown))
}
