//! Device-side WebSocket connection loop.
//!
//! Handles the read/write loop for a single panel connection: applies
//! incoming commands to the counter and forwards status frames.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::{broadcast, watch};

use super::messages::{Command, RawCommandFrame, StatusMessage};
use crate::domain::ClientId;
use crate::service::CounterService;

/// Runs the read/write loop for a single WebSocket client.
///
/// - Reads command frames and applies them to the counter.
/// - Forwards every status frame from the [`broadcast::Receiver`].
pub async fn run_connection(
    client_id: ClientId,
    socket: WebSocket,
    mut status_rx: broadcast::Receiver<StatusMessage>,
    counter: Arc<CounterService>,
    mut shutdown: watch::Receiver<bool>,
) {
    tracing::info!(%client_id, "client connected");
    let (mut ws_tx, mut ws_rx) = socket.split();

    loop {
        tokio::select! {
            // Incoming frame from the panel
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        handle_text_message(client_id, text.as_str(), &counter).await;
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(e)) => {
                        tracing::debug!(%client_id, error = %e, "websocket read failed");
                        break;
                    }
                    _ => {}
                }
            }
            // Status frame from the broadcaster
            status = status_rx.recv() => {
                match status {
                    Ok(status) => {
                        let Ok(json) = status.to_text() else {
                            continue;
                        };
                        if ws_tx.send(Message::text(json)).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::debug!(%client_id, lagged = n, "client lagged behind status bus");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
            _ = shutdown.changed() => {
                let _ = ws_tx.send(Message::Close(None)).await;
                break;
            }
        }
    }

    tracing::info!(%client_id, "client disconnected");
}

/// Applies one text frame from a client. Bad frames are logged and
/// ignored.
async fn handle_text_message(client_id: ClientId, text: &str, counter: &CounterService) {
    let frame = match serde_json::from_str::<RawCommandFrame>(text) {
        Ok(frame) => frame,
        Err(e) => {
            tracing::warn!(%client_id, error = %e, "deserialize failed");
            return;
        }
    };
    let Some(name) = frame.command else {
        tracing::debug!(%client_id, "frame without command");
        return;
    };

    match name.parse::<Command>() {
        Ok(command) => {
            let count = counter.apply(command).await;
            tracing::info!(%client_id, %command, count, "received command");
        }
        Err(e) => {
            tracing::warn!(%client_id, error = %e, "ignoring command");
        }
    }
}
