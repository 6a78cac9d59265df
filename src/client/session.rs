//! Read/write loop for one open panel session.
//!
//! Forwards inbound text frames to the event bus and writes queued
//! commands to the socket until the device closes, the transport fails,
//! or the panel is told to shut down.

use chrono::Utc;
use futures_util::{SinkExt, StreamExt};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::{mpsc, watch};
use tokio_tungstenite::WebSocketStream;
use tokio_tungstenite::tungstenite::Message;

use crate::domain::{EventBus, PanelEvent};
use crate::ws::messages::{Command, CommandMessage};

/// Why a session loop returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The socket closed or failed; the caller should reconnect.
    Closed,
    /// Shutdown was requested; the caller should stop.
    Shutdown,
}

/// Runs the read/write loop for a single open socket.
pub async fn run_session<S>(
    stream: WebSocketStream<S>,
    mut outbound: mpsc::UnboundedReceiver<Command>,
    events: &EventBus<PanelEvent>,
    shutdown: &mut watch::Receiver<bool>,
) -> SessionEnd
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let (mut ws_tx, mut ws_rx) = stream.split();

    loop {
        tokio::select! {
            // Frame from the device
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        events.publish(PanelEvent::Message {
                            payload: text.as_str().to_owned(),
                            timestamp: Utc::now(),
                        });
                    }
                    Some(Ok(Message::Close(_))) | None => return SessionEnd::Closed,
                    Some(Err(e)) => {
                        tracing::warn!(error = %e, "websocket read failed");
                        return SessionEnd::Closed;
                    }
                    _ => {}
                }
            }
            // Command queued by the UI
            command = outbound.recv() => {
                let Some(command) = command else {
                    return SessionEnd::Closed;
                };
                let text = match CommandMessage::from(command).to_text() {
                    Ok(text) => text,
                    Err(e) => {
                        tracing::warn!(error = %e, %command, "failed to encode command");
                        continue;
                    }
                };
                if let Err(e) = ws_tx.send(Message::text(text)).await {
                    tracing::warn!(error = %e, %command, "websocket write failed");
                    return SessionEnd::Closed;
                }
                tracing::debug!(%command, "command sent");
                events.publish(PanelEvent::CommandSent {
                    command,
                    timestamp: Utc::now(),
                });
            }
            _ = shutdown.changed() => {
                let _ = ws_tx.send(Message::Close(None)).await;
                return SessionEnd::Shutdown;
            }
        }
    }
}
