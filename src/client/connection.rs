//! Connection manager: owns the panel's one WebSocket connection.
//!
//! [`ConnectionManager::spawn`] starts a background task that dials the
//! gateway, runs the session until it closes, waits the fixed reconnect
//! delay and dials again. The loop has no retry limit; it ends only when
//! [`ConnectionHandle::disconnect`] is called or every handle is dropped.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{Mutex, broadcast, mpsc, watch};
use tokio::task::JoinHandle;

use super::session::{SessionEnd, run_session};
use super::slot::ConnectionSlot;
use crate::config::PanelConfig;
use crate::domain::{ClientId, EventBus, PanelEvent};
use crate::error::PanelError;
use crate::ws::messages::Command;

/// Builds connection loops for one gateway.
///
/// The manager is cheap to clone; each [`spawn`](Self::spawn) starts an
/// independent loop, so a stopped panel can be restarted by spawning
/// again.
#[derive(Debug, Clone)]
pub struct ConnectionManager {
    config: PanelConfig,
    events: EventBus<PanelEvent>,
}

impl ConnectionManager {
    /// Creates a manager publishing lifecycle events on `events`.
    #[must_use]
    pub fn new(config: PanelConfig, events: EventBus<PanelEvent>) -> Self {
        Self { config, events }
    }

    /// Returns the event bus the loop publishes on.
    #[must_use]
    pub fn events(&self) -> &EventBus<PanelEvent> {
        &self.events
    }

    /// Starts the connect/reconnect loop on the current tokio runtime.
    #[must_use]
    pub fn spawn(&self) -> ConnectionHandle {
        let slot = Arc::new(ConnectionSlot::new());
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let task = tokio::spawn(connection_loop(
            self.config.clone(),
            Arc::clone(&slot),
            self.events.clone(),
            shutdown_rx,
        ));

        ConnectionHandle {
            slot,
            events: self.events.clone(),
            shutdown: Arc::new(shutdown_tx),
            task: Arc::new(Mutex::new(Some(task))),
        }
    }
}

/// Handle to a running connection loop.
///
/// Clones share the same loop. Commands go out through
/// [`send`](Self::send); status arrives as [`PanelEvent::Message`] on
/// [`subscribe`](Self::subscribe).
#[derive(Debug, Clone)]
pub struct ConnectionHandle {
    slot: Arc<ConnectionSlot>,
    events: EventBus<PanelEvent>,
    shutdown: Arc<watch::Sender<bool>>,
    task: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl ConnectionHandle {
    /// Sends `command` over the current connection.
    ///
    /// Commands are never queued across connections: if no socket is open
    /// the command is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::NotConnected`] if no connection is open.
    pub async fn send(&self, command: Command) -> Result<(), PanelError> {
        self.slot.send(command).await
    }

    /// Returns `true` while a socket is open.
    pub async fn is_connected(&self) -> bool {
        self.slot.current().await.is_some()
    }

    /// Returns the id of the open session, if any.
    pub async fn client_id(&self) -> Option<ClientId> {
        self.slot.current().await
    }

    /// Subscribes to lifecycle and inbound-frame events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<PanelEvent> {
        self.events.subscribe()
    }

    /// Returns `true` once a stop has been requested.
    #[must_use]
    pub fn is_stopping(&self) -> bool {
        *self.shutdown.borrow()
    }

    /// Stops the reconnect loop, closing any open socket, and waits for
    /// the loop task to finish. Calling it again is a no-op.
    pub async fn disconnect(&self) {
        self.shutdown.send_replace(true);
        let task = self.task.lock().await.take();
        if let Some(task) = task
            && let Err(e) = task.await
        {
            tracing::warn!(error = %e, "connection loop task failed");
        }
    }
}

/// The connect → session → delay → connect loop.
async fn connection_loop(
    config: PanelConfig,
    slot: Arc<ConnectionSlot>,
    events: EventBus<PanelEvent>,
    mut shutdown: watch::Receiver<bool>,
) {
    let url = config.gateway_url();
    let mut attempt: u64 = 0;

    loop {
        if *shutdown.borrow() {
            break;
        }

        attempt += 1;
        tracing::info!(attempt, %url, "trying to open a websocket connection");
        events.publish(PanelEvent::Connecting {
            attempt,
            url: url.clone(),
            timestamp: Utc::now(),
        });

        let dialled = tokio::select! {
            result = tokio_tungstenite::connect_async(url.as_str()) => Some(result),
            _ = shutdown.changed() => None,
        };
        let Some(result) = dialled else {
            break;
        };

        let mut session_id = None;
        match result {
            Ok((stream, _response)) => {
                let client_id = ClientId::new();
                session_id = Some(client_id);

                let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
                if let Some(previous) = slot.install(client_id, outbound_tx).await {
                    tracing::warn!(%previous, "replacing a session that was never cleared");
                }
                tracing::info!(%client_id, "connection opened");
                events.publish(PanelEvent::Opened {
                    client_id,
                    timestamp: Utc::now(),
                });

                let end = run_session(stream, outbound_rx, &events, &mut shutdown).await;
                slot.clear(client_id).await;

                if end == SessionEnd::Shutdown {
                    tracing::info!(%client_id, "connection closed");
                    events.publish(PanelEvent::Closed {
                        client_id: session_id,
                        timestamp: Utc::now(),
                    });
                    break;
                }
            }
            Err(e) => {
                tracing::debug!(error = %e, "connect attempt failed");
            }
        }

        tracing::info!(delay = ?config.reconnect_delay, "connection closed");
        events.publish(PanelEvent::Closed {
            client_id: session_id,
            timestamp: Utc::now(),
        });

        tokio::select! {
            () = tokio::time::sleep(config.reconnect_delay) => {}
            _ = shutdown.changed() => break,
        }
    }

    tracing::debug!(attempts = attempt, "connection loop stopped");
}
