//! The single connection slot.
//!
//! [`ConnectionSlot`] holds at most one live session at a time. A session
//! is installed when its socket opens and cleared when it closes; a new
//! session always replaces the old one wholesale, so a closed connection
//! is never written to again.

use tokio::sync::{RwLock, mpsc};

use crate::domain::ClientId;
use crate::error::PanelError;
use crate::ws::messages::Command;

/// Outbound half of a live session.
#[derive(Debug)]
struct LiveConnection {
    client_id: ClientId,
    outbound: mpsc::UnboundedSender<Command>,
}

/// Ownership slot for the one live connection.
#[derive(Debug, Default)]
pub struct ConnectionSlot {
    live: RwLock<Option<LiveConnection>>,
}

impl ConnectionSlot {
    /// Creates an empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a freshly opened session, returning the id of the session
    /// it replaced, if any.
    pub(crate) async fn install(
        &self,
        client_id: ClientId,
        outbound: mpsc::UnboundedSender<Command>,
    ) -> Option<ClientId> {
        let mut live = self.live.write().await;
        live.replace(LiveConnection {
            client_id,
            outbound,
        })
        .map(|previous| previous.client_id)
    }

    /// Clears the slot if it still holds `client_id`.
    ///
    /// Returns `true` if the session was removed.
    pub(crate) async fn clear(&self, client_id: ClientId) -> bool {
        let mut live = self.live.write().await;
        if live.as_ref().is_some_and(|l| l.client_id == client_id) {
            *live = None;
            true
        } else {
            false
        }
    }

    /// Returns the id of the live session, if any.
    pub async fn current(&self) -> Option<ClientId> {
        self.live.read().await.as_ref().map(|l| l.client_id)
    }

    /// Queues `command` on the live session.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::NotConnected`] if the slot is empty or the
    /// session has already shut down its writer.
    pub async fn send(&self, command: Command) -> Result<(), PanelError> {
        let live = self.live.read().await;
        let Some(live) = live.as_ref() else {
            return Err(PanelError::NotConnected);
        };
        live.outbound
            .send(command)
            .map_err(|_| PanelError::NotConnected)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_slot_rejects_send() {
        let slot = ConnectionSlot::new();
        assert!(matches!(
            slot.send(Command::Start).await,
            Err(PanelError::NotConnected)
        ));
    }

    #[tokio::test]
    async fn installed_session_receives_commands() {
        let slot = ConnectionSlot::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let id = ClientId::new();
        assert!(slot.install(id, tx).await.is_none());

        tokio_test::assert_ok!(slot.send(Command::Increase).await);
        assert_eq!(rx.recv().await, Some(Command::Increase));
        assert_eq!(slot.current().await, Some(id));
    }

    #[tokio::test]
    async fn install_replaces_previous_session() {
        let slot = ConnectionSlot::new();
        let (old_tx, mut old_rx) = mpsc::unbounded_channel();
        let (new_tx, mut new_rx) = mpsc::unbounded_channel();
        let old = ClientId::new();
        let new = ClientId::new();

        slot.install(old, old_tx).await;
        assert_eq!(slot.install(new, new_tx).await, Some(old));

        tokio_test::assert_ok!(slot.send(Command::Reset).await);
        assert_eq!(new_rx.recv().await, Some(Command::Reset));
        // The replaced session's sender was dropped with it.
        assert_eq!(old_rx.recv().await, None);
    }

    #[tokio::test]
    async fn stale_clear_keeps_current_session() {
        let slot = ConnectionSlot::new();
        let (tx, _rx) = mpsc::unbounded_channel();
        let current = ClientId::new();
        slot.install(current, tx).await;

        assert!(!slot.clear(ClientId::new()).await);
        assert_eq!(slot.current().await, Some(current));
        assert!(slot.clear(current).await);
        assert!(slot.current().await.is_none());
    }

    #[tokio::test]
    async fn send_after_reader_dropped_is_not_connected() {
        let slot = ConnectionSlot::new();
        let (tx, rx) = mpsc::unbounded_channel();
        slot.install(ClientId::new(), tx).await;
        drop(rx);
        assert!(matches!(
            slot.send(Command::Stop).await,
            Err(PanelError::NotConnected)
        ));
    }
}
