//! Lifecycle and status events emitted by the panel connection.
//!
//! The connection manager publishes a [`PanelEvent`] through the
//! [`super::EventBus`] for every lifecycle change and every inbound text
//! frame. The UI binder subscribes to drive the display.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::ClientId;
use crate::ws::messages::Command;

/// Event emitted by the panel connection loop.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum PanelEvent {
    /// A connect attempt is starting.
    Connecting {
        /// 1-based attempt number since the loop started.
        attempt: u64,
        /// Gateway URL being dialled.
        url: String,
        /// Attempt timestamp.
        timestamp: DateTime<Utc>,
    },

    /// The socket reached the open state.
    Opened {
        /// Session identifier for this connection.
        client_id: ClientId,
        /// Open timestamp.
        timestamp: DateTime<Utc>,
    },

    /// The socket closed, or the connect attempt failed.
    Closed {
        /// Session identifier, if the attempt ever opened.
        client_id: Option<ClientId>,
        /// Close timestamp.
        timestamp: DateTime<Utc>,
    },

    /// A text frame arrived from the device.
    ///
    /// The payload is forwarded untouched; parsing happens in the UI
    /// binder so a malformed frame never disturbs the connection loop.
    Message {
        /// Raw frame text.
        payload: String,
        /// Receive timestamp.
        timestamp: DateTime<Utc>,
    },

    /// A command frame was written to the socket.
    CommandSent {
        /// The command sent.
        command: Command,
        /// Send timestamp.
        timestamp: DateTime<Utc>,
    },
}

impl PanelEvent {
    /// Returns the event type as a static string.
    #[must_use]
    pub const fn event_type_str(&self) -> &'static str {
        match self {
            Self::Connecting { .. } => "connecting",
            Self::Opened { .. } => "opened",
            Self::Closed { .. } => "closed",
            Self::Message { .. } => "message",
            Self::CommandSent { .. } => "command_sent",
        }
    }
}
