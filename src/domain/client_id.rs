//! Identifier for a single WebSocket session.
//!
//! Every connection gets a fresh [`ClientId`], on the panel when a session
//! opens and on the device when a client is accepted. A reconnect always
//! yields a new id, so a closed session can never be mistaken for its
//! replacement.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier for one WebSocket session (UUID v4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(uuid::Uuid);

impl ClientId {
    /// Creates a new random `ClientId`.
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Returns the inner [`uuid::Uuid`].
    #[must_use]
    pub const fn as_uuid(&self) -> &uuid::Uuid {
        &self.0
    }
}

impl Default for ClientId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
