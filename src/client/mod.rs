//! Panel side: the connection manager and its single connection slot.
//!
//! ```text
//! ConnectionHandle::send ──► ConnectionSlot ──► session loop ──► device
//!                                                   │
//! EventBus<PanelEvent> ◄────────────────────────────┘
//! ```

pub mod connection;
pub mod session;
pub mod slot;

pub use connection::{ConnectionHandle, ConnectionManager};
pub use slot::ConnectionSlot;
