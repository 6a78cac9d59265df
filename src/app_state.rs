//! Shared device state injected into all Axum handlers.

use std::sync::Arc;

use tokio::sync::watch;

use crate::service::CounterService;

/// Shared state available to device handlers via Axum's `State`
/// extractor.
#[derive(Debug, Clone)]
pub struct DeviceState {
    /// Counter service for all command handling.
    pub counter: Arc<CounterService>,
    /// Flips to `true` when the device shuts down; open sockets close.
    pub shutdown: watch::Receiver<bool>,
}
