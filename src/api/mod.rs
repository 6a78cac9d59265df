//! HTTP layer: the control page, health check, and router composition.

pub mod handlers;

use axum::Router;

use crate::app_state::DeviceState;

/// Builds the device's HTTP router.
///
/// Unknown paths answer `404 text/plain "File not found"`.
pub fn build_router() -> Router<DeviceState> {
    Router::new()
        .merge(handlers::page::routes())
        .merge(handlers::system::routes())
        .fallback(handlers::page::not_found_handler)
}
