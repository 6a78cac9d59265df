//! WebSocket layer: wire messages plus the device-side endpoint.
//!
//! The device serves its endpoint at `ws://<host>:81/`. Panels send
//! command frames and receive a status frame every broadcast period.

pub mod connection;
pub mod handler;
pub mod messages;
