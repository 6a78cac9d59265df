//! # counter-remote
//!
//! Control panel and device simulator for a networked counter controller.
//!
//! The device keeps a counter that ticks once a second and pushes its
//! value to every WebSocket client as `{"count": n}`. The panel holds one
//! connection to the device, shows the pushed value, and sends the five
//! button commands (`reset`, `stop`, `increase`, `decrease`, `start`)
//! back as `{"command": name}`.
//!
//! ## Architecture
//!
//! ```text
//! Panel                                   Device
//!   │                                       │
//!   ├── UI binder (ui/)                     ├── HTTP page + health (api/)
//!   │     ├── ControlId → Command           ├── WS endpoint (ws/)
//!   │     └── StatusDisplay ◄─┐             │
//!   │                         │             ├── CounterService (service/)
//!   ├── ConnectionManager (client/)         │     ├── Counter (domain/)
//!   │     └── ConnectionSlot  │             │     └── EventBus<StatusMessage>
//!   │                         │             │
//!   └── EventBus<PanelEvent> ─┘             └── tick + broadcast tasks
//!            ▲                                        │
//!            └────────── ws://<host>:81/ ─────────────┘
//! ```

pub mod api;
pub mod app_state;
pub mod client;
pub mod config;
pub mod device;
pub mod domain;
pub mod error;
pub mod logging;
pub mod service;
pub mod ui;
pub mod ws;
