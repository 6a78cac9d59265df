//! Domain layer: session identity, panel events, the event bus, and the
//! device counter.

pub mod client_id;
pub mod counter;
pub mod event_bus;
pub mod panel_event;

pub use client_id::ClientId;
pub use counter::Counter;
pub use event_bus::EventBus;
pub use panel_event::PanelEvent;
