//! UI binder: control ids, display surfaces, and the panel itself.

pub mod controls;
pub mod display;
pub mod panel;

pub use controls::ControlId;
pub use display::{MemoryDisplay, StatusDisplay, TerminalDisplay};
pub use panel::Panel;
