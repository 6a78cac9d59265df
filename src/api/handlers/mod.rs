//! HTTP route handlers.

pub mod page;
pub mod system;
