//! Service layer: device-side orchestration.

pub mod counter_service;

pub use counter_service::CounterService;
