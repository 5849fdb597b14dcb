//! Map marker management.

pub mod service;

pub use service::MarkerService;
