//! Weekly report management.

pub mod service;

pub use service::{ReportImages, ReportSection, ReportService};
