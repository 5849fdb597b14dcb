//! Weekly inspection report entity.

pub mod model;
pub mod rating;
pub mod status;

pub use model::{CreateWeeklyReport, UpdateWeeklyReport, WeeklyReport};
pub use rating::Rating;
pub use status::ReportStatus;
