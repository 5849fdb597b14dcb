//! Notification template and per-recipient delivery records.

pub mod kind;
pub mod model;
pub mod status;

pub use kind::NotificationKind;
pub use model::{CreateNotification, Notification, UserNotification};
pub use status::NotificationStatus;
