//! Notification creation, fan-out, and read-state tracking.

pub mod service;

pub use service::{NotificationService, UserNotificationDetails};
