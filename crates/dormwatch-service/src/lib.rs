//! # dormwatch-service
//!
//! Business logic services. Each service owns the repositories and
//! collaborators it needs and is handed a [`RequestContext`] describing
//! who is acting.

pub mod auth;
pub mod context;
pub mod marker;
pub mod notification;
pub mod report;
pub mod user;

pub use auth::AuthService;
pub use context::RequestContext;
pub use marker::MarkerService;
pub use notification::NotificationService;
pub use report::ReportService;
pub use user::UserService;
