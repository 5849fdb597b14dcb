//! Notification entity models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::kind::NotificationKind;
use super::status::NotificationStatus;

/// An immutable notification template shared by all recipients.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Notification {
    /// Unique notification identifier.
    pub id: Uuid,
    /// What triggered this notification.
    pub kind: NotificationKind,
    /// Notification title.
    pub title: String,
    /// Notification body text.
    pub message: String,
    /// The user who sent it.
    pub sender_id: Uuid,
    /// Intended recipients; `None` for a broadcast.
    pub recipient_ids: Option<Vec<Uuid>>,
    /// When the notification was created.
    pub created_at: DateTime<Utc>,
}

/// The per-recipient, mutable-state projection of a notification.
///
/// One record is created per recipient at fan-out time; the sender
/// never receives one.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserNotification {
    /// Unique delivery record identifier.
    pub id: Uuid,
    /// The recipient user.
    pub user_id: Uuid,
    /// Reference to the shared template.
    pub notification_id: Uuid,
    /// Read state for this recipient.
    pub status: NotificationStatus,
    /// When the recipient read it.
    pub read_at: Option<DateTime<Utc>>,
    /// When the delivery record was created (shared across one fan-out).
    pub created_at: DateTime<Utc>,
}

/// Data required to create and fan out a notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNotification {
    /// What triggered this notification.
    pub kind: NotificationKind,
    /// Notification title.
    pub title: String,
    /// Notification body text.
    pub message: String,
    /// The sending user.
    pub sender_id: Uuid,
    /// Intended recipients; `None` for a broadcast to everyone.
    pub recipient_ids: Option<Vec<Uuid>>,
}

impl UserNotification {
    /// Check if this delivery record is still unread.
    pub fn is_unread(&self) -> bool {
        self.status == NotificationStatus::Unread
    }
}
