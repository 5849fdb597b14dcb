//! Notification creation, per-recipient fan-out, and unread-count
//! change signals.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use dormwatch_cache::ChangePublisher;
use dormwatch_core::error::AppError;
use dormwatch_database::repositories::{NotificationRepository, UserRepository};
use dormwatch_entity::notification::{
    CreateNotification, Notification, NotificationStatus, UserNotification,
};

use crate::context::RequestContext;

/// A per-recipient record joined with its shared template.
#[derive(Debug, Clone)]
pub struct UserNotificationDetails {
    /// The per-recipient delivery record.
    pub record: UserNotification,
    /// The shared notification template.
    pub notification: Notification,
}

/// Creates notifications, fans them out to recipients, and signals
/// unread-count changes over pub/sub.
#[derive(Clone)]
pub struct NotificationService {
    notifications: Arc<NotificationRepository>,
    users: Arc<UserRepository>,
    publisher: ChangePublisher,
}

impl NotificationService {
    /// Creates a new notification service.
    pub fn new(
        notifications: Arc<NotificationRepository>,
        users: Arc<UserRepository>,
        publisher: ChangePublisher,
    ) -> Self {
        Self {
            notifications,
            users,
            publisher,
        }
    }

    /// Create a notification and fan it out.
    ///
    /// With explicit recipients the list is deduplicated and the
    /// sender dropped from it; without recipients it is a broadcast to
    /// every user except the sender. Each recipient gets one unread
    /// delivery record sharing the template's `created_at`, and one
    /// change signal on their channel.
    pub async fn create_notification(
        &self,
        ctx: &RequestContext,
        mut input: CreateNotification,
    ) -> Result<Notification, AppError> {
        if input.title.trim().is_empty() {
            return Err(AppError::validation("Notification title must not be empty"));
        }
        input.sender_id = ctx.user_id;

        let recipients = match &input.recipient_ids {
            Some(ids) => filter_recipients(ids, ctx.user_id),
            None => self.users.find_all_ids_except(ctx.user_id).await?,
        };

        let (notification, delivered) = self
            .notifications
            .create_and_fan_out(&input, &recipients)
            .await?;

        info!(
            notification_id = %notification.id,
            sender_id = %ctx.user_id,
            recipients = recipients.len(),
            delivered,
            "Notification created and fanned out"
        );

        for recipient in &recipients {
            self.publish_unread_changed(*recipient).await;
        }

        Ok(notification)
    }

    /// Fetch a per-recipient record with its template resolved.
    pub async fn get_notification(
        &self,
        ctx: &RequestContext,
        id: Uuid,
    ) -> Result<UserNotificationDetails, AppError> {
        let record = self
            .notifications
            .find_user_notification(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Notification {id} not found")))?;

        if record.user_id != ctx.user_id {
            return Err(AppError::authorization(
                "Notification belongs to another user",
            ));
        }

        let notification = self
            .notifications
            .find_template(record.notification_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!(
                    "Notification template {} not found",
                    record.notification_id
                ))
            })?;

        Ok(UserNotificationDetails {
            record,
            notification,
        })
    }

    /// List the current user's notifications, newest first.
    ///
    /// An empty status filter means every status; non-positive bounds
    /// mean "all" / "from the start".
    pub async fn list_notifications(
        &self,
        ctx: &RequestContext,
        statuses: &[NotificationStatus],
        limit: i64,
        offset: i64,
    ) -> Result<Vec<UserNotification>, AppError> {
        self.notifications
            .list_for_user(ctx.user_id, statuses, limit, offset)
            .await
    }

    /// Count the current user's unread notifications.
    pub async fn unread_count(&self, ctx: &RequestContext) -> Result<i64, AppError> {
        self.notifications.count_unread(ctx.user_id).await
    }

    /// Mark one of the current user's notifications as read.
    ///
    /// Idempotent: marking an already-read record returns it unchanged
    /// and publishes nothing, since the unread count did not move.
    pub async fn mark_as_read(
        &self,
        ctx: &RequestContext,
        id: Uuid,
    ) -> Result<UserNotification, AppError> {
        let existing = self
            .notifications
            .find_user_notification(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Notification {id} not found")))?;

        if existing.user_id != ctx.user_id {
            return Err(AppError::authorization(
                "Notification belongs to another user",
            ));
        }

        let (record, transitioned) = self.notifications.mark_read(id).await?;
        if transitioned {
            self.publish_unread_changed(ctx.user_id).await;
        }
        Ok(record)
    }

    /// Delete one of the current user's notification records.
    ///
    /// A change signal is published for the owner after every
    /// successful delete, whatever the record's read state.
    pub async fn delete_notification(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        let existing = self
            .notifications
            .find_user_notification(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Notification {id} not found")))?;

        if existing.user_id != ctx.user_id {
            return Err(AppError::authorization(
                "Notification belongs to another user",
            ));
        }

        self.notifications.delete_user_notification(id).await?;
        self.publish_unread_changed(ctx.user_id).await;
        Ok(())
    }

    /// Publish an unread-count change signal for one user.
    ///
    /// Delivery is best-effort: a pub/sub failure is logged and
    /// swallowed so it never fails the triggering operation.
    async fn publish_unread_changed(&self, user_id: Uuid) {
        if let Err(e) = self.publisher.unread_changed(user_id).await {
            warn!(%user_id, error = %e, "Failed to publish unread-count change");
        }
    }
}

/// Deduplicate an explicit recipient list and drop the sender from it.
///
/// Order of first occurrence is preserved.
fn filter_recipients(recipients: &[Uuid], sender: Uuid) -> Vec<Uuid> {
    let mut seen = std::collections::HashSet::new();
    recipients
        .iter()
        .copied()
        .filter(|id| *id != sender && seen.insert(*id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_recipients_drops_sender() {
        let sender = Uuid::new_v4();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        assert_eq!(filter_recipients(&[a, sender, b], sender), vec![a, b]);
    }

    #[test]
    fn test_filter_recipients_deduplicates_preserving_order() {
        let sender = Uuid::new_v4();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        assert_eq!(filter_recipients(&[b, a, b, a], sender), vec![b, a]);
    }

    #[test]
    fn test_filter_recipients_can_be_empty() {
        let sender = Uuid::new_v4();
        assert!(filter_recipients(&[sender, sender], sender).is_empty());
        assert!(filter_recipients(&[], sender).is_empty());
    }
}
