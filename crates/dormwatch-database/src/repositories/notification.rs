//! Notification repository.
//!
//! A notification is stored once as a template row plus one
//! `user_notifications` row per recipient. All per-recipient state
//! (read status, read timestamp) lives on the fan-out rows.

use sqlx::PgPool;
use uuid::Uuid;

use dormwatch_core::error::{AppError, ErrorKind};
use dormwatch_core::result::AppResult;
use dormwatch_entity::notification::{
    CreateNotification, Notification, NotificationStatus, UserNotification,
};

use super::{page_limit, page_offset};

/// Repository for notifications and their per-recipient fan-out rows.
#[derive(Debug, Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    /// Create a new notification repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert the shared template row and its per-recipient fan-out
    /// rows in one transaction.
    ///
    /// Every fan-out row is created unread with the template's
    /// `created_at`, so a batch sorts as one event. Returns the
    /// template and the number of delivery rows inserted; a template
    /// can never be committed without its delivery rows.
    pub async fn create_and_fan_out(
        &self,
        input: &CreateNotification,
        recipients: &[Uuid],
    ) -> AppResult<(Notification, u64)> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let notification = sqlx::query_as::<_, Notification>(
            r#"
            INSERT INTO notifications (kind, title, message, sender_id, recipient_ids)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(input.kind)
        .bind(&input.title)
        .bind(&input.message)
        .bind(input.sender_id)
        .bind(input.recipient_ids.as_deref())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create notification", e)
        })?;

        let delivered = if recipients.is_empty() {
            0
        } else {
            sqlx::query(
                r#"
                INSERT INTO user_notifications (user_id, notification_id, status, created_at)
                SELECT unnest($2::uuid[]), $1, 'unread', $3
                "#,
            )
            .bind(notification.id)
            .bind(recipients)
            .bind(notification.created_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to fan out notification", e)
            })?
            .rows_affected()
        };

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit fan-out", e)
        })?;

        Ok((notification, delivered))
    }

    /// Find a notification template by ID.
    pub async fn find_template(&self, id: Uuid) -> AppResult<Option<Notification>> {
        sqlx::query_as::<_, Notification>("SELECT * FROM notifications WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find notification", e)
            })
    }

    /// Find a per-recipient row by ID.
    pub async fn find_user_notification(&self, id: Uuid) -> AppResult<Option<UserNotification>> {
        sqlx::query_as::<_, UserNotification>("SELECT * FROM user_notifications WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user notification", e)
            })
    }

    /// List a user's notifications, newest first, optionally filtered
    /// by status. An empty filter means every status.
    pub async fn list_for_user(
        &self,
        user_id: Uuid,
        statuses: &[NotificationStatus],
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<UserNotification>> {
        let filter = (!statuses.is_empty()).then_some(statuses);

        sqlx::query_as::<_, UserNotification>(
            r#"
            SELECT * FROM user_notifications
            WHERE user_id = $1
              AND ($2::notification_status[] IS NULL OR status = ANY($2))
            ORDER BY created_at DESC
            LIMIT $3 OFFSET COALESCE($4, 0)
            "#,
        )
        .bind(user_id)
        .bind(filter)
        .bind(page_limit(limit))
        .bind(page_offset(offset))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list user notifications", e)
        })
    }

    /// Transition a per-recipient row to `Read`.
    ///
    /// Idempotent: returns the row plus a flag telling whether this
    /// call performed the transition. A row that is already read comes
    /// back unchanged with the flag false.
    pub async fn mark_read(&self, id: Uuid) -> AppResult<(UserNotification, bool)> {
        let updated = sqlx::query_as::<_, UserNotification>(
            r#"
            UPDATE user_notifications
            SET status = 'read', read_at = NOW()
            WHERE id = $1 AND status = 'unread'
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to mark notification read", e)
        })?;

        if let Some(row) = updated {
            return Ok((row, true));
        }

        let existing = self
            .find_user_notification(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User notification {id} not found")))?;
        Ok((existing, false))
    }

    /// Delete a per-recipient row. Returns the removed row, `None`
    /// when it was already gone.
    pub async fn delete_user_notification(&self, id: Uuid) -> AppResult<Option<UserNotification>> {
        sqlx::query_as::<_, UserNotification>(
            "DELETE FROM user_notifications WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to delete user notification", e)
        })
    }

    /// Count a user's unread notifications.
    pub async fn count_unread(&self, user_id: Uuid) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM user_notifications WHERE user_id = $1 AND status = 'unread'",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count unread notifications", e)
        })
    }
}
