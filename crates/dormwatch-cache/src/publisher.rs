//! Change-signal publisher.

use uuid::Uuid;

use dormwatch_core::result::AppResult;

use crate::channels;
use crate::redis::RedisClient;

/// Publishes unread-count change signals.
///
/// Thin wrapper over [`RedisClient`] so services depend on the signal
/// contract rather than on raw Redis commands.
#[derive(Clone)]
pub struct ChangePublisher {
    client: RedisClient,
}

impl ChangePublisher {
    /// Creates a new publisher.
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    /// Signal that one user's unread count changed.
    ///
    /// Returns the number of subscribers that received the signal.
    pub async fn unread_changed(&self, user_id: Uuid) -> AppResult<i64> {
        let channel = channels::unread_notifications_changed(user_id);
        self.client
            .publish(&channel, channels::UNREAD_CHANGED_PAYLOAD)
            .await
    }
}
