//! Pub/sub channel names.
//!
//! Channel names are a wire contract with subscribing transports and
//! must not change between releases.

use uuid::Uuid;

/// Payload published on every unread-count change signal.
///
/// The signal is a poke, not a datum: subscribers re-query the unread
/// count themselves.
pub const UNREAD_CHANGED_PAYLOAD: &str = "updated";

/// Channel carrying unread-count change signals for one user.
pub fn unread_notifications_changed(user_id: Uuid) -> String {
    format!("unread_notifications_changed:{user_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_name_format() {
        let id = Uuid::parse_str("8f3c2e9a-1b4d-4c6e-9f0a-2d5b7c8e1a3f").unwrap();
        assert_eq!(
            unread_notifications_changed(id),
            "unread_notifications_changed:8f3c2e9a-1b4d-4c6e-9f0a-2d5b7c8e1a3f"
        );
    }

    #[test]
    fn test_channels_differ_per_user() {
        let a = unread_notifications_changed(Uuid::new_v4());
        let b = unread_notifications_changed(Uuid::new_v4());
        assert_ne!(a, b);
    }
}
