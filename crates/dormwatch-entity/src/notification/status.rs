//! Per-recipient notification status.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Read state of a delivery record.
///
/// The only reachable transition is Unread → Read; deletion removes the
/// record in either state. `Archived` exists in the schema but no
/// operation currently transitions into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "notification_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum NotificationStatus {
    /// Not yet read by the recipient.
    Unread,
    /// Read by the recipient.
    Read,
    /// Archived (dead state, kept for schema compatibility).
    Archived,
}

impl NotificationStatus {
    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unread => "unread",
            Self::Read => "read",
            Self::Archived => "archived",
        }
    }
}

impl fmt::Display for NotificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for NotificationStatus {
    type Err = dormwatch_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "unread" => Ok(Self::Unread),
            "read" => Ok(Self::Read),
            "archived" => Ok(Self::Archived),
            _ => Err(dormwatch_core::AppError::validation(format!(
                "Invalid notification status: '{s}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!(
            "UNREAD".parse::<NotificationStatus>().unwrap(),
            NotificationStatus::Unread
        );
        assert!("dismissed".parse::<NotificationStatus>().is_err());
    }
}
