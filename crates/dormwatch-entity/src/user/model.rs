//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::UserRole;

/// A registered user of the inspection system.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Unique login name.
    pub login: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// User role in the inspection hierarchy.
    pub role: UserRole,
    /// Full display name.
    pub full_name: String,
    /// Denormalized label of the last-assigned marker, if any.
    pub building: Option<String>,
    /// Contact phone number.
    pub phone_number: String,
    /// Telegram handle.
    pub telegram_tag: String,
    /// Markers this user is assigned to (mutual inverse of
    /// `markers.assigned_user_ids`).
    pub assigned_markers: Vec<Uuid>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check if this user strictly outranks the given role.
    pub fn has_higher_role(&self, role: &UserRole) -> bool {
        self.role.has_higher_role(role)
    }

    /// Check if this user has at least the given role's privileges.
    pub fn has_equal_or_higher_role(&self, role: &UserRole) -> bool {
        self.role.has_equal_or_higher_role(role)
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Desired login.
    pub login: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Assigned role.
    pub role: UserRole,
    /// Full display name.
    pub full_name: String,
    /// Contact phone number.
    pub phone_number: String,
    /// Telegram handle.
    pub telegram_tag: String,
}

/// Data for partially updating an existing user.
///
/// `None` fields are left untouched; role transitions are not
/// re-validated here (the caller gates them).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUser {
    /// New full name.
    pub full_name: Option<String>,
    /// New role.
    pub role: Option<UserRole>,
    /// New phone number.
    pub phone_number: Option<String>,
    /// New telegram handle.
    pub telegram_tag: Option<String>,
}
