//! Request context carrying the authenticated user and their role.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use dormwatch_entity::user::UserRole;

/// Context for the current authenticated request.
///
/// Extracted by the transport from validated JWT claims and passed into
/// service methods so that every operation knows *who* is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// The user's role at the time the JWT was issued.
    pub role: UserRole,
    /// The login (convenience field from JWT claims).
    pub login: String,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: Uuid, role: UserRole, login: String) -> Self {
        Self {
            user_id,
            role,
            login,
            request_time: Utc::now(),
        }
    }

    /// Returns whether the current user is the chairman.
    pub fn is_chairman(&self) -> bool {
        self.role.is_chairman()
    }

    /// Returns whether the current user is DGIS-level or above.
    pub fn is_dgis_or_above(&self) -> bool {
        self.role.is_dgis_or_above()
    }

    /// Returns whether the current user strictly outranks the given role.
    pub fn outranks(&self, other: &UserRole) -> bool {
        self.role.has_higher_role(other)
    }
}
