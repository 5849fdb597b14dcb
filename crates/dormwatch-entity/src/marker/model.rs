//! Marker entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::user::User;

/// A physical location marker on the campus map.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Marker {
    /// Unique marker identifier.
    pub id: Uuid,
    /// Business key, unique across all markers.
    pub marker_id: String,
    /// Geographic position as a `[longitude, latitude]` pair.
    pub position: Vec<f64>,
    /// Human-readable label, e.g. a building number like "6.1".
    pub label: String,
    /// Users assigned to this marker (mutual inverse of
    /// `users.assigned_markers`).
    pub assigned_user_ids: Vec<Uuid>,
}

/// A marker joined with its full assigned-user records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkerWithUsers {
    /// The marker itself.
    pub marker: Marker,
    /// Resolved user records for `marker.assigned_user_ids`.
    pub users: Vec<User>,
}

/// Data required to create a new marker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMarker {
    /// Business key, unique across all markers.
    pub marker_id: String,
    /// Geographic position as a `[longitude, latitude]` pair.
    pub position: Vec<f64>,
    /// Human-readable label.
    pub label: String,
}
