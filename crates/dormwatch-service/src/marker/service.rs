//! Map marker management and user assignment.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use dormwatch_core::error::AppError;
use dormwatch_database::repositories::{MarkerRepository, UserRepository};
use dormwatch_entity::marker::{CreateMarker, Marker, MarkerWithUsers};

use crate::context::RequestContext;

/// Manages map markers and their mutual user assignments.
#[derive(Clone)]
pub struct MarkerService {
    markers: Arc<MarkerRepository>,
    users: Arc<UserRepository>,
}

impl MarkerService {
    /// Creates a new marker service.
    pub fn new(markers: Arc<MarkerRepository>, users: Arc<UserRepository>) -> Self {
        Self { markers, users }
    }

    /// Fetch a marker by ID.
    pub async fn get_marker(&self, id: Uuid) -> Result<Marker, AppError> {
        self.markers
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Marker {id} not found")))
    }

    /// Fetch a marker by its business key.
    pub async fn get_by_marker_id(&self, marker_id: &str) -> Result<Marker, AppError> {
        self.markers
            .find_by_marker_id(marker_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Marker '{marker_id}' not found")))
    }

    /// List all markers.
    pub async fn list_markers(&self) -> Result<Vec<Marker>, AppError> {
        self.markers.find_all().await
    }

    /// Fetch a marker together with its assigned users.
    pub async fn get_with_users(&self, id: Uuid) -> Result<MarkerWithUsers, AppError> {
        let marker = self.get_marker(id).await?;
        let users = if marker.assigned_user_ids.is_empty() {
            Vec::new()
        } else {
            self.users.find_by_ids(&marker.assigned_user_ids).await?
        };
        Ok(MarkerWithUsers { marker, users })
    }

    /// List all markers with their assigned users resolved in one
    /// user query.
    pub async fn list_with_users(&self) -> Result<Vec<MarkerWithUsers>, AppError> {
        let markers = self.markers.find_all().await?;

        let ids: Vec<Uuid> = markers
            .iter()
            .flat_map(|m| m.assigned_user_ids.iter().copied())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let users = if ids.is_empty() {
            Vec::new()
        } else {
            self.users.find_by_ids(&ids).await?
        };

        Ok(markers
            .into_iter()
            .map(|marker| {
                let assigned = users
                    .iter()
                    .filter(|u| marker.assigned_user_ids.contains(&u.id))
                    .cloned()
                    .collect();
                MarkerWithUsers {
                    marker,
                    users: assigned,
                }
            })
            .collect())
    }

    /// Create a marker. Requires DGIS or above.
    pub async fn create_marker(
        &self,
        ctx: &RequestContext,
        input: CreateMarker,
    ) -> Result<Marker, AppError> {
        if !ctx.is_dgis_or_above() {
            return Err(AppError::authorization(
                "Insufficient privileges to create markers",
            ));
        }
        if input.marker_id.trim().is_empty() {
            return Err(AppError::validation("marker_id must not be empty"));
        }
        if input.position.len() != 2 {
            return Err(AppError::validation(
                "position must hold exactly two coordinates",
            ));
        }

        let marker = self.markers.create(&input).await?;
        info!(marker_id = %marker.marker_id, "Marker created");
        Ok(marker)
    }

    /// Assign a user to a marker. Requires DGIS or above.
    ///
    /// Idempotent: re-assigning an already assigned user changes
    /// nothing except refreshing the user's `building` label.
    pub async fn assign_user(
        &self,
        ctx: &RequestContext,
        marker_id: Uuid,
        user_id: Uuid,
    ) -> Result<Marker, AppError> {
        if !ctx.is_dgis_or_above() {
            return Err(AppError::authorization(
                "Insufficient privileges to assign users",
            ));
        }

        self.markers.assign_user(marker_id, user_id).await?;
        info!(%marker_id, %user_id, "User assigned to marker");
        self.get_marker(marker_id).await
    }

    /// Remove a user from a marker. Requires DGIS or above.
    pub async fn remove_user(
        &self,
        ctx: &RequestContext,
        marker_id: Uuid,
        user_id: Uuid,
    ) -> Result<Marker, AppError> {
        if !ctx.is_dgis_or_above() {
            return Err(AppError::authorization(
                "Insufficient privileges to unassign users",
            ));
        }

        self.markers.remove_user(marker_id, user_id).await?;
        info!(%marker_id, %user_id, "User removed from marker");
        self.get_marker(marker_id).await
    }

    /// Detach every user from a marker. Requires DGIS or above.
    pub async fn clear_users(
        &self,
        ctx: &RequestContext,
        marker_id: Uuid,
    ) -> Result<Marker, AppError> {
        if !ctx.is_dgis_or_above() {
            return Err(AppError::authorization(
                "Insufficient privileges to clear marker assignments",
            ));
        }

        let detached = self.markers.clear_users(marker_id).await?;
        info!(%marker_id, detached, "Marker assignments cleared");
        self.get_marker(marker_id).await
    }

    /// Delete a marker, detaching its users first. Requires DGIS or
    /// above.
    pub async fn delete_marker(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        if !ctx.is_dgis_or_above() {
            return Err(AppError::authorization(
                "Insufficient privileges to delete markers",
            ));
        }

        if !self.markers.delete(id).await? {
            return Err(AppError::not_found(format!("Marker {id} not found")));
        }
        info!(marker_id = %id, "Marker deleted");
        Ok(())
    }
}
