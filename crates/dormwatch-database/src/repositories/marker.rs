//! Map marker repository.
//!
//! Marker/user assignment is stored from both sides: a marker carries
//! `assigned_user_ids` and a user carries `assigned_markers`. Every
//! mutation touches both rows inside one transaction so the two arrays
//! never diverge.

use sqlx::PgPool;
use uuid::Uuid;

use dormwatch_core::error::{AppError, ErrorKind};
use dormwatch_core::result::AppResult;
use dormwatch_entity::marker::{CreateMarker, Marker};

/// Repository for map markers.
#[derive(Debug, Clone)]
pub struct MarkerRepository {
    pool: PgPool,
}

impl MarkerRepository {
    /// Create a new marker repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a marker by its internal ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Marker>> {
        sqlx::query_as::<_, Marker>("SELECT * FROM markers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find marker", e))
    }

    /// Find a marker by its business key.
    pub async fn find_by_marker_id(&self, marker_id: &str) -> AppResult<Option<Marker>> {
        sqlx::query_as::<_, Marker>("SELECT * FROM markers WHERE marker_id = $1")
            .bind(marker_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find marker by marker_id", e)
            })
    }

    /// List all markers, ordered by business key.
    pub async fn find_all(&self) -> AppResult<Vec<Marker>> {
        sqlx::query_as::<_, Marker>("SELECT * FROM markers ORDER BY marker_id ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list markers", e))
    }

    /// Insert a new marker. A duplicate business key maps to `Conflict`.
    pub async fn create(&self, input: &CreateMarker) -> AppResult<Marker> {
        sqlx::query_as::<_, Marker>(
            r#"
            INSERT INTO markers (marker_id, position, label)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&input.marker_id)
        .bind(&input.position)
        .bind(&input.label)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => AppError::conflict(format!(
                "Marker with marker_id '{}' already exists",
                input.marker_id
            )),
            _ => AppError::with_source(ErrorKind::Database, "Failed to create marker", e),
        })
    }

    /// Assign a user to a marker.
    ///
    /// Adds each side to the other's array (set semantics, re-assignment
    /// is a no-op) and stamps the marker's label onto the user's
    /// `building` field.
    pub async fn assign_user(&self, marker_id: Uuid, user_id: Uuid) -> AppResult<()> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let label = sqlx::query_scalar::<_, String>(
            r#"
            UPDATE markers
            SET assigned_user_ids = CASE
                WHEN $2 = ANY(assigned_user_ids) THEN assigned_user_ids
                ELSE array_append(assigned_user_ids, $2)
            END
            WHERE id = $1
            RETURNING label
            "#,
        )
        .bind(marker_id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to add user to marker", e)
        })?
        .ok_or_else(|| AppError::not_found(format!("Marker {marker_id} not found")))?;

        let result = sqlx::query(
            r#"
            UPDATE users
            SET assigned_markers = CASE
                    WHEN $2 = ANY(assigned_markers) THEN assigned_markers
                    ELSE array_append(assigned_markers, $2)
                END,
                building   = $3,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .bind(marker_id)
        .bind(&label)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to add marker to user", e)
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("User {user_id} not found")));
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit assignment", e)
        })
    }

    /// Remove a user from a marker.
    ///
    /// Drops each side from the other's array and recomputes the user's
    /// `building` from their remaining markers (the one with the lowest
    /// business key wins; `NULL` when none remain).
    pub async fn remove_user(&self, marker_id: Uuid, user_id: Uuid) -> AppResult<()> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let result = sqlx::query(
            r#"
            UPDATE markers
            SET assigned_user_ids = array_remove(assigned_user_ids, $2)
            WHERE id = $1
            "#,
        )
        .bind(marker_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to remove user from marker", e)
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Marker {marker_id} not found")));
        }

        let result = sqlx::query(
            r#"
            UPDATE users u
            SET assigned_markers = array_remove(assigned_markers, $2),
                building = (
                    SELECT m.label
                    FROM markers m
                    WHERE m.id = ANY(array_remove(u.assigned_markers, $2))
                    ORDER BY m.marker_id ASC
                    LIMIT 1
                ),
                updated_at = NOW()
            WHERE u.id = $1
            "#,
        )
        .bind(user_id)
        .bind(marker_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to remove marker from user", e)
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("User {user_id} not found")));
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit removal", e)
        })
    }

    /// Detach every user currently assigned to a marker.
    ///
    /// Each affected user's `building` is recomputed from their
    /// remaining markers.
    pub async fn clear_users(&self, marker_id: Uuid) -> AppResult<u64> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM markers WHERE id = $1)",
        )
        .bind(marker_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check marker", e))?;

        if !exists {
            return Err(AppError::not_found(format!("Marker {marker_id} not found")));
        }

        let result = sqlx::query(
            r#"
            UPDATE users u
            SET assigned_markers = array_remove(assigned_markers, $1),
                building = (
                    SELECT m.label
                    FROM markers m
                    WHERE m.id = ANY(array_remove(u.assigned_markers, $1))
                    ORDER BY m.marker_id ASC
                    LIMIT 1
                ),
                updated_at = NOW()
            WHERE $1 = ANY(u.assigned_markers)
            "#,
        )
        .bind(marker_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to detach users from marker", e)
        })?;

        sqlx::query("UPDATE markers SET assigned_user_ids = '{}' WHERE id = $1")
            .bind(marker_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to clear marker assignments", e)
            })?;

        tx.commit()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to commit clear", e))?;

        Ok(result.rows_affected())
    }

    /// Delete a marker, detaching its users first.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        sqlx::query(
            r#"
            UPDATE users u
            SET assigned_markers = array_remove(assigned_markers, $1),
                building = (
                    SELECT m.label
                    FROM markers m
                    WHERE m.id = ANY(array_remove(u.assigned_markers, $1))
                      AND m.id <> $1
                    ORDER BY m.marker_id ASC
                    LIMIT 1
                ),
                updated_at = NOW()
            WHERE $1 = ANY(u.assigned_markers)
            "#,
        )
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to detach users from marker", e)
        })?;

        let result = sqlx::query("DELETE FROM markers WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete marker", e)
            })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit deletion", e)
        })?;

        Ok(result.rows_affected() > 0)
    }
}
