//! User repository.

use sqlx::PgPool;
use uuid::Uuid;

use dormwatch_core::error::{AppError, ErrorKind};
use dormwatch_core::result::AppResult;
use dormwatch_entity::user::{CreateUser, UpdateUser, User, UserRole};

use super::{page_limit, page_offset};

/// Repository for user accounts.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    /// Find a user by login.
    pub async fn find_by_login(&self, login: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE login = $1")
            .bind(login)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by login", e)
            })
    }

    /// List all users, newest first.
    pub async fn find_all(&self, limit: i64, offset: i64) -> AppResult<Vec<User>> {
        sqlx::query_as::<_, User>(
            "SELECT * FROM users ORDER BY created_at DESC LIMIT $1 OFFSET COALESCE($2, 0)",
        )
        .bind(page_limit(limit))
        .bind(page_offset(offset))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list users", e))
    }

    /// List users matching optional role and building filters.
    ///
    /// `None` filters match everything; results come newest first.
    pub async fn find(
        &self,
        role: Option<UserRole>,
        building: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT * FROM users
            WHERE ($1::user_role IS NULL OR role = $1)
              AND ($2::text IS NULL OR building = $2)
            ORDER BY created_at DESC
            LIMIT $3 OFFSET COALESCE($4, 0)
            "#,
        )
        .bind(role)
        .bind(building)
        .bind(page_limit(limit))
        .bind(page_offset(offset))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find users", e))
    }

    /// List all users holding one of the given IDs.
    pub async fn find_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list users by ids", e)
            })
    }

    /// List the IDs of every user except the given one.
    ///
    /// Used by notification fan-out when a broadcast must not reach its
    /// own sender.
    pub async fn find_all_ids_except(&self, excluded: Uuid) -> AppResult<Vec<Uuid>> {
        sqlx::query_scalar::<_, Uuid>("SELECT id FROM users WHERE id <> $1")
            .bind(excluded)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list user ids", e))
    }

    /// Insert a new user. The input carries a pre-hashed password.
    ///
    /// A duplicate login maps to a `Conflict` error.
    pub async fn create(&self, input: &CreateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (login, password_hash, role, full_name, phone_number, telegram_tag)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&input.login)
        .bind(&input.password_hash)
        .bind(input.role)
        .bind(&input.full_name)
        .bind(&input.phone_number)
        .bind(&input.telegram_tag)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => AppError::conflict(format!(
                "User with login '{}' already exists",
                input.login
            )),
            _ => AppError::with_source(ErrorKind::Database, "Failed to create user", e),
        })
    }

    /// Partially update a user's profile fields.
    pub async fn update(&self, id: Uuid, input: &UpdateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET full_name    = COALESCE($2, full_name),
                role         = COALESCE($3, role),
                phone_number = COALESCE($4, phone_number),
                telegram_tag = COALESCE($5, telegram_tag),
                updated_at   = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(input.full_name.as_deref())
        .bind(input.role)
        .bind(input.phone_number.as_deref())
        .bind(input.telegram_tag.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update user", e))?
        .ok_or_else(|| AppError::not_found(format!("User {id} not found")))
    }

    /// Replace a user's password hash.
    pub async fn update_password(&self, id: Uuid, password_hash: &str) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE users SET password_hash = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(password_hash)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update password", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("User {id} not found")));
        }
        Ok(())
    }

    /// Delete a user. Returns `true` if a row was removed.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete user", e))?;

        Ok(result.rows_affected() > 0)
    }

    /// Count all users.
    pub async fn count(&self) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count users", e))
    }
}
