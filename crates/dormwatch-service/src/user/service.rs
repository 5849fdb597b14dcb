//! User account management.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use dormwatch_auth::PasswordHasher;
use dormwatch_core::error::AppError;
use dormwatch_database::repositories::UserRepository;
use dormwatch_entity::user::{CreateUser, UpdateUser, User, UserRole};

use crate::context::RequestContext;

/// Input for registering a new user, before the password is hashed.
#[derive(Debug, Clone)]
pub struct RegisterUser {
    /// Desired login.
    pub login: String,
    /// Plaintext password.
    pub password: String,
    /// Assigned role.
    pub role: UserRole,
    /// Full display name.
    pub full_name: String,
    /// Contact phone number.
    pub phone_number: String,
    /// Telegram handle.
    pub telegram_tag: String,
}

/// Manages user accounts and the role hierarchy around them.
#[derive(Clone)]
pub struct UserService {
    users: Arc<UserRepository>,
    hasher: PasswordHasher,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(users: Arc<UserRepository>, hasher: PasswordHasher) -> Self {
        Self { users, hasher }
    }

    /// Fetch a user by ID.
    pub async fn get_user(&self, id: Uuid) -> Result<User, AppError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))
    }

    /// Fetch a user by login.
    pub async fn get_by_login(&self, login: &str) -> Result<User, AppError> {
        self.users
            .find_by_login(login)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User '{login}' not found")))
    }

    /// List users, newest first. Non-positive bounds mean "all".
    pub async fn list_users(&self, limit: i64, offset: i64) -> Result<Vec<User>, AppError> {
        self.users.find_all(limit, offset).await
    }

    /// List users matching optional role and building filters.
    pub async fn find_users(
        &self,
        role: Option<UserRole>,
        building: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<User>, AppError> {
        self.users.find(role, building, limit, offset).await
    }

    /// Register a new user.
    ///
    /// Only a caller who strictly outranks the new user's role may
    /// create them; the chairman can create anyone.
    pub async fn create_user(
        &self,
        ctx: &RequestContext,
        input: RegisterUser,
    ) -> Result<User, AppError> {
        if input.login.trim().is_empty() {
            return Err(AppError::validation("Login must not be empty"));
        }
        if input.password.len() < 8 {
            return Err(AppError::validation(
                "Password must be at least 8 characters",
            ));
        }
        if !ctx.is_chairman() && !ctx.outranks(&input.role) {
            return Err(AppError::authorization(
                "Cannot create a user with an equal or higher role",
            ));
        }

        let password_hash = self.hasher.hash_password(&input.password)?;
        let user = self
            .users
            .create(&CreateUser {
                login: input.login,
                password_hash,
                role: input.role,
                full_name: input.full_name,
                phone_number: input.phone_number,
                telegram_tag: input.telegram_tag,
            })
            .await?;

        info!(user_id = %user.id, login = %user.login, role = %user.role, "User created");
        Ok(user)
    }

    /// Partially update a user's profile.
    ///
    /// Users may edit themselves (except their role); editing someone
    /// else, or any role change, requires strictly outranking the
    /// target's current role.
    pub async fn update_user(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        input: UpdateUser,
    ) -> Result<User, AppError> {
        let target = self.get_user(id).await?;

        let editing_self = ctx.user_id == id;
        let outranks_target = ctx.is_chairman() || ctx.outranks(&target.role);

        if !editing_self && !outranks_target {
            return Err(AppError::authorization(
                "Insufficient privileges to edit this user",
            ));
        }
        if input.role.is_some() && !outranks_target {
            return Err(AppError::authorization(
                "Insufficient privileges to change roles",
            ));
        }
        if let Some(new_role) = input.role {
            if !ctx.is_chairman() && !ctx.outranks(&new_role) {
                return Err(AppError::authorization(
                    "Cannot grant an equal or higher role",
                ));
            }
        }

        let user = self.users.update(id, &input).await?;
        info!(user_id = %id, "User updated");
        Ok(user)
    }

    /// Change a user's password.
    ///
    /// Users change their own; anyone else's requires strictly
    /// outranking them.
    pub async fn change_password(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        new_password: &str,
    ) -> Result<(), AppError> {
        if new_password.len() < 8 {
            return Err(AppError::validation(
                "Password must be at least 8 characters",
            ));
        }

        if ctx.user_id != id {
            let target = self.get_user(id).await?;
            if !ctx.is_chairman() && !ctx.outranks(&target.role) {
                return Err(AppError::authorization(
                    "Insufficient privileges to change this user's password",
                ));
            }
        }

        let password_hash = self.hasher.hash_password(new_password)?;
        self.users.update_password(id, &password_hash).await?;
        info!(user_id = %id, "Password changed");
        Ok(())
    }

    /// Delete a user. Requires strictly outranking the target.
    pub async fn delete_user(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        let target = self.get_user(id).await?;
        if !ctx.is_chairman() && !ctx.outranks(&target.role) {
            return Err(AppError::authorization(
                "Insufficient privileges to delete this user",
            ));
        }

        if !self.users.delete(id).await? {
            return Err(AppError::not_found(format!("User {id} not found")));
        }
        info!(user_id = %id, deleted_by = %ctx.user_id, "User deleted");
        Ok(())
    }
}
