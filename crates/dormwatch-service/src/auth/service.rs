//! Login and token issuance.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use dormwatch_auth::{JwtEncoder, PasswordHasher};
use dormwatch_core::error::AppError;
use dormwatch_database::repositories::UserRepository;
use dormwatch_entity::user::User;

/// A successful login.
#[derive(Debug, Clone)]
pub struct LoginResult {
    /// The authenticated user.
    pub user: User,
    /// Signed access token.
    pub token: String,
    /// Token expiration.
    pub expires_at: DateTime<Utc>,
}

/// Verifies credentials and issues access tokens.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<UserRepository>,
    hasher: PasswordHasher,
    encoder: JwtEncoder,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(users: Arc<UserRepository>, hasher: PasswordHasher, encoder: JwtEncoder) -> Self {
        Self {
            users,
            hasher,
            encoder,
        }
    }

    /// Authenticate by login and password.
    ///
    /// Unknown logins and wrong passwords produce the same error so the
    /// response does not reveal which logins exist.
    pub async fn login(&self, login: &str, password: &str) -> Result<LoginResult, AppError> {
        let user = self
            .users
            .find_by_login(login)
            .await?
            .ok_or_else(|| AppError::authentication("Invalid login or password"))?;

        if !self.hasher.verify_password(password, &user.password_hash) {
            return Err(AppError::authentication("Invalid login or password"));
        }

        let (token, expires_at) = self.encoder.generate_token(user.id, user.role, &user.login)?;

        info!(user_id = %user.id, login = %user.login, "User logged in");
        Ok(LoginResult {
            user,
            token,
            expires_at,
        })
    }
}
