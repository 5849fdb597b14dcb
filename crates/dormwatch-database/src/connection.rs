//! PostgreSQL connection pooling.

use std::time::Duration;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

use dormwatch_core::config::DatabaseConfig;
use dormwatch_core::error::{AppError, ErrorKind};
use dormwatch_core::result::AppResult;

/// Shared PostgreSQL pool handed to every repository.
///
/// Cheap to clone; all clones share the same underlying pool.
#[derive(Debug, Clone)]
pub struct DatabasePool {
    pool: PgPool,
}

impl DatabasePool {
    /// Open a pool against the configured database.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        info!(url = %mask_password(&config.url), "Connecting to PostgreSQL");

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
            .connect(&config.url)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to connect to database: {e}"),
                    e,
                )
            })?;

        info!(
            max_connections = config.max_connections,
            min_connections = config.min_connections,
            "PostgreSQL pool ready"
        );
        Ok(Self { pool })
    }

    /// The underlying sqlx pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Round-trip a trivial query to verify connectivity.
    pub async fn health_check(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Database health check failed", e)
            })
    }

    /// Close every connection, waiting for in-flight queries to finish.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database pool closed");
    }
}

/// Strip the password from a connection URL before it reaches a log line.
fn mask_password(url: &str) -> String {
    let Some(scheme_end) = url.find("://") else {
        return url.to_string();
    };
    let rest = &url[scheme_end + 3..];
    let Some(at) = rest.find('@') else {
        return url.to_string();
    };
    match rest[..at].split_once(':') {
        Some((user, _password)) => {
            format!("{}://{user}:****@{}", &url[..scheme_end], &rest[at + 1..])
        }
        None => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_password_hides_credentials() {
        assert_eq!(
            mask_password("postgres://dormwatch:hunter2@db:5432/dormwatch"),
            "postgres://dormwatch:****@db:5432/dormwatch"
        );
    }

    #[test]
    fn test_mask_password_leaves_other_urls_alone() {
        // No credentials at all.
        assert_eq!(
            mask_password("postgres://localhost:5432/dormwatch"),
            "postgres://localhost:5432/dormwatch"
        );
        // Username without a password.
        assert_eq!(
            mask_password("postgres://dormwatch@db:5432/dormwatch"),
            "postgres://dormwatch@db:5432/dormwatch"
        );
        // Not a URL.
        assert_eq!(mask_password("not a url"), "not a url");
    }
}
