//! Schema migrations.

use sqlx::PgPool;
use sqlx::migrate::Migrator;
use tracing::info;

use dormwatch_core::error::{AppError, ErrorKind};
use dormwatch_core::result::AppResult;

/// Embedded migrations for the dormwatch schema: users, markers,
/// notifications with their delivery records, and weekly reports.
static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Apply any migrations the database has not seen yet.
///
/// Safe to call from several processes at once; the migrator holds an
/// advisory lock while it works.
pub async fn run_migrations(pool: &PgPool) -> AppResult<()> {
    MIGRATOR.run(pool).await.map_err(|e| {
        AppError::with_source(ErrorKind::Database, format!("Migration failed: {e}"), e)
    })?;

    info!(
        migrations = MIGRATOR.migrations.len(),
        "Database schema up to date"
    );
    Ok(())
}
