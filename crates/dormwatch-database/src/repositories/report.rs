//! Weekly report repository.

use sqlx::PgPool;
use uuid::Uuid;

use dormwatch_core::error::{AppError, ErrorKind};
use dormwatch_core::result::AppResult;
use dormwatch_entity::report::{
    CreateWeeklyReport, Rating, ReportStatus, UpdateWeeklyReport, WeeklyReport,
};

use super::{page_limit, page_offset};

/// Repository for weekly inspection reports.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    pool: PgPool,
}

impl ReportRepository {
    /// Create a new report repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new report. Status defaults to `NotReviewed`.
    pub async fn create(&self, input: &CreateWeeklyReport) -> AppResult<WeeklyReport> {
        sqlx::query_as::<_, WeeklyReport>(
            r#"
            INSERT INTO weekly_reports (user_id, applications, inspection, additional, status)
            VALUES ($1, $2, $3, $4, COALESCE($5, 'not_reviewed'))
            RETURNING *
            "#,
        )
        .bind(input.user_id)
        .bind(&input.applications)
        .bind(&input.inspection)
        .bind(&input.additional)
        .bind(input.status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create report", e))
    }

    /// Find a report by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<WeeklyReport>> {
        sqlx::query_as::<_, WeeklyReport>("SELECT * FROM weekly_reports WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find report", e))
    }

    /// List all reports, newest first.
    pub async fn find_all(&self, limit: i64, offset: i64) -> AppResult<Vec<WeeklyReport>> {
        sqlx::query_as::<_, WeeklyReport>(
            r#"
            SELECT * FROM weekly_reports
            ORDER BY created_at DESC
            LIMIT $1 OFFSET COALESCE($2, 0)
            "#,
        )
        .bind(page_limit(limit))
        .bind(page_offset(offset))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list reports", e))
    }

    /// List one user's reports, newest first.
    pub async fn find_by_user(
        &self,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<WeeklyReport>> {
        sqlx::query_as::<_, WeeklyReport>(
            r#"
            SELECT * FROM weekly_reports
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET COALESCE($3, 0)
            "#,
        )
        .bind(user_id)
        .bind(page_limit(limit))
        .bind(page_offset(offset))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list user reports", e))
    }

    /// Partially update a report's text fields.
    pub async fn update_fields(
        &self,
        id: Uuid,
        input: &UpdateWeeklyReport,
    ) -> AppResult<WeeklyReport> {
        sqlx::query_as::<_, WeeklyReport>(
            r#"
            UPDATE weekly_reports
            SET applications = COALESCE($2, applications),
                inspection   = COALESCE($3, inspection),
                additional   = COALESCE($4, additional),
                updated_at   = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(input.applications.as_deref())
        .bind(input.inspection.as_deref())
        .bind(input.additional.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update report", e))?
        .ok_or_else(|| AppError::not_found(format!("Report {id} not found")))
    }

    /// Set the review status.
    pub async fn set_status(&self, id: Uuid, status: ReportStatus) -> AppResult<WeeklyReport> {
        sqlx::query_as::<_, WeeklyReport>(
            r#"
            UPDATE weekly_reports
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to set report status", e))?
        .ok_or_else(|| AppError::not_found(format!("Report {id} not found")))
    }

    /// Set the supervisor's rating.
    pub async fn set_supervisor_rate(&self, id: Uuid, rating: Rating) -> AppResult<WeeklyReport> {
        sqlx::query_as::<_, WeeklyReport>(
            r#"
            UPDATE weekly_reports
            SET supervisor_rate = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(rating)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to set supervisor rating", e)
        })?
        .ok_or_else(|| AppError::not_found(format!("Report {id} not found")))
    }

    /// Set the chairman's rating.
    pub async fn set_predsedatel_rate(&self, id: Uuid, rating: Rating) -> AppResult<WeeklyReport> {
        sqlx::query_as::<_, WeeklyReport>(
            r#"
            UPDATE weekly_reports
            SET predsedatel_rate = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(rating)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to set chairman rating", e)
        })?
        .ok_or_else(|| AppError::not_found(format!("Report {id} not found")))
    }

    /// Append image keys to the report's three lists in one statement.
    pub async fn append_image_keys(
        &self,
        id: Uuid,
        applications: &[String],
        inspection: &[String],
        additional: &[String],
    ) -> AppResult<WeeklyReport> {
        sqlx::query_as::<_, WeeklyReport>(
            r#"
            UPDATE weekly_reports
            SET applications_image_keys = applications_image_keys || $2,
                inspection_image_keys   = inspection_image_keys || $3,
                additional_image_keys   = additional_image_keys || $4,
                updated_at              = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(applications)
        .bind(inspection)
        .bind(additional)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to append image keys", e)
        })?
        .ok_or_else(|| AppError::not_found(format!("Report {id} not found")))
    }

    /// Delete a report. Returns the removed row so the caller can
    /// clean up its stored images.
    pub async fn delete(&self, id: Uuid) -> AppResult<Option<WeeklyReport>> {
        sqlx::query_as::<_, WeeklyReport>(
            "DELETE FROM weekly_reports WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete report", e))
    }
}
