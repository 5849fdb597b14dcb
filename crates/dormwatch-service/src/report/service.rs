//! Weekly report lifecycle: filing, review, ratings, and image
//! attachments.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{info, warn};
use uuid::Uuid;

use dormwatch_core::error::AppError;
use dormwatch_database::repositories::ReportRepository;
use dormwatch_entity::report::{
    CreateWeeklyReport, Rating, ReportStatus, UpdateWeeklyReport, WeeklyReport,
};
use dormwatch_storage::{ObjectStore, keys};

use crate::context::RequestContext;

/// Which of a report's three image lists an upload belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportSection {
    /// Incoming applications.
    Applications,
    /// Inspection findings.
    Inspection,
    /// Everything else.
    Additional,
}

/// Image keys to append, grouped by section.
#[derive(Debug, Clone, Default)]
pub struct ReportImages {
    /// Keys for the applications section.
    pub applications: Vec<String>,
    /// Keys for the inspection section.
    pub inspection: Vec<String>,
    /// Keys for the additional section.
    pub additional: Vec<String>,
}

impl ReportImages {
    /// True when no section holds any key.
    pub fn is_empty(&self) -> bool {
        self.applications.is_empty() && self.inspection.is_empty() && self.additional.is_empty()
    }
}

/// Manages weekly reports and their stored image attachments.
#[derive(Clone)]
pub struct ReportService {
    reports: Arc<ReportRepository>,
    store: Arc<dyn ObjectStore>,
}

impl ReportService {
    /// Creates a new report service.
    pub fn new(reports: Arc<ReportRepository>, store: Arc<dyn ObjectStore>) -> Self {
        Self { reports, store }
    }

    /// File a new report on behalf of the current user.
    pub async fn create_report(
        &self,
        ctx: &RequestContext,
        applications: String,
        inspection: String,
        additional: String,
    ) -> Result<WeeklyReport, AppError> {
        let report = self
            .reports
            .create(&CreateWeeklyReport {
                user_id: ctx.user_id,
                applications,
                inspection,
                additional,
                status: None,
            })
            .await?;

        info!(report_id = %report.id, user_id = %ctx.user_id, "Weekly report filed");
        Ok(report)
    }

    /// Fetch a report by ID.
    ///
    /// Readable by its author and by DGIS or above.
    pub async fn get_report(&self, ctx: &RequestContext, id: Uuid) -> Result<WeeklyReport, AppError> {
        let report = self.find(id).await?;
        self.ensure_can_view(ctx, &report)?;
        Ok(report)
    }

    /// List every report. Requires DGIS or above.
    pub async fn list_reports(
        &self,
        ctx: &RequestContext,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<WeeklyReport>, AppError> {
        if !ctx.is_dgis_or_above() {
            return Err(AppError::authorization(
                "Insufficient privileges to list all reports",
            ));
        }
        self.reports.find_all(limit, offset).await
    }

    /// List one user's reports, newest first.
    ///
    /// Readable by that user and by DGIS or above.
    pub async fn user_reports(
        &self,
        ctx: &RequestContext,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<WeeklyReport>, AppError> {
        if user_id != ctx.user_id && !ctx.is_dgis_or_above() {
            return Err(AppError::authorization(
                "Insufficient privileges to view these reports",
            ));
        }
        self.reports.find_by_user(user_id, limit, offset).await
    }

    /// List the current user's own reports, newest first.
    pub async fn my_reports(
        &self,
        ctx: &RequestContext,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<WeeklyReport>, AppError> {
        self.reports.find_by_user(ctx.user_id, limit, offset).await
    }

    /// Partially update a report's text fields. Author only.
    pub async fn update_report(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        input: UpdateWeeklyReport,
    ) -> Result<WeeklyReport, AppError> {
        let report = self.find(id).await?;
        if report.user_id != ctx.user_id {
            return Err(AppError::authorization("Only the author may edit a report"));
        }
        self.reports.update_fields(id, &input).await
    }

    /// Set a report's review status. Requires DGIS or above.
    pub async fn set_status(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        status: ReportStatus,
    ) -> Result<WeeklyReport, AppError> {
        if !ctx.is_dgis_or_above() {
            return Err(AppError::authorization(
                "Insufficient privileges to review reports",
            ));
        }
        let report = self.reports.set_status(id, status).await?;
        info!(report_id = %id, status = %status, "Report status set");
        Ok(report)
    }

    /// Set the supervisor-level rating. Requires DGIS or above.
    pub async fn set_supervisor_rate(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        rating: Rating,
    ) -> Result<WeeklyReport, AppError> {
        if !ctx.is_dgis_or_above() {
            return Err(AppError::authorization(
                "Insufficient privileges to rate reports",
            ));
        }
        self.reports.set_supervisor_rate(id, rating).await
    }

    /// Set the chairman's rating. Chairman only.
    pub async fn set_predsedatel_rate(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        rating: Rating,
    ) -> Result<WeeklyReport, AppError> {
        if !ctx.is_chairman() {
            return Err(AppError::authorization(
                "Only the chairman may set this rating",
            ));
        }
        self.reports.set_predsedatel_rate(id, rating).await
    }

    /// Append already-stored image keys to a report. Author only.
    ///
    /// A fully empty set of keys is a no-op that returns the report
    /// unchanged.
    pub async fn append_images(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        images: ReportImages,
    ) -> Result<WeeklyReport, AppError> {
        let report = self.find(id).await?;
        if report.user_id != ctx.user_id {
            return Err(AppError::authorization(
                "Only the author may attach images to a report",
            ));
        }

        if images.is_empty() {
            return Ok(report);
        }

        self.reports
            .append_image_keys(id, &images.applications, &images.inspection, &images.additional)
            .await
    }

    /// Upload one image blob and attach its key to a report section.
    /// Author only.
    pub async fn upload_image(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        section: ReportSection,
        filename: &str,
        content_type: &str,
        data: Bytes,
    ) -> Result<WeeklyReport, AppError> {
        if data.is_empty() {
            return Err(AppError::validation("Image data must not be empty"));
        }

        let report = self.find(id).await?;
        if report.user_id != ctx.user_id {
            return Err(AppError::authorization(
                "Only the author may attach images to a report",
            ));
        }

        let key = keys::object_key(filename);
        self.store.put(&key, data, content_type).await?;

        let mut images = ReportImages::default();
        match section {
            ReportSection::Applications => images.applications.push(key.clone()),
            ReportSection::Inspection => images.inspection.push(key.clone()),
            ReportSection::Additional => images.additional.push(key.clone()),
        }

        let updated = self
            .reports
            .append_image_keys(id, &images.applications, &images.inspection, &images.additional)
            .await?;

        info!(report_id = %id, %key, "Report image uploaded");
        Ok(updated)
    }

    /// Fetch a stored report image by key.
    ///
    /// Readable under the same rules as the report itself.
    pub async fn get_image(
        &self,
        ctx: &RequestContext,
        report_id: Uuid,
        key: &str,
    ) -> Result<Bytes, AppError> {
        let report = self.find(report_id).await?;
        self.ensure_can_view(ctx, &report)?;

        if !report.all_image_keys().any(|k| k == key) {
            return Err(AppError::not_found(format!(
                "Image '{key}' is not attached to report {report_id}"
            )));
        }

        self.store.get(key).await
    }

    /// Delete a report and, best-effort, its stored images.
    ///
    /// Blob deletion failures are logged and do not block removing the
    /// report row; an orphaned blob is preferable to an undeletable
    /// report.
    pub async fn delete_report(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        let report = self.find(id).await?;
        if report.user_id != ctx.user_id && !ctx.is_chairman() {
            return Err(AppError::authorization(
                "Only the author or the chairman may delete a report",
            ));
        }

        for key in report.all_image_keys() {
            if let Err(e) = self.store.delete(key).await {
                warn!(report_id = %id, %key, error = %e, "Failed to delete report image");
            }
        }

        if self.reports.delete(id).await?.is_none() {
            return Err(AppError::not_found(format!("Report {id} not found")));
        }
        info!(report_id = %id, deleted_by = %ctx.user_id, "Report deleted");
        Ok(())
    }

    async fn find(&self, id: Uuid) -> Result<WeeklyReport, AppError> {
        self.reports
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Report {id} not found")))
    }

    fn ensure_can_view(&self, ctx: &RequestContext, report: &WeeklyReport) -> Result<(), AppError> {
        if report.user_id == ctx.user_id || ctx.is_dgis_or_above() {
            Ok(())
        } else {
            Err(AppError::authorization(
                "Insufficient privileges to view this report",
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_images_is_empty() {
        assert!(ReportImages::default().is_empty());

        let images = ReportImages {
            inspection: vec!["k.jpg".into()],
            ..Default::default()
        };
        assert!(!images.is_empty());
    }
}
