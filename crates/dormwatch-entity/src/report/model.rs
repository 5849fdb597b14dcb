//! Weekly report entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::rating::Rating;
use super::status::ReportStatus;

/// A weekly inspection report filed by a user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WeeklyReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// The user who filed the report.
    pub user_id: Uuid,
    /// Free text: incoming applications handled this week.
    pub applications: String,
    /// Free text: inspection findings.
    pub inspection: String,
    /// Free text: anything else.
    pub additional: String,
    /// Review state.
    pub status: ReportStatus,
    /// Supervisor's rating, set independently of the chairman's.
    pub supervisor_rate: Option<Rating>,
    /// Chairman's rating, set independently of the supervisor's.
    pub predsedatel_rate: Option<Rating>,
    /// Object-store keys for application images.
    pub applications_image_keys: Vec<String>,
    /// Object-store keys for inspection images.
    pub inspection_image_keys: Vec<String>,
    /// Object-store keys for additional images.
    pub additional_image_keys: Vec<String>,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// When the report was last mutated.
    pub updated_at: DateTime<Utc>,
}

impl WeeklyReport {
    /// All image keys referenced by this report, across the three lists.
    pub fn all_image_keys(&self) -> impl Iterator<Item = &str> {
        self.applications_image_keys
            .iter()
            .chain(&self.inspection_image_keys)
            .chain(&self.additional_image_keys)
            .map(String::as_str)
    }
}

/// Data required to create a new weekly report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateWeeklyReport {
    /// The filing user.
    pub user_id: Uuid,
    /// Applications text.
    pub applications: String,
    /// Inspection text.
    pub inspection: String,
    /// Additional text.
    pub additional: String,
    /// Initial status; defaults to `NotReviewed` when `None`.
    pub status: Option<ReportStatus>,
}

/// Data for partially updating a report's content fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateWeeklyReport {
    /// New applications text.
    pub applications: Option<String>,
    /// New inspection text.
    pub inspection: Option<String>,
    /// New additional text.
    pub additional: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_image_keys_spans_lists() {
        let report = WeeklyReport {
            id: Uuid::nil(),
            user_id: Uuid::nil(),
            applications: String::new(),
            inspection: String::new(),
            additional: String::new(),
            status: ReportStatus::NotReviewed,
            supervisor_rate: None,
            predsedatel_rate: None,
            applications_image_keys: vec!["a.jpg".into()],
            inspection_image_keys: vec!["b.jpg".into(), "c.jpg".into()],
            additional_image_keys: vec![],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let keys: Vec<_> = report.all_image_keys().collect();
        assert_eq!(keys, vec!["a.jpg", "b.jpg", "c.jpg"]);
    }
}
