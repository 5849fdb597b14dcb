//! Weekly report review status.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Review state of a weekly report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "report_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    /// Submitted but not yet reviewed.
    NotReviewed,
    /// Reviewed by staff.
    Reviewed,
}

impl ReportStatus {
    /// Return the status as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotReviewed => "not_reviewed",
            Self::Reviewed => "reviewed",
        }
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReportStatus {
    type Err = dormwatch_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "not_reviewed" => Ok(Self::NotReviewed),
            "reviewed" => Ok(Self::Reviewed),
            _ => Err(dormwatch_core::AppError::validation(format!(
                "Invalid report status: '{s}'. Expected 'not_reviewed' or 'reviewed'"
            ))),
        }
    }
}
