use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, AsRefStr, EnumString)]
pub enum ProjectStatus {
    #[default]
    Active,
    #[serde(rename = "In Progress")]
    #[strum(serialize = "In Progress")]
    InProgress,
    Completed,
}

/// A project as returned by the backend.
///
/// Date fields arrive as strings in whatever format the backend feels like
/// (date-only or full timestamp); use [`parse_wire_date`] before doing
/// anything date-shaped with them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub sow_id: String,
    pub project_name: String,
    #[serde(default)]
    pub current_status: ProjectStatus,
    #[serde(default)]
    pub original_start_date: Option<String>,
    #[serde(default)]
    pub original_end_date: Option<String>,
    #[serde(default)]
    pub total_projected_hours: Option<i64>,
    #[serde(default)]
    pub project_category: Option<String>,
    #[serde(default)]
    pub company_id: Option<i64>,
}

/// Payload for creating or updating a project.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectPayload {
    pub project_name: String,
    pub current_status: ProjectStatus,
    pub original_start_date: NaiveDate,
    pub original_end_date: NaiveDate,
    pub total_projected_hours: i64,
    pub company_id: i64,
}

/// Response to a project create; the server generates the SOW id.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedProject {
    pub sow_id: String,
}

/// Parse a backend date string, tolerating a trailing time component.
pub fn parse_wire_date(raw: &str) -> Option<NaiveDate> {
    let date_part = raw.split('T').next().unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}
