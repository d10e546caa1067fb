use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::parse_wire_date;

/// One row of the daily timesheet report.
///
/// The backend mixes types freely (booleans as strings, hours as strings or
/// numbers), so the flag and hour columns stay as raw JSON values with
/// coercing accessors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportRow {
    #[serde(default)]
    pub employee_name: String,
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub project_category: String,
    #[serde(default)]
    pub billable: Value,
    #[serde(default)]
    pub period_start_date: Option<String>,
    #[serde(default)]
    pub monday_hours: Value,
    #[serde(default)]
    pub tuesday_hours: Value,
    #[serde(default)]
    pub wednesday_hours: Value,
    #[serde(default)]
    pub thursday_hours: Value,
    #[serde(default)]
    pub friday_hours: Value,
    #[serde(default)]
    pub saturday_hours: Value,
    #[serde(default)]
    pub sunday_hours: Value,
    #[serde(default)]
    pub work_area: Option<String>,
    #[serde(default)]
    pub task_area: Option<String>,
    #[serde(default)]
    pub ticket_num: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

fn hours(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

impl ReportRow {
    /// "true"/true on the wire means billable; anything else does not.
    pub fn is_billable(&self) -> bool {
        match &self.billable {
            Value::Bool(b) => *b,
            Value::String(s) => s.eq_ignore_ascii_case("true"),
            _ => false,
        }
    }

    pub fn period_start(&self) -> Option<NaiveDate> {
        self.period_start_date.as_deref().and_then(parse_wire_date)
    }

    /// Sum of the seven day columns, parse-or-zero per day.
    pub fn total_hours(&self) -> f64 {
        [
            &self.monday_hours,
            &self.tuesday_hours,
            &self.wednesday_hours,
            &self.thursday_hours,
            &self.friday_hours,
            &self.saturday_hours,
            &self.sunday_hours,
        ]
        .into_iter()
        .map(hours)
        .sum()
    }
}

/// A row of the flat daily-hours export feed. The column set is owned by the
/// backend and exported verbatim, so rows stay as ordered JSON maps.
pub type DailyHoursRow = serde_json::Map<String, Value>;

/// Query parameters for the daily report endpoints.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub clients: Vec<String>,
    pub projects: Vec<String>,
    pub emp_ids: Vec<i64>,
    /// None when both or neither of billable/non-billable are selected.
    pub billable: Option<bool>,
}

impl ReportQuery {
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(start) = self.start_date {
            params.push(("startDate".into(), start.format("%Y-%m-%d").to_string()));
        }
        if let Some(end) = self.end_date {
            params.push(("endDate".into(), end.format("%Y-%m-%d").to_string()));
        }
        if !self.clients.is_empty() {
            params.push(("clients".into(), self.clients.join(",")));
        }
        if !self.projects.is_empty() {
            params.push(("projects".into(), self.projects.join(",")));
        }
        if !self.emp_ids.is_empty() {
            let ids: Vec<String> = self.emp_ids.iter().map(|id| id.to_string()).collect();
            params.push(("emp_ids".into(), ids.join(",")));
        }
        if let Some(billable) = self.billable {
            params.push(("billable".into(), billable.to_string()));
        }
        params
    }
}
