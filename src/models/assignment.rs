//! Role-assignment shapes: the raw wire form and the in-memory editing form.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

/// A project-role assignment as the backend returns it.
///
/// The backend is loosely typed here: ids and hours sometimes arrive as
/// strings, and `employees_with_rates` can be missing entirely. Fields that
/// need numeric coercion stay as raw JSON values until normalization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAssignment {
    #[serde(default)]
    pub role_id: Value,
    #[serde(default)]
    pub role_name: Option<String>,
    #[serde(default)]
    pub estimated_hours: Value,
    #[serde(default)]
    pub employees_with_rates: Value,
}

/// An hourly rate as held by the editing session.
///
/// Server-sourced rates are decimals; rate inputs are raw text that is only
/// parsed at save time (blank or unparseable means "no rate", which the
/// backend accepts).
#[derive(Debug, Clone, PartialEq)]
pub enum RateValue {
    Decimal(f64),
    Text(String),
}

impl RateValue {
    pub fn as_decimal(&self) -> Option<f64> {
        match self {
            RateValue::Decimal(d) => Some(*d),
            RateValue::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl From<f64> for RateValue {
    fn from(d: f64) -> Self {
        RateValue::Decimal(d)
    }
}

impl From<&str> for RateValue {
    fn from(s: &str) -> Self {
        RateValue::Text(s.to_string())
    }
}

/// One role's assignment as edited in the project modal.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleAssignment {
    /// Unique within one project's assignment list. Zero means the wire
    /// value failed integer coercion; save-time validation rejects it.
    pub role_id: i64,
    pub role_name: String,
    /// None means the wire value failed integer coercion; save-time
    /// validation rejects it. Must be positive to save.
    pub estimated_hours: Option<i64>,
    /// Insertion order is kept for display; diffing treats this as a set.
    pub employee_ids: Vec<i64>,
    /// May retain stale entries for ids no longer in `employee_ids`; those
    /// are ignored downstream.
    pub rates: HashMap<i64, RateValue>,
}

impl RoleAssignment {
    pub fn new(role_id: i64, role_name: impl Into<String>, estimated_hours: i64) -> Self {
        Self {
            role_id,
            role_name: role_name.into(),
            estimated_hours: Some(estimated_hours),
            employee_ids: Vec::new(),
            rates: HashMap::new(),
        }
    }

    pub fn with_employees(mut self, ids: impl IntoIterator<Item = i64>) -> Self {
        self.employee_ids = ids.into_iter().collect();
        self
    }

    pub fn with_rate(mut self, emp_id: i64, rate: impl Into<RateValue>) -> Self {
        self.rates.insert(emp_id, rate.into());
        self
    }

    /// Rate to send for an employee: parsed decimal, or None when blank,
    /// unparseable, or never entered. Rate is optional on the wire.
    pub fn rate_for(&self, emp_id: i64) -> Option<f64> {
        self.rates.get(&emp_id).and_then(RateValue::as_decimal)
    }
}
