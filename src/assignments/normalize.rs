//! Server-shaped assignment records to the in-memory editing shape.

use serde_json::Value;

use crate::models::{RateValue, RawAssignment, RoleAssignment};

/// Lenient integer coercion for loosely typed wire fields: accepts numbers,
/// integral floats, and numeric strings. None for everything else.
pub(crate) fn coerce_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

pub(crate) fn coerce_rate(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Convert fetched assignment records into the editing shape.
///
/// Employee order is preserved. Rates are only recorded for employees whose
/// entry carries a usable decimal; a null or missing rate simply has no
/// entry. A missing or non-array employee list yields an empty assignment.
///
/// Malformed numeric fields are not an error here: a bad role id comes out
/// as 0 and bad hours as None, and save-time validation rejects both.
pub fn from_server(raw: &[RawAssignment]) -> Vec<RoleAssignment> {
    raw.iter().map(normalize_one).collect()
}

fn normalize_one(raw: &RawAssignment) -> RoleAssignment {
    let role_id = coerce_int(&raw.role_id).unwrap_or(0);
    let role_name = raw
        .role_name
        .clone()
        .unwrap_or_else(|| format!("Role {}", role_id));
    let estimated_hours = coerce_int(&raw.estimated_hours);

    let mut employee_ids = Vec::new();
    let mut rates = std::collections::HashMap::new();

    if let Some(entries) = raw.employees_with_rates.as_array() {
        for entry in entries {
            let Some(emp_id) = entry.get("emp_id").and_then(coerce_int) else {
                tracing::warn!(role_id, "skipping employee entry with unusable emp_id");
                continue;
            };
            employee_ids.push(emp_id);
            if let Some(rate) = entry.get("rate").and_then(coerce_rate) {
                rates.insert(emp_id, RateValue::Decimal(rate));
            }
        }
    }

    RoleAssignment {
        role_id,
        role_name,
        estimated_hours,
        employee_ids,
        rates,
    }
}
