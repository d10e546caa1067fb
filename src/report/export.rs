//! CSV export of the daily-hours feed.

use std::io::Write;
use std::path::Path;

use serde_json::Value;

use crate::error::{AppError, Result};
use crate::models::{DailyHoursRow, parse_wire_date};

/// Write rows as CSV, using the first row's columns (in its key order) as
/// the header. Rows are ordered by their `entry_date` column first.
pub fn write_daily_hours_csv<W: Write>(rows: &[DailyHoursRow], out: W) -> Result<()> {
    let Some(first) = rows.first() else {
        return Err(AppError::validation(
            "No data available for the selected filters.",
        ));
    };

    let mut ordered: Vec<&DailyHoursRow> = rows.iter().collect();
    ordered.sort_by_key(|row| entry_date(row));

    let columns: Vec<&String> = first.keys().collect();

    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(&columns)?;
    for row in ordered {
        let record: Vec<String> = columns
            .iter()
            .map(|col| cell(row.get(col.as_str())))
            .collect();
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn export_daily_hours_csv(rows: &[DailyHoursRow], path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_daily_hours_csv(rows, file)?;
    tracing::info!(path = %path.display(), rows = rows.len(), "exported daily hours CSV");
    Ok(())
}

fn entry_date(row: &DailyHoursRow) -> Option<chrono::NaiveDate> {
    row.get("entry_date")
        .and_then(Value::as_str)
        .and_then(parse_wire_date)
}

fn cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
