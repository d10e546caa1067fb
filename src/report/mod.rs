//! Daily timesheet report: date-range presets, filters, client-side
//! sorting and pagination over fetched rows.

mod export;

pub use export::*;

use chrono::{Datelike, NaiveDate};

use crate::models::{ReportQuery, ReportRow};

pub const PAGE_SIZE: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateRange {
    #[default]
    MonthToDate,
    LastMonth,
    Custom {
        start: NaiveDate,
        end: NaiveDate,
    },
}

impl DateRange {
    /// Concrete start/end dates relative to `today`.
    pub fn resolve(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        match *self {
            DateRange::MonthToDate => {
                let start = today.with_day(1).unwrap_or(today);
                (start, today)
            }
            DateRange::LastMonth => {
                let first_of_current = today.with_day(1).unwrap_or(today);
                let end = first_of_current.pred_opt().unwrap_or(first_of_current);
                let start = end.with_day(1).unwrap_or(end);
                (start, end)
            }
            DateRange::Custom { start, end } => (start, end),
        }
    }
}

/// Filter panel state for the daily report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportFilters {
    pub range: DateRange,
    pub clients: Vec<String>,
    pub projects: Vec<String>,
    pub emp_ids: Vec<i64>,
    pub billable: bool,
    pub non_billable: bool,
}

impl Default for ReportFilters {
    fn default() -> Self {
        Self {
            range: DateRange::default(),
            clients: Vec::new(),
            projects: Vec::new(),
            emp_ids: Vec::new(),
            billable: true,
            non_billable: false,
        }
    }
}

impl ReportFilters {
    /// "Clear All": drop every selection, back to billable-only.
    pub fn clear(&mut self) {
        *self = Self {
            range: self.range,
            ..Self::default()
        };
    }

    /// The billable query flag: set only when exactly one of the two
    /// checkboxes is ticked; both or neither means no filtering.
    pub fn billable_param(&self) -> Option<bool> {
        match (self.billable, self.non_billable) {
            (true, false) => Some(true),
            (false, true) => Some(false),
            _ => None,
        }
    }

    pub fn to_query(&self, today: NaiveDate) -> ReportQuery {
        let (start, end) = self.range.resolve(today);
        ReportQuery {
            start_date: Some(start),
            end_date: Some(end),
            clients: self.clients.clone(),
            projects: self.projects.clone(),
            emp_ids: self.emp_ids.clone(),
            billable: self.billable_param(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    EmployeeName,
    Billable,
    CompanyName,
    ProjectCategory,
    PeriodStartDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SortConfig {
    pub key: Option<SortKey>,
    pub direction: SortDirection,
}

impl SortConfig {
    /// Clicking a column header: same column toggles direction, a new
    /// column starts ascending.
    pub fn toggle(&mut self, key: SortKey) {
        if self.key == Some(key) && self.direction == SortDirection::Asc {
            self.direction = SortDirection::Desc;
        } else {
            self.key = Some(key);
            self.direction = SortDirection::Asc;
        }
    }
}

/// Stable sort of report rows by the configured column. String columns
/// compare case-insensitively; the period column compares as dates with
/// unparseable dates first.
pub fn sort_rows(rows: &mut [ReportRow], config: SortConfig) {
    let Some(key) = config.key else {
        return;
    };

    rows.sort_by(|a, b| {
        let ordering = match key {
            SortKey::EmployeeName => a
                .employee_name
                .to_lowercase()
                .cmp(&b.employee_name.to_lowercase()),
            SortKey::CompanyName => a
                .company_name
                .to_lowercase()
                .cmp(&b.company_name.to_lowercase()),
            SortKey::ProjectCategory => a
                .project_category
                .to_lowercase()
                .cmp(&b.project_category.to_lowercase()),
            SortKey::Billable => a.is_billable().cmp(&b.is_billable()),
            SortKey::PeriodStartDate => a.period_start().cmp(&b.period_start()),
        };
        match config.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

pub fn total_pages(row_count: usize) -> usize {
    row_count.div_ceil(PAGE_SIZE).max(1)
}

/// The rows for a 1-based page number, clamped to the valid range.
pub fn page_rows(rows: &[ReportRow], page: usize) -> &[ReportRow] {
    let page = page.clamp(1, total_pages(rows.len()));
    let first = (page - 1) * PAGE_SIZE;
    let last = (first + PAGE_SIZE).min(rows.len());
    &rows[first..last]
}
