//! Remote operations against the timesheet backend.
//!
//! Every screen talks to the backend through [`ProjectApi`] so the editing
//! and reconciliation logic can be exercised against a recording fake.

mod client;

pub use client::ApiClient;

use crate::error::Result;
use crate::models::{
    Client, CreatedProject, DailyHoursRow, Employee, ProjectPayload, RawAssignment, ReportQuery,
    ReportRow, Role,
};

#[allow(async_fn_in_trait)]
pub trait ProjectApi {
    async fn list_projects(&self, company_id: i64) -> Result<Vec<crate::models::Project>>;
    async fn create_project(&self, payload: &ProjectPayload) -> Result<CreatedProject>;
    async fn update_project(&self, sow_id: &str, payload: &ProjectPayload) -> Result<()>;
    async fn delete_project(&self, sow_id: &str) -> Result<()>;

    async fn list_roles(&self) -> Result<Vec<Role>>;
    /// Create a role in the catalog; the server generates the role id.
    async fn create_role(&self, role_name: &str) -> Result<Role>;
    async fn list_employees(&self) -> Result<Vec<Employee>>;
    async fn clients_by_billable(&self, billable: bool) -> Result<Vec<Client>>;

    /// A project's persisted role assignments with nested employee+rate lists.
    async fn project_assignments(&self, sow_id: &str) -> Result<Vec<RawAssignment>>;
    /// Idempotent: links the role to the project if absent, updates the
    /// estimated hours if present.
    async fn assign_role(&self, sow_id: &str, role_id: i64, estimated_hours: i64) -> Result<()>;
    async fn assign_employee(
        &self,
        sow_id: &str,
        role_id: i64,
        emp_id: i64,
        rate: Option<f64>,
    ) -> Result<()>;
    async fn remove_role_employee(&self, sow_id: &str, role_id: i64, emp_id: i64) -> Result<()>;
    async fn remove_project_role(&self, sow_id: &str, role_id: i64) -> Result<()>;

    async fn daily_report(&self, query: &ReportQuery) -> Result<Vec<ReportRow>>;
    async fn daily_hours_report(&self, query: &ReportQuery) -> Result<Vec<DailyHoursRow>>;
}
