//! Shared test fixtures: a recording fake of the backend API plus builders.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use timedesk::api::ProjectApi;
use timedesk::error::{AppError, Result};
use timedesk::models::{
    Client, CreatedProject, DailyHoursRow, Employee, Project, ProjectPayload, RawAssignment,
    ReportQuery, ReportRow, Role,
};

/// Every remote operation the fake has been asked to perform, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListProjects(i64),
    CreateProject(String),
    UpdateProject(String),
    DeleteProject(String),
    ListRoles,
    CreateRole(String),
    ListEmployees,
    ClientsByBillable(bool),
    ProjectAssignments(String),
    AssignRole {
        sow_id: String,
        role_id: i64,
        estimated_hours: i64,
    },
    AssignEmployee {
        sow_id: String,
        role_id: i64,
        emp_id: i64,
        rate: Option<f64>,
    },
    RemoveRoleEmployee {
        sow_id: String,
        role_id: i64,
        emp_id: i64,
    },
    RemoveProjectRole {
        sow_id: String,
        role_id: i64,
    },
    DailyReport,
    DailyHoursReport,
}

#[derive(Default)]
struct Inner {
    calls: Mutex<Vec<Call>>,
    fail: Mutex<HashSet<String>>,
    projects: Mutex<Vec<Project>>,
    roles: Mutex<Vec<Role>>,
    employees: Mutex<Vec<Employee>>,
    assignments: Mutex<serde_json::Value>,
    report_rows: Mutex<Vec<ReportRow>>,
    hours_rows: Mutex<Vec<DailyHoursRow>>,
    next_id: Mutex<i64>,
}

/// Recording fake backend. Clones share state, so tests keep a handle to
/// inspect calls made by code that owns another clone.
#[derive(Clone, Default)]
pub struct MockApi {
    inner: Arc<Inner>,
}

impl MockApi {
    pub fn new() -> Self {
        let api = Self::default();
        *api.inner.next_id.lock().unwrap() = 100;
        api
    }

    /// Make the named operation fail with a 500 from now on.
    pub fn fail_on(&self, op: &str) {
        self.inner.fail.lock().unwrap().insert(op.to_string());
    }

    /// Let previously failing operations succeed again.
    pub fn clear_failures(&self) {
        self.inner.fail.lock().unwrap().clear();
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.inner.calls.lock().unwrap().clear();
    }

    pub fn set_roles(&self, roles: Vec<Role>) {
        *self.inner.roles.lock().unwrap() = roles;
    }

    pub fn set_employees(&self, employees: Vec<Employee>) {
        *self.inner.employees.lock().unwrap() = employees;
    }

    /// Raw assignment payload served by `project_assignments`.
    pub fn set_assignments(&self, assignments: serde_json::Value) {
        *self.inner.assignments.lock().unwrap() = assignments;
    }

    pub fn set_hours_rows(&self, rows: Vec<DailyHoursRow>) {
        *self.inner.hours_rows.lock().unwrap() = rows;
    }

    fn record(&self, call: Call) {
        self.inner.calls.lock().unwrap().push(call);
    }

    fn check(&self, op: &str) -> Result<()> {
        if self.inner.fail.lock().unwrap().contains(op) {
            return Err(AppError::Api {
                status: 500,
                message: format!("{} failed", op),
            });
        }
        Ok(())
    }

    fn next_id(&self) -> i64 {
        let mut id = self.inner.next_id.lock().unwrap();
        *id += 1;
        *id
    }
}

impl ProjectApi for MockApi {
    async fn list_projects(&self, company_id: i64) -> Result<Vec<Project>> {
        self.record(Call::ListProjects(company_id));
        self.check("list_projects")?;
        Ok(self.inner.projects.lock().unwrap().clone())
    }

    async fn create_project(&self, payload: &ProjectPayload) -> Result<CreatedProject> {
        self.record(Call::CreateProject(payload.project_name.clone()));
        self.check("create_project")?;
        let sow_id = format!("SOW-{}", self.next_id());
        self.inner.projects.lock().unwrap().push(Project {
            sow_id: sow_id.clone(),
            project_name: payload.project_name.clone(),
            current_status: payload.current_status,
            original_start_date: None,
            original_end_date: None,
            total_projected_hours: Some(payload.total_projected_hours),
            project_category: None,
            company_id: Some(payload.company_id),
        });
        Ok(CreatedProject { sow_id })
    }

    async fn update_project(&self, sow_id: &str, _payload: &ProjectPayload) -> Result<()> {
        self.record(Call::UpdateProject(sow_id.to_string()));
        self.check("update_project")
    }

    async fn delete_project(&self, sow_id: &str) -> Result<()> {
        self.record(Call::DeleteProject(sow_id.to_string()));
        self.check("delete_project")?;
        self.inner
            .projects
            .lock()
            .unwrap()
            .retain(|p| p.sow_id != sow_id);
        Ok(())
    }

    async fn list_roles(&self) -> Result<Vec<Role>> {
        self.record(Call::ListRoles);
        self.check("list_roles")?;
        Ok(self.inner.roles.lock().unwrap().clone())
    }

    async fn create_role(&self, role_name: &str) -> Result<Role> {
        self.record(Call::CreateRole(role_name.to_string()));
        self.check("create_role")?;
        let role = Role {
            role_id: self.next_id(),
            role_name: role_name.to_string(),
        };
        self.inner.roles.lock().unwrap().push(role.clone());
        Ok(role)
    }

    async fn list_employees(&self) -> Result<Vec<Employee>> {
        self.record(Call::ListEmployees);
        self.check("list_employees")?;
        Ok(self.inner.employees.lock().unwrap().clone())
    }

    async fn clients_by_billable(&self, billable: bool) -> Result<Vec<Client>> {
        self.record(Call::ClientsByBillable(billable));
        self.check("clients_by_billable")?;
        Ok(Vec::new())
    }

    async fn project_assignments(&self, sow_id: &str) -> Result<Vec<RawAssignment>> {
        self.record(Call::ProjectAssignments(sow_id.to_string()));
        self.check("project_assignments")?;
        let value = self.inner.assignments.lock().unwrap().clone();
        if value.is_null() {
            return Ok(Vec::new());
        }
        serde_json::from_value(value).map_err(|e| AppError::Api {
            status: 500,
            message: e.to_string(),
        })
    }

    async fn assign_role(&self, sow_id: &str, role_id: i64, estimated_hours: i64) -> Result<()> {
        self.record(Call::AssignRole {
            sow_id: sow_id.to_string(),
            role_id,
            estimated_hours,
        });
        self.check("assign_role")
    }

    async fn assign_employee(
        &self,
        sow_id: &str,
        role_id: i64,
        emp_id: i64,
        rate: Option<f64>,
    ) -> Result<()> {
        self.record(Call::AssignEmployee {
            sow_id: sow_id.to_string(),
            role_id,
            emp_id,
            rate,
        });
        self.check("assign_employee")
    }

    async fn remove_role_employee(&self, sow_id: &str, role_id: i64, emp_id: i64) -> Result<()> {
        self.record(Call::RemoveRoleEmployee {
            sow_id: sow_id.to_string(),
            role_id,
            emp_id,
        });
        self.check("remove_role_employee")
    }

    async fn remove_project_role(&self, sow_id: &str, role_id: i64) -> Result<()> {
        self.record(Call::RemoveProjectRole {
            sow_id: sow_id.to_string(),
            role_id,
        });
        self.check("remove_project_role")
    }

    async fn daily_report(&self, _query: &ReportQuery) -> Result<Vec<ReportRow>> {
        self.record(Call::DailyReport);
        self.check("daily_report")?;
        Ok(self.inner.report_rows.lock().unwrap().clone())
    }

    async fn daily_hours_report(&self, _query: &ReportQuery) -> Result<Vec<DailyHoursRow>> {
        self.record(Call::DailyHoursReport);
        self.check("daily_hours_report")?;
        Ok(self.inner.hours_rows.lock().unwrap().clone())
    }
}

pub fn role(role_id: i64, role_name: &str) -> Role {
    Role {
        role_id,
        role_name: role_name.to_string(),
    }
}

pub fn employee(emp_id: i64, first: &str, last: &str) -> Employee {
    Employee {
        emp_id,
        first_name: Some(first.to_string()),
        last_name: Some(last.to_string()),
    }
}

pub fn project(sow_id: &str, name: &str) -> Project {
    Project {
        sow_id: sow_id.to_string(),
        project_name: name.to_string(),
        current_status: Default::default(),
        original_start_date: Some("2025-01-01".to_string()),
        original_end_date: Some("2025-06-30".to_string()),
        total_projected_hours: Some(500),
        project_category: None,
        company_id: Some(1),
    }
}
