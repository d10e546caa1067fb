//! Project form controller: owns the project draft and the assignment
//! editing session, and orchestrates the save sequence.

use chrono::NaiveDate;

use crate::api::ProjectApi;
use crate::assignments::{self, AssignmentEditor, ReconcileReport};
use crate::error::{AppError, Result};
use crate::models::{
    Employee, Project, ProjectPayload, ProjectStatus, Role, RoleAssignment, parse_wire_date,
};
use crate::notify::NotificationSink;

/// Project-level fields as edited in the modal.
#[derive(Debug, Clone, Default)]
pub struct ProjectDraft {
    pub project_name: String,
    /// Absent until the first successful create.
    pub sow_id: Option<String>,
    pub current_status: ProjectStatus,
    pub original_start_date: Option<NaiveDate>,
    pub original_end_date: Option<NaiveDate>,
    /// Raw text from the hours input; validated at save time.
    pub total_projected_hours: String,
}

#[derive(Debug)]
pub struct SaveOutcome {
    pub sow_id: String,
    pub report: ReconcileReport,
}

/// One project-management modal instance.
pub struct ProjectForm<A, N> {
    api: A,
    sink: N,
    company_id: i64,
    pub draft: ProjectDraft,
    pub editor: AssignmentEditor,
    projects: Vec<Project>,
    employees: Vec<Employee>,
    roles: Vec<Role>,
    editing_existing: bool,
    saving: bool,
}

impl<A: ProjectApi, N: NotificationSink> ProjectForm<A, N> {
    pub fn new(api: A, sink: N, company_id: i64) -> Self {
        Self {
            api,
            sink,
            company_id,
            draft: ProjectDraft::default(),
            editor: AssignmentEditor::new(),
            projects: Vec::new(),
            employees: Vec::new(),
            roles: Vec::new(),
            editing_existing: false,
            saving: false,
        }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn is_editing_existing(&self) -> bool {
        self.editing_existing
    }

    /// Fetch the project list and the dropdown data for the modal.
    pub async fn load(&mut self) -> Result<()> {
        let (projects, employees, roles) = tokio::try_join!(
            self.api.list_projects(self.company_id),
            self.api.list_employees(),
            self.api.list_roles(),
        )?;
        self.projects = projects;
        self.employees = employees;
        self.roles = roles;
        Ok(())
    }

    /// Start a fresh "add project" session, discarding any pending edits.
    pub fn open_new(&mut self) {
        self.draft = ProjectDraft::default();
        self.editor.reset();
        self.editing_existing = false;
    }

    /// Open a persisted project for editing: populate the draft and load the
    /// assignment baseline into the editor.
    pub async fn open_for_edit(&mut self, project: &Project) -> Result<()> {
        self.draft = ProjectDraft {
            project_name: project.project_name.clone(),
            sow_id: Some(project.sow_id.clone()),
            current_status: project.current_status,
            original_start_date: project
                .original_start_date
                .as_deref()
                .and_then(parse_wire_date),
            original_end_date: project
                .original_end_date
                .as_deref()
                .and_then(parse_wire_date),
            total_projected_hours: project
                .total_projected_hours
                .map(|h| h.to_string())
                .unwrap_or_default(),
        };
        self.editing_existing = true;

        let (raw, employees, roles) = tokio::try_join!(
            self.api.project_assignments(&project.sow_id),
            self.api.list_employees(),
            self.api.list_roles(),
        )?;
        self.employees = employees;
        self.roles = roles;
        self.editor.reset();
        self.editor.set_assignments(assignments::from_server(&raw));
        Ok(())
    }

    pub async fn delete_project(&mut self, sow_id: &str) -> Result<()> {
        self.api.delete_project(sow_id).await?;
        tracing::info!(sow_id, "deleted project");
        self.projects = self.api.list_projects(self.company_id).await?;
        if self.draft.sow_id.as_deref() == Some(sow_id) {
            self.open_new();
        }
        Ok(())
    }

    /// The "+ Add" button of the assign-role section.
    pub async fn commit_pending_role(&mut self) -> Result<Vec<RoleAssignment>> {
        self.editor.commit_pending(&self.api, &mut self.roles).await
    }

    /// Remove a role from the list (and, in edit mode, from the server).
    pub async fn remove_role(&mut self, index: usize) -> Result<RoleAssignment> {
        let persisted = if self.editing_existing {
            self.draft.sow_id.as_deref()
        } else {
            None
        };
        self.editor.remove_role(index, persisted, &self.api).await
    }

    /// Save sequence: validate, fold the pending role, upsert the project,
    /// reconcile assignments, refresh the list, reset the session.
    ///
    /// A second save while one is in flight is rejected up front.
    pub async fn save(&mut self) -> Result<SaveOutcome> {
        if self.saving {
            return Err(AppError::validation("A save is already in progress."));
        }
        self.saving = true;
        let result = self.save_inner().await;
        self.saving = false;
        result
    }

    async fn save_inner(&mut self) -> Result<SaveOutcome> {
        let (start_date, end_date, projected_hours) = self.validate_draft()?;

        self.editor.fold_pending_for_save(&self.roles)?;
        if self.editor.assignments().is_empty() {
            return Err(AppError::validation(
                "Please assign at least one role (employees optional).",
            ));
        }
        validate_assignments(self.editor.assignments())?;

        let payload = ProjectPayload {
            project_name: self.draft.project_name.trim().to_string(),
            current_status: self.draft.current_status,
            original_start_date: start_date,
            original_end_date: end_date,
            total_projected_hours: projected_hours,
            company_id: self.company_id,
        };

        // A sow id on the draft means the project row exists, even when a
        // previous save failed partway through; retrying must update it,
        // not create a duplicate.
        let persisted = self.draft.sow_id.is_some();
        let sow_id = match self.draft.sow_id.clone() {
            Some(sow_id) => {
                self.api.update_project(&sow_id, &payload).await?;
                sow_id
            }
            None => {
                let created = self.api.create_project(&payload).await?;
                tracing::info!(sow_id = %created.sow_id, "created project");
                self.draft.sow_id = Some(created.sow_id.clone());
                created.sow_id
            }
        };

        // Baseline for diffing; new projects have nothing persisted yet.
        let prior = if persisted {
            assignments::from_server(&self.api.project_assignments(&sow_id).await?)
        } else {
            Vec::new()
        };

        for orphan in assignments::orphaned_roles(self.editor.assignments(), &prior) {
            tracing::warn!(
                %sow_id,
                role_id = orphan.role_id,
                role_name = %orphan.role_name,
                "persisted role no longer in the edited list; it stays on the server"
            );
        }

        let plans = assignments::plan(self.editor.assignments(), &prior);
        let report = assignments::execute(&self.api, &self.sink, &sow_id, &plans).await;

        self.projects = self.api.list_projects(self.company_id).await?;
        self.open_new();

        Ok(SaveOutcome { sow_id, report })
    }

    fn validate_draft(&self) -> Result<(NaiveDate, NaiveDate, i64)> {
        if self.draft.project_name.trim().is_empty() {
            return Err(AppError::validation("Project Name is required."));
        }
        let start = self
            .draft
            .original_start_date
            .ok_or_else(|| AppError::validation("Start Date is required."))?;
        let end = self
            .draft
            .original_end_date
            .ok_or_else(|| AppError::validation("End Date is required."))?;
        let hours: i64 = self
            .draft
            .total_projected_hours
            .trim()
            .parse()
            .ok()
            .filter(|h| *h > 0)
            .ok_or_else(|| AppError::validation("Estimated Hours must be a positive number."))?;
        Ok((start, end, hours))
    }
}

/// Final pre-save check on the assignment list. Catches what lenient
/// normalization let through: unusable role ids and missing or non-positive
/// hours.
fn validate_assignments(assignments: &[RoleAssignment]) -> Result<()> {
    for role in assignments {
        if role.role_id <= 0 {
            return Err(AppError::validation(format!(
                "Role \"{}\" has an invalid id.",
                role.role_name
            )));
        }
        if !role.estimated_hours.is_some_and(|h| h > 0) {
            return Err(AppError::validation(format!(
                "Estimated hours for role \"{}\" must be a positive number.",
                role.role_name
            )));
        }
    }
    Ok(())
}
