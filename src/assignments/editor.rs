//! In-session state for the project modal's role-assignment list.

use std::collections::HashMap;

use crate::api::ProjectApi;
use crate::error::{AppError, Result};
use crate::models::{RateValue, Role, RoleAssignment};

/// The "assign role" form before the user clicks Add.
#[derive(Debug, Clone, Default)]
pub struct PendingRole {
    /// Role picked from the catalog dropdown.
    pub role_id: Option<i64>,
    /// Non-empty when the user chose "+ Add New Role" instead.
    pub new_role_name: String,
    /// Raw text from the hours input; parsed when the form is committed.
    pub estimated_hours: String,
    pub employee_ids: Vec<i64>,
    pub rates: HashMap<i64, RateValue>,
    /// Set when the form was opened to replace an existing list entry.
    pub editing_index: Option<usize>,
}

impl PendingRole {
    pub fn is_empty(&self) -> bool {
        self.role_id.is_none() && self.new_role_name.trim().is_empty()
    }

    fn positive_hours(&self) -> Option<i64> {
        self.estimated_hours
            .trim()
            .parse::<i64>()
            .ok()
            .filter(|h| *h > 0)
    }

    /// Rates the user typed that actually parse; everything else is left out
    /// so the employee is assigned with no rate.
    fn usable_rates(&self) -> HashMap<i64, RateValue> {
        self.employee_ids
            .iter()
            .filter_map(|id| {
                let rate = self.rates.get(id)?.as_decimal()?;
                Some((*id, RateValue::Decimal(rate)))
            })
            .collect()
    }
}

/// Ordered list of role-assignment edits plus the pending add-role form.
///
/// The session exclusively owns this state for the lifetime of the modal;
/// it is discarded on close or after a successful save.
#[derive(Debug, Default)]
pub struct AssignmentEditor {
    assignments: Vec<RoleAssignment>,
    pub pending: PendingRole,
}

impl AssignmentEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assignments(&self) -> &[RoleAssignment] {
        &self.assignments
    }

    /// Replace the whole list, e.g. with the normalized baseline when a
    /// persisted project is opened for edit.
    pub fn set_assignments(&mut self, assignments: Vec<RoleAssignment>) {
        self.assignments = assignments;
    }

    pub fn reset(&mut self) {
        self.assignments.clear();
        self.pending = PendingRole::default();
    }

    /// Replace in place when `editing_index` addresses an existing entry;
    /// otherwise append, rejecting a role id already in the list.
    ///
    /// Returns a snapshot of the updated list.
    pub fn add_or_update_role(
        &mut self,
        role: RoleAssignment,
        editing_index: Option<usize>,
    ) -> Result<Vec<RoleAssignment>> {
        match editing_index {
            Some(index) if index < self.assignments.len() => {
                self.assignments[index] = role;
            }
            _ => {
                if self.assignments.iter().any(|r| r.role_id == role.role_id) {
                    return Err(AppError::DuplicateRole(role.role_name));
                }
                self.assignments.push(role);
            }
        }
        Ok(self.assignments.clone())
    }

    /// Remove the entry at `index`.
    ///
    /// When the session edits a persisted project (`persisted_sow_id` is
    /// set), the server-side role link is deleted first; if that call fails
    /// the local list is left untouched and the error is returned.
    pub async fn remove_role<A: ProjectApi>(
        &mut self,
        index: usize,
        persisted_sow_id: Option<&str>,
        api: &A,
    ) -> Result<RoleAssignment> {
        let role = self
            .assignments
            .get(index)
            .ok_or_else(|| AppError::validation(format!("no role at index {}", index)))?;

        if let Some(sow_id) = persisted_sow_id {
            api.remove_project_role(sow_id, role.role_id).await?;
            tracing::info!(sow_id, role_id = role.role_id, "removed role from project");
        }

        Ok(self.assignments.remove(index))
    }

    /// Replace an entry's employee set. Rates for deselected employees are
    /// kept; they are ignored downstream and revive if the employee is
    /// re-added.
    pub fn update_employees_for_role(&mut self, index: usize, employee_ids: Vec<i64>) -> Result<()> {
        let role = self.role_mut(index)?;
        role.employee_ids = employee_ids;
        Ok(())
    }

    /// Store the raw rate text; coercion happens only at save time.
    pub fn update_rate_for_role(&mut self, index: usize, emp_id: i64, rate_text: &str) -> Result<()> {
        let role = self.role_mut(index)?;
        role.rates.insert(emp_id, RateValue::Text(rate_text.to_string()));
        Ok(())
    }

    /// In-place hour edits on already-added roles are parse-or-zero; only
    /// the pending form and the final pre-save check treat bad hours as a
    /// hard failure.
    pub fn set_role_hours(&mut self, index: usize, hours_text: &str) -> Result<()> {
        let role = self.role_mut(index)?;
        role.estimated_hours = Some(hours_text.trim().parse().unwrap_or(0));
        Ok(())
    }

    /// The "+ Add" button: validate the pending form and move it into the
    /// list. A pending new-role name is first created in the catalog so the
    /// server assigns its id.
    pub async fn commit_pending<A: ProjectApi>(
        &mut self,
        api: &A,
        catalog: &mut Vec<Role>,
    ) -> Result<Vec<RoleAssignment>> {
        let mut role_id = self.pending.role_id;
        let mut role_name = None;

        let new_name = self.pending.new_role_name.trim();
        if !new_name.is_empty() {
            let created = api.create_role(new_name).await?;
            role_id = Some(created.role_id);
            role_name = Some(created.role_name.clone());
            catalog.push(created);
        }

        let (Some(role_id), Some(hours)) = (role_id, self.pending.positive_hours()) else {
            return Err(AppError::validation(
                "Select a role and set estimated hours; employees are optional.",
            ));
        };

        let role_name = role_name
            .or_else(|| {
                catalog
                    .iter()
                    .find(|r| r.role_id == role_id)
                    .map(|r| r.role_name.clone())
            })
            .unwrap_or_else(|| format!("Role {}", role_id));

        let role = RoleAssignment {
            role_id,
            role_name,
            estimated_hours: Some(hours),
            employee_ids: self.pending.employee_ids.clone(),
            rates: self.pending.usable_rates(),
        };

        let list = self.add_or_update_role(role, self.pending.editing_index)?;
        self.pending = PendingRole::default();
        Ok(list)
    }

    /// Save-time auto-fold of a selected-but-never-Added role.
    ///
    /// A selected role with unusable hours blocks the save; a selected role
    /// already in the list is skipped. A pending *new-role* name is not
    /// folded: it has no server id yet, and Add is the only path that
    /// creates one.
    pub fn fold_pending_for_save(&mut self, catalog: &[Role]) -> Result<()> {
        let Some(role_id) = self.pending.role_id else {
            return Ok(());
        };

        let Some(hours) = self.pending.positive_hours() else {
            return Err(AppError::validation(
                "Please enter valid estimated hours for the selected role.",
            ));
        };

        if self.assignments.iter().any(|r| r.role_id == role_id) {
            return Ok(());
        }
        let Some(role) = catalog.iter().find(|r| r.role_id == role_id) else {
            return Ok(());
        };

        self.assignments.push(RoleAssignment {
            role_id,
            role_name: role.role_name.clone(),
            estimated_hours: Some(hours),
            employee_ids: self.pending.employee_ids.clone(),
            rates: self.pending.usable_rates(),
        });
        self.pending = PendingRole::default();
        Ok(())
    }

    fn role_mut(&mut self, index: usize) -> Result<&mut RoleAssignment> {
        self.assignments
            .get_mut(index)
            .ok_or_else(|| AppError::validation(format!("no role at index {}", index)))
    }
}
