//! Save-time reconciliation of the edited assignment list against the
//! persisted baseline.
//!
//! Planning is pure: it diffs the two lists into an ordered pipeline of
//! typed operations per role. Execution walks each role's pipeline
//! sequentially; a failure abandons the rest of that role's operations and
//! moves on to the next role, so partial convergence is surfaced rather
//! than rolled back.

use std::collections::{HashMap, HashSet};

use crate::api::ProjectApi;
use crate::error::AppError;
use crate::models::RoleAssignment;
use crate::notify::NotificationSink;

#[derive(Debug, Clone, PartialEq)]
pub enum AssignmentOp {
    /// Unconditional for every role in the final list: creates the
    /// role-to-project link if absent, updates estimated hours if present.
    UpsertRole { role_id: i64, estimated_hours: i64 },
    RemoveEmployee { role_id: i64, emp_id: i64 },
    AddEmployee {
        role_id: i64,
        emp_id: i64,
        rate: Option<f64>,
    },
}

/// One role's ordered operation pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct RolePlan {
    pub role_id: i64,
    pub role_name: String,
    pub ops: Vec<AssignmentOp>,
}

/// Diff the final assignment list against the persisted baseline.
///
/// Per role, in order: the unconditional role upsert, then removal of
/// employees present in the baseline but deselected now, then addition of
/// newly selected employees with their (optional) rates. Removals precede
/// additions so an employee moved between roles in one save is never
/// assigned twice at once.
///
/// Removals only arise from a matching baseline entry, so a brand-new
/// project (empty baseline) plans no removals. Roles present only in the
/// baseline are not touched here; deleting a role goes through the explicit
/// remove-role action, never through omission at save time.
pub fn plan(final_assignments: &[RoleAssignment], prior: &[RoleAssignment]) -> Vec<RolePlan> {
    let prior_by_role: HashMap<i64, &RoleAssignment> =
        prior.iter().map(|r| (r.role_id, r)).collect();

    final_assignments
        .iter()
        .map(|role| {
            let mut ops = vec![AssignmentOp::UpsertRole {
                role_id: role.role_id,
                estimated_hours: role.estimated_hours.unwrap_or(0),
            }];

            let current: HashSet<i64> = role.employee_ids.iter().copied().collect();
            let prior_emps: HashSet<i64> = prior_by_role
                .get(&role.role_id)
                .map(|p| p.employee_ids.iter().copied().collect())
                .unwrap_or_default();

            if let Some(prev) = prior_by_role.get(&role.role_id) {
                for &emp_id in &prev.employee_ids {
                    if !current.contains(&emp_id) {
                        ops.push(AssignmentOp::RemoveEmployee {
                            role_id: role.role_id,
                            emp_id,
                        });
                    }
                }
            }

            for &emp_id in &role.employee_ids {
                if !prior_emps.contains(&emp_id) {
                    ops.push(AssignmentOp::AddEmployee {
                        role_id: role.role_id,
                        emp_id,
                        rate: role.rate_for(emp_id),
                    });
                }
            }

            RolePlan {
                role_id: role.role_id,
                role_name: role.role_name.clone(),
                ops,
            }
        })
        .collect()
}

/// Baseline roles entirely absent from the final list. Save does not delete
/// these; callers log them so the orphaning is at least visible.
pub fn orphaned_roles<'a>(
    final_assignments: &[RoleAssignment],
    prior: &'a [RoleAssignment],
) -> Vec<&'a RoleAssignment> {
    let final_ids: HashSet<i64> = final_assignments.iter().map(|r| r.role_id).collect();
    prior
        .iter()
        .filter(|r| !final_ids.contains(&r.role_id))
        .collect()
}

#[derive(Debug)]
pub struct RoleFailure {
    pub role_id: i64,
    pub role_name: String,
    pub error: AppError,
}

#[derive(Debug, Default)]
pub struct ReconcileReport {
    pub completed: Vec<i64>,
    pub failed: Vec<RoleFailure>,
}

impl ReconcileReport {
    pub fn fully_converged(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Run the planned operations against the backend, one role at a time.
pub async fn execute<A: ProjectApi>(
    api: &A,
    sink: &dyn NotificationSink,
    sow_id: &str,
    plans: &[RolePlan],
) -> ReconcileReport {
    let mut report = ReconcileReport::default();

    for plan in plans {
        match run_role(api, sow_id, plan).await {
            Ok(()) => report.completed.push(plan.role_id),
            Err(error) => {
                tracing::error!(
                    sow_id,
                    role_id = plan.role_id,
                    %error,
                    "role reconciliation failed; continuing with remaining roles"
                );
                sink.notify(&format!("Failed to save role {}.", plan.role_name));
                report.failed.push(RoleFailure {
                    role_id: plan.role_id,
                    role_name: plan.role_name.clone(),
                    error,
                });
            }
        }
    }

    report
}

async fn run_role<A: ProjectApi>(api: &A, sow_id: &str, plan: &RolePlan) -> crate::error::Result<()> {
    for op in &plan.ops {
        match *op {
            AssignmentOp::UpsertRole {
                role_id,
                estimated_hours,
            } => api.assign_role(sow_id, role_id, estimated_hours).await?,
            AssignmentOp::RemoveEmployee { role_id, emp_id } => {
                api.remove_role_employee(sow_id, role_id, emp_id).await?
            }
            AssignmentOp::AddEmployee {
                role_id,
                emp_id,
                rate,
            } => api.assign_employee(sow_id, role_id, emp_id, rate).await?,
        }
    }
    Ok(())
}
