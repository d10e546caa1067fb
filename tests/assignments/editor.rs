use timedesk::assignments::AssignmentEditor;
use timedesk::error::AppError;
use timedesk::models::{RateValue, RoleAssignment};

use crate::common::{Call, MockApi, role};

fn assignment(role_id: i64, name: &str, hours: i64) -> RoleAssignment {
    RoleAssignment::new(role_id, name, hours)
}

#[test]
fn test_append_rejects_duplicate_role_id() {
    let mut editor = AssignmentEditor::new();
    editor
        .add_or_update_role(assignment(1, "Developer", 40), None)
        .unwrap();

    let err = editor
        .add_or_update_role(assignment(1, "Developer", 80), None)
        .unwrap_err();
    assert!(matches!(err, AppError::DuplicateRole(_)));
    assert_eq!(editor.assignments().len(), 1);
    assert_eq!(editor.assignments()[0].estimated_hours, Some(40));
}

#[test]
fn test_index_replace_keeps_position_and_allows_same_id() {
    let mut editor = AssignmentEditor::new();
    editor
        .add_or_update_role(assignment(1, "Developer", 40), None)
        .unwrap();
    editor
        .add_or_update_role(assignment(2, "QA", 20), None)
        .unwrap();

    let list = editor
        .add_or_update_role(assignment(1, "Developer", 60), Some(0))
        .unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].role_id, 1);
    assert_eq!(list[0].estimated_hours, Some(60));
    assert_eq!(list[1].role_id, 2);
}

#[test]
fn test_out_of_range_editing_index_falls_back_to_append() {
    let mut editor = AssignmentEditor::new();
    editor
        .add_or_update_role(assignment(1, "Developer", 40), Some(5))
        .unwrap();
    assert_eq!(editor.assignments().len(), 1);
}

#[tokio::test]
async fn test_remove_role_on_new_project_makes_no_remote_call() {
    let api = MockApi::new();
    let mut editor = AssignmentEditor::new();
    editor
        .add_or_update_role(assignment(1, "Developer", 40), None)
        .unwrap();

    let removed = editor.remove_role(0, None, &api).await.unwrap();
    assert_eq!(removed.role_id, 1);
    assert!(editor.assignments().is_empty());
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn test_remove_role_in_edit_mode_deletes_remotely_first() {
    let api = MockApi::new();
    let mut editor = AssignmentEditor::new();
    editor
        .add_or_update_role(assignment(4, "BA", 30), None)
        .unwrap();

    editor.remove_role(0, Some("SOW-9"), &api).await.unwrap();
    assert!(editor.assignments().is_empty());
    assert_eq!(
        api.calls(),
        vec![Call::RemoveProjectRole {
            sow_id: "SOW-9".to_string(),
            role_id: 4
        }]
    );
}

#[tokio::test]
async fn test_failed_remote_delete_leaves_local_list_unchanged() {
    let api = MockApi::new();
    api.fail_on("remove_project_role");

    let mut editor = AssignmentEditor::new();
    editor
        .add_or_update_role(assignment(4, "BA", 30), None)
        .unwrap();

    let err = editor.remove_role(0, Some("SOW-9"), &api).await.unwrap_err();
    assert!(matches!(err, AppError::Api { .. }));
    assert_eq!(editor.assignments().len(), 1, "role must remain visible");
}

#[test]
fn test_deselecting_employee_keeps_stale_rate_entry() {
    let mut editor = AssignmentEditor::new();
    editor
        .add_or_update_role(
            assignment(1, "Developer", 40)
                .with_employees([7, 8])
                .with_rate(7, 50.0)
                .with_rate(8, 60.0),
            None,
        )
        .unwrap();

    editor.update_employees_for_role(0, vec![8]).unwrap();
    let role = &editor.assignments()[0];
    assert_eq!(role.employee_ids, vec![8]);
    // rate for 7 is retained but harmless
    assert_eq!(role.rate_for(7), Some(50.0));
}

#[test]
fn test_rate_edits_store_raw_text_until_save() {
    let mut editor = AssignmentEditor::new();
    editor
        .add_or_update_role(assignment(1, "Developer", 40).with_employees([7]), None)
        .unwrap();

    editor.update_rate_for_role(0, 7, "72.5").unwrap();
    assert_eq!(
        editor.assignments()[0].rates.get(&7),
        Some(&RateValue::Text("72.5".to_string()))
    );

    editor.update_rate_for_role(0, 7, "not a number").unwrap();
    assert_eq!(editor.assignments()[0].rate_for(7), None);
}

#[test]
fn test_inline_hour_edit_is_parse_or_zero() {
    let mut editor = AssignmentEditor::new();
    editor
        .add_or_update_role(assignment(1, "Developer", 40), None)
        .unwrap();

    editor.set_role_hours(0, "55").unwrap();
    assert_eq!(editor.assignments()[0].estimated_hours, Some(55));

    editor.set_role_hours(0, "whoops").unwrap();
    assert_eq!(editor.assignments()[0].estimated_hours, Some(0));
}

#[tokio::test]
async fn test_commit_pending_requires_role_and_positive_hours() {
    let api = MockApi::new();
    let mut catalog = vec![role(1, "Developer")];
    let mut editor = AssignmentEditor::new();

    editor.pending.role_id = Some(1);
    editor.pending.estimated_hours = "0".to_string();
    let err = editor.commit_pending(&api, &mut catalog).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert!(editor.assignments().is_empty());

    editor.pending.estimated_hours = "40".to_string();
    editor.pending.employee_ids = vec![7];
    editor.pending.rates.insert(7, RateValue::Text("90".into()));
    let list = editor.commit_pending(&api, &mut catalog).await.unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].role_name, "Developer");
    assert_eq!(list[0].rate_for(7), Some(90.0));
    // pending form is cleared after a successful add
    assert!(editor.pending.is_empty());
}

#[tokio::test]
async fn test_commit_pending_creates_new_catalog_role_first() {
    let api = MockApi::new();
    let mut catalog = Vec::new();
    let mut editor = AssignmentEditor::new();

    editor.pending.new_role_name = "Data Engineer".to_string();
    editor.pending.estimated_hours = "25".to_string();

    let list = editor.commit_pending(&api, &mut catalog).await.unwrap();
    assert_eq!(api.calls(), vec![Call::CreateRole("Data Engineer".into())]);
    assert_eq!(catalog.len(), 1);
    assert_eq!(list[0].role_id, catalog[0].role_id);
    assert_eq!(list[0].role_name, "Data Engineer");
}

#[test]
fn test_fold_skips_duplicates_and_rejects_bad_hours() {
    let catalog = vec![role(1, "Developer"), role(2, "QA")];
    let mut editor = AssignmentEditor::new();
    editor
        .add_or_update_role(assignment(1, "Developer", 40), None)
        .unwrap();

    // duplicate of an already-added role: silently skipped
    editor.pending.role_id = Some(1);
    editor.pending.estimated_hours = "10".to_string();
    editor.fold_pending_for_save(&catalog).unwrap();
    assert_eq!(editor.assignments().len(), 1);

    // selected role with unusable hours blocks the save
    editor.pending.role_id = Some(2);
    editor.pending.estimated_hours = "".to_string();
    let err = editor.fold_pending_for_save(&catalog).unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    // valid pending selection folds in
    editor.pending.estimated_hours = "15".to_string();
    editor.fold_pending_for_save(&catalog).unwrap();
    assert_eq!(editor.assignments().len(), 2);
    assert_eq!(editor.assignments()[1].role_id, 2);
    assert_eq!(editor.assignments()[1].estimated_hours, Some(15));
}
