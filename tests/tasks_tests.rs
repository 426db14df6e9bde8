//! Reconciliation rules for the dashboard's task collection.

use doit::tasks::{append_if_matching, matches_filter, reconcile_updated, remove_by_id};
use doit::types::{Task, TaskFilter};

fn task(id: i64, title: &str, completed: bool) -> Task {
    Task {
        id,
        title: title.to_string(),
        description: None,
        completed,
        priority: None,
        due_date: None,
        category: None,
        created_at: "2026-02-15T10:30:00".to_string(),
        updated_at: None,
    }
}

#[test]
fn filter_predicates() {
    let open = task(1, "open", false);
    let done = task(2, "done", true);

    assert!(matches_filter(&open, TaskFilter::All));
    assert!(matches_filter(&done, TaskFilter::All));
    assert!(matches_filter(&open, TaskFilter::Active));
    assert!(!matches_filter(&done, TaskFilter::Active));
    assert!(!matches_filter(&open, TaskFilter::Completed));
    assert!(matches_filter(&done, TaskFilter::Completed));
}

#[test]
fn filter_to_query_param() {
    assert_eq!(TaskFilter::All.completed_param(), None);
    assert_eq!(TaskFilter::Active.completed_param(), Some(false));
    assert_eq!(TaskFilter::Completed.completed_param(), Some(true));
}

#[test]
fn create_appends_under_all() {
    // Scenario: create {title: "Buy milk"} while filter=all.
    let mut tasks = vec![task(1, "existing", false)];
    let appended = append_if_matching(&mut tasks, task(2, "Buy milk", false), TaskFilter::All);
    assert!(appended);
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[1].title, "Buy milk");
    assert!(!tasks[1].completed);
}

#[test]
fn create_never_appears_under_completed() {
    // The server accepted the task; the visible collection just doesn't
    // include it while the completed filter is active.
    let mut tasks = vec![task(1, "done earlier", true)];
    let appended =
        append_if_matching(&mut tasks, task(2, "fresh", false), TaskFilter::Completed);
    assert!(!appended);
    assert_eq!(tasks.len(), 1);
}

#[test]
fn create_appends_under_active() {
    let mut tasks = Vec::new();
    assert!(append_if_matching(&mut tasks, task(3, "fresh", false), TaskFilter::Active));
    assert_eq!(tasks.len(), 1);
}

#[test]
fn completing_a_task_under_active_removes_it() {
    // Scenario: update task 5 to completed=true while filter=active.
    let mut tasks = vec![task(4, "other", false), task(5, "target", false)];
    reconcile_updated(&mut tasks, task(5, "target", true), TaskFilter::Active);
    assert_eq!(tasks.len(), 1);
    assert!(tasks.iter().all(|t| t.id != 5));
}

#[test]
fn matching_updates_replace_in_place() {
    let mut tasks = vec![task(4, "other", false), task(5, "before", false)];
    reconcile_updated(&mut tasks, task(5, "after", false), TaskFilter::Active);
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[1].title, "after");
    // Order is preserved; reconciliation never reorders the collection.
    assert_eq!(tasks[0].id, 4);
}

#[test]
fn updates_to_unknown_ids_do_not_insert() {
    let mut tasks = vec![task(1, "only", false)];
    reconcile_updated(&mut tasks, task(99, "ghost", false), TaskFilter::All);
    assert_eq!(tasks.len(), 1);
}

#[test]
fn delete_removes_locally() {
    let mut tasks = vec![task(1, "a", false), task(2, "b", true)];
    remove_by_id(&mut tasks, 1);
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, 2);

    // Deleting an id that is not present is a no-op.
    remove_by_id(&mut tasks, 42);
    assert_eq!(tasks.len(), 1);
}
