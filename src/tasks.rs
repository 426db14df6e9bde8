//! Task view-model: the dashboard's collection state plus the reconciliation
//! rules that keep it consistent with the active filter without reloading
//! after every mutation.

use crate::api::{ApiClient, ApiError};
use crate::types::{Task, TaskCreate, TaskFilter, TaskUpdate};
use crate::ui::Page;
use dioxus::prelude::*;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_LIMIT: u32 = 100;

pub fn matches_filter(task: &Task, filter: TaskFilter) -> bool {
    match filter {
        TaskFilter::All => true,
        TaskFilter::Active => !task.completed,
        TaskFilter::Completed => task.completed,
    }
}

/// A freshly created task joins the visible collection only when it matches
/// the active filter; the server has it either way.
pub fn append_if_matching(tasks: &mut Vec<Task>, task: Task, filter: TaskFilter) -> bool {
    if matches_filter(&task, filter) {
        tasks.push(task);
        true
    } else {
        false
    }
}

/// Replace the updated task's entry when it still matches the filter, drop
/// it when the mutation moved it out (completing a task under "Active").
pub fn reconcile_updated(tasks: &mut Vec<Task>, updated: Task, filter: TaskFilter) {
    if matches_filter(&updated, filter) {
        if let Some(slot) = tasks.iter_mut().find(|task| task.id == updated.id) {
            *slot = updated;
        }
    } else {
        tasks.retain(|task| task.id != updated.id);
    }
}

pub fn remove_by_id(tasks: &mut Vec<Task>, id: i64) {
    tasks.retain(|task| task.id != id);
}

/// Signal bundle backing the dashboard. Copy, so event handlers can capture
/// it freely.
#[derive(Clone, Copy, PartialEq)]
pub struct TasksState {
    pub tasks: Signal<Vec<Task>>,
    pub loading: Signal<bool>,
    pub error: Signal<Option<String>>,
    pub filter: Signal<TaskFilter>,
}

/// Hook: task collection that reloads whenever the filter changes.
pub fn use_tasks(api: ApiClient, page: Signal<Page>) -> TasksState {
    let state = TasksState {
        tasks: use_signal(Vec::new),
        loading: use_signal(|| true),
        error: use_signal(|| None),
        filter: use_signal(TaskFilter::default),
    };

    use_effect(move || {
        let filter = (state.filter)();
        let api = api.clone();
        spawn(async move {
            state.load(&api, filter, page).await;
        });
    });

    state
}

impl TasksState {
    async fn load(mut self, api: &ApiClient, filter: TaskFilter, mut page: Signal<Page>) {
        self.loading.set(true);
        self.error.set(None);
        match api
            .list_tasks(filter.completed_param(), DEFAULT_PAGE, DEFAULT_PAGE_LIMIT)
            .await
        {
            Ok(tasks) => self.tasks.set(tasks),
            Err(err) if err.is_unauthorized() => page.set(Page::Login),
            Err(err) => self.error.set(Some(err.to_string())),
        }
        self.loading.set(false);
    }

    pub async fn create(mut self, api: &ApiClient, data: TaskCreate) -> Result<(), ApiError> {
        match api.create_task(&data).await {
            Ok(task) => {
                let filter = (self.filter)();
                self.tasks.with_mut(|tasks| {
                    append_if_matching(tasks, task, filter);
                });
                self.error.set(None);
                Ok(())
            }
            Err(err) => {
                self.record_error(&err);
                Err(err)
            }
        }
    }

    pub async fn update(
        mut self,
        api: &ApiClient,
        id: i64,
        patch: TaskUpdate,
    ) -> Result<(), ApiError> {
        match api.update_task(id, &patch).await {
            Ok(updated) => {
                let filter = (self.filter)();
                self.tasks
                    .with_mut(|tasks| reconcile_updated(tasks, updated, filter));
                self.error.set(None);
                Ok(())
            }
            Err(err) => {
                self.record_error(&err);
                Err(err)
            }
        }
    }

    pub async fn delete(mut self, api: &ApiClient, id: i64) -> Result<(), ApiError> {
        match api.delete_task(id).await {
            Ok(()) => {
                self.tasks.with_mut(|tasks| remove_by_id(tasks, id));
                self.error.set(None);
                Ok(())
            }
            Err(err) => {
                self.record_error(&err);
                Err(err)
            }
        }
    }

    /// Flip completion through `update`, deriving the target state from the
    /// local copy. Unknown ids are a no-op (the row may have just been
    /// removed by another operation).
    pub async fn toggle(self, api: &ApiClient, id: i64) -> Result<(), ApiError> {
        let completed = self
            .tasks
            .with(|tasks| tasks.iter().find(|task| task.id == id).map(|task| task.completed));
        let Some(completed) = completed else {
            return Ok(());
        };
        self.update(
            api,
            id,
            TaskUpdate {
                completed: Some(!completed),
                ..TaskUpdate::default()
            },
        )
        .await
    }

    fn record_error(mut self, err: &ApiError) {
        // 401 is handled globally, never shown inline.
        if !err.is_unauthorized() {
            self.error.set(Some(err.to_string()));
        }
    }
}
