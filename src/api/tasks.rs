use super::client::{ApiClient, ApiError};
use crate::types::{Task, TaskCreate, TaskListResponse, TaskUpdate};

impl ApiClient {
    /// List the caller's tasks, optionally filtered by completion state.
    pub async fn list_tasks(
        &self,
        completed: Option<bool>,
        page: u32,
        limit: u32,
    ) -> Result<Vec<Task>, ApiError> {
        let mut query = vec![("page", page.to_string()), ("limit", limit.to_string())];
        if let Some(completed) = completed {
            query.push(("completed", completed.to_string()));
        }
        let response: TaskListResponse = self.get_json("/api/tasks", &query).await?;
        Ok(response.tasks)
    }

    pub async fn create_task(&self, data: &TaskCreate) -> Result<Task, ApiError> {
        self.post_json("/api/tasks", data).await
    }

    pub async fn fetch_task(&self, id: i64) -> Result<Task, ApiError> {
        self.get_json(&format!("/api/tasks/{id}"), &[]).await
    }

    pub async fn update_task(&self, id: i64, patch: &TaskUpdate) -> Result<Task, ApiError> {
        self.put_json(&format!("/api/tasks/{id}"), patch).await
    }

    pub async fn delete_task(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/api/tasks/{id}")).await
    }
}
