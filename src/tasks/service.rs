use std::sync::Arc;

use validator::Validate;

use crate::auth::RequestIdentity;
use crate::tasks::{CreateTask, Task, TaskError, TaskPatch, TaskStore};
use crate::validation;

/// Service layer for task business logic
///
/// Every operation receives the caller's identity so per-user rules can be
/// enforced here later; today it is only recorded in logs.
#[derive(Clone)]
pub struct TaskService {
    store: Arc<dyn TaskStore>,
}

impl TaskService {
    /// Create a new TaskService
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self { store }
    }

    /// Create a new task
    pub async fn create_task(
        &self,
        identity: &RequestIdentity,
        request: CreateTask,
    ) -> Result<Task, TaskError> {
        request
            .validate()
            .map_err(|e| TaskError::ValidationError(validation::describe(&e)))?;

        let task = self.store.create(&request).await?;
        tracing::info!(caller = ?identity.user_id(), "Created task with id: {}", task.id);
        Ok(task)
    }

    /// List all tasks, oldest first
    pub async fn list_tasks(&self, identity: &RequestIdentity) -> Result<Vec<Task>, TaskError> {
        let tasks = self.store.list().await?;
        tracing::debug!(caller = ?identity.user_id(), "Retrieved {} tasks", tasks.len());
        Ok(tasks)
    }

    /// Fetch a single task
    pub async fn get_task(&self, identity: &RequestIdentity, id: i32) -> Result<Task, TaskError> {
        tracing::debug!(caller = ?identity.user_id(), "Fetching task with id: {}", id);
        self.store
            .find_by_id(id)
            .await?
            .ok_or(TaskError::NotFound(id))
    }

    /// Apply a partial update
    ///
    /// Only fields present in the patch are written. An empty patch returns
    /// the current record.
    pub async fn update_task(
        &self,
        identity: &RequestIdentity,
        id: i32,
        patch: TaskPatch,
    ) -> Result<Task, TaskError> {
        patch.check()?;

        if patch.is_empty() {
            return self.get_task(identity, id).await;
        }

        let task = self
            .store
            .update(id, &patch)
            .await?
            .ok_or(TaskError::NotFound(id))?;

        tracing::info!(caller = ?identity.user_id(), "Updated task with id: {}", id);
        Ok(task)
    }

    /// Update only the notes of a task
    pub async fn update_notes(
        &self,
        identity: &RequestIdentity,
        id: i32,
        update: crate::tasks::NotesUpdate,
    ) -> Result<Task, TaskError> {
        self.update_task(identity, id, TaskPatch::from(update)).await
    }

    /// Delete a task, returning the deleted record
    pub async fn delete_task(&self, identity: &RequestIdentity, id: i32) -> Result<Task, TaskError> {
        let task = self
            .store
            .delete(id)
            .await?
            .ok_or(TaskError::NotFound(id))?;

        tracing::info!(caller = ?identity.user_id(), "Deleted task with id: {}", id);
        Ok(task)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::{NotesUpdate, Patch};
    use crate::testing::InMemoryTaskStore;

    fn service() -> TaskService {
        TaskService::new(Arc::new(InMemoryTaskStore::default()))
    }

    fn anonymous() -> RequestIdentity {
        RequestIdentity::anonymous()
    }

    fn buy_milk() -> CreateTask {
        CreateTask {
            title: "Buy milk".to_string(),
            is_completed: false,
            notes: Some("2%".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_then_list_returns_record_unchanged() {
        let service = service();
        let created = service.create_task(&anonymous(), buy_milk()).await.unwrap();

        assert_eq!(created.title, "Buy milk");
        assert_eq!(created.notes.as_deref(), Some("2%"));
        assert!(!created.is_completed);

        let listed = service.list_tasks(&anonymous()).await.unwrap();
        assert_eq!(listed, vec![created.clone()]);

        let fetched = service.get_task(&anonymous(), created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_create_rejects_blank_title() {
        let service = service();
        let mut request = buy_milk();
        request.title = "  ".to_string();

        let result = service.create_task(&anonymous(), request).await;
        assert!(matches!(result, Err(TaskError::ValidationError(_))));
        assert!(service.list_tasks(&anonymous()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_is_creation_ordered() {
        let service = service();
        let mut ids = Vec::new();
        for title in ["first", "second", "third"] {
            let mut request = buy_milk();
            request.title = title.to_string();
            ids.push(service.create_task(&anonymous(), request).await.unwrap().id);
        }

        let listed: Vec<i32> = service
            .list_tasks(&anonymous())
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(listed, ids);
    }

    #[tokio::test]
    async fn test_partial_update_only_touches_present_fields() {
        let service = service();
        let created = service.create_task(&anonymous(), buy_milk()).await.unwrap();

        let patch = TaskPatch {
            is_completed: Patch::Value(true),
            notes: Patch::Absent,
        };
        let updated = service.update_task(&anonymous(), created.id, patch).await.unwrap();

        assert!(updated.is_completed);
        assert_eq!(updated.notes, created.notes);
        assert_eq!(updated.title, created.title);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_null_notes_clears_them() {
        let service = service();
        let created = service.create_task(&anonymous(), buy_milk()).await.unwrap();

        let update = NotesUpdate { notes: Patch::Null };
        let updated = service.update_notes(&anonymous(), created.id, update).await.unwrap();
        assert_eq!(updated.notes, None);
        assert_eq!(updated.is_completed, created.is_completed);
    }

    #[tokio::test]
    async fn test_empty_patch_returns_current_record() {
        let service = service();
        let created = service.create_task(&anonymous(), buy_milk()).await.unwrap();

        let updated = service
            .update_task(&anonymous(), created.id, TaskPatch::default())
            .await
            .unwrap();
        assert_eq!(updated, created);
    }

    #[tokio::test]
    async fn test_update_unknown_task_not_found() {
        let service = service();
        let patch = TaskPatch {
            is_completed: Patch::Value(true),
            notes: Patch::Absent,
        };
        let result = service.update_task(&anonymous(), 404, patch).await;
        assert!(matches!(result, Err(TaskError::NotFound(404))));

        let result = service
            .update_notes(&anonymous(), 404, NotesUpdate { notes: Patch::Value("x".into()) })
            .await;
        assert!(matches!(result, Err(TaskError::NotFound(404))));
    }

    #[tokio::test]
    async fn test_null_completion_rejected_before_store() {
        let service = service();
        let created = service.create_task(&anonymous(), buy_milk()).await.unwrap();
        let patch = TaskPatch {
            is_completed: Patch::Null,
            notes: Patch::Value("changed".into()),
        };

        let result = service.update_task(&anonymous(), created.id, patch).await;
        assert!(matches!(result, Err(TaskError::ValidationError(_))));

        // Nothing was written
        let fetched = service.get_task(&anonymous(), created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let service = service();
        let created = service.create_task(&anonymous(), buy_milk()).await.unwrap();

        let deleted = service.delete_task(&anonymous(), created.id).await.unwrap();
        assert_eq!(deleted, created);

        let again = service.delete_task(&anonymous(), created.id).await;
        assert!(matches!(again, Err(TaskError::NotFound(id)) if id == created.id));
        assert!(matches!(
            service.get_task(&anonymous(), created.id).await,
            Err(TaskError::NotFound(_))
        ));
    }
}
