// In-memory store doubles for unit and HTTP tests

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::auth::{AuthError, CredentialStore, User};
use crate::tasks::{CreateTask, Task, TaskError, TaskPatch, TaskStore};

/// Credential store backed by a vector; the lock makes check-and-insert atomic
#[derive(Default)]
pub struct InMemoryUserStore {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserStore {
    pub fn len(&self) -> usize {
        self.users.lock().unwrap().len()
    }
}

#[async_trait]
impl CredentialStore for InMemoryUserStore {
    async fn create(&self, email: &str, password_hash: &str) -> Result<User, AuthError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == email) {
            return Err(AuthError::EmailAlreadyRegistered);
        }
        let user = User {
            id: users.len() as i32 + 1,
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, AuthError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.id == id).cloned())
    }
}

#[derive(Default)]
struct TaskTable {
    rows: Vec<Task>,
    next_id: i32,
}

/// Task store backed by a vector
#[derive(Default)]
pub struct InMemoryTaskStore {
    table: Mutex<TaskTable>,
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn create(&self, task: &CreateTask) -> Result<Task, TaskError> {
        let mut table = self.table.lock().unwrap();
        table.next_id += 1;
        let task = Task {
            id: table.next_id,
            title: task.title.clone(),
            notes: task.notes.clone(),
            is_completed: task.is_completed,
            created_at: Utc::now(),
        };
        table.rows.push(task.clone());
        Ok(task)
    }

    async fn list(&self) -> Result<Vec<Task>, TaskError> {
        let table = self.table.lock().unwrap();
        let mut rows = table.rows.clone();
        rows.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(rows)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Task>, TaskError> {
        let table = self.table.lock().unwrap();
        Ok(table.rows.iter().find(|t| t.id == id).cloned())
    }

    async fn update(&self, id: i32, patch: &TaskPatch) -> Result<Option<Task>, TaskError> {
        let mut table = self.table.lock().unwrap();
        let Some(row) = table.rows.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        *row = patch.clone().apply(row.clone());
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: i32) -> Result<Option<Task>, TaskError> {
        let mut table = self.table.lock().unwrap();
        let position = table.rows.iter().position(|t| t.id == id);
        Ok(position.map(|index| table.rows.remove(index)))
    }
}

/// Task store whose every call fails like an exhausted connection pool
pub struct UnavailableTaskStore;

#[async_trait]
impl TaskStore for UnavailableTaskStore {
    async fn create(&self, _task: &CreateTask) -> Result<Task, TaskError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn list(&self) -> Result<Vec<Task>, TaskError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn find_by_id(&self, _id: i32) -> Result<Option<Task>, TaskError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn update(&self, _id: i32, _patch: &TaskPatch) -> Result<Option<Task>, TaskError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn delete(&self, _id: i32) -> Result<Option<Task>, TaskError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }
}
