// HTTP handlers for task endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::app::AppState;
use crate::auth::RequestIdentity;
use crate::error::ErrorResponse;
use crate::tasks::{CreateTask, NotesUpdate, Task, TaskError, TaskPatch};

/// Handler for GET /tasks
/// Lists all tasks, oldest first
#[utoipa::path(
    get,
    path = "/tasks",
    responses(
        (status = 200, description = "List of all tasks", body = Vec<Task>),
        (status = 401, description = "Invalid bearer token", body = ErrorResponse),
        (status = 503, description = "Storage unavailable", body = ErrorResponse)
    ),
    security((), ("bearer" = [])),
    tag = "tasks"
)]
pub async fn list_tasks(
    State(state): State<AppState>,
    identity: RequestIdentity,
) -> Result<Json<Vec<Task>>, TaskError> {
    let tasks = state.tasks.list_tasks(&identity).await?;
    Ok(Json(tasks))
}

/// Handler for POST /tasks
/// Creates a new task
#[utoipa::path(
    post,
    path = "/tasks",
    request_body = CreateTask,
    responses(
        (status = 201, description = "Task created successfully", body = Task),
        (status = 400, description = "Invalid input data", body = ErrorResponse),
        (status = 401, description = "Invalid bearer token", body = ErrorResponse)
    ),
    security((), ("bearer" = [])),
    tag = "tasks"
)]
pub async fn create_task(
    State(state): State<AppState>,
    identity: RequestIdentity,
    Json(payload): Json<CreateTask>,
) -> Result<(StatusCode, Json<Task>), TaskError> {
    tracing::debug!("Creating new task: {}", payload.title);
    let task = state.tasks.create_task(&identity, payload).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// Handler for GET /tasks/:id
#[utoipa::path(
    get,
    path = "/tasks/{id}",
    params(
        ("id" = i32, Path, description = "Task ID")
    ),
    responses(
        (status = 200, description = "Task found", body = Task),
        (status = 404, description = "Task not found", body = ErrorResponse)
    ),
    security((), ("bearer" = [])),
    tag = "tasks"
)]
pub async fn get_task(
    State(state): State<AppState>,
    identity: RequestIdentity,
    Path(id): Path<i32>,
) -> Result<Json<Task>, TaskError> {
    let task = state.tasks.get_task(&identity, id).await?;
    Ok(Json(task))
}

/// Handler for PATCH /tasks/:id
/// Applies a partial update to completion state and/or notes
#[utoipa::path(
    patch,
    path = "/tasks/{id}",
    params(
        ("id" = i32, Path, description = "Task ID")
    ),
    request_body = TaskPatch,
    responses(
        (status = 200, description = "Task updated successfully", body = Task),
        (status = 400, description = "Invalid input data", body = ErrorResponse),
        (status = 404, description = "Task not found", body = ErrorResponse)
    ),
    security((), ("bearer" = [])),
    tag = "tasks"
)]
pub async fn update_task(
    State(state): State<AppState>,
    identity: RequestIdentity,
    Path(id): Path<i32>,
    Json(patch): Json<TaskPatch>,
) -> Result<Json<Task>, TaskError> {
    let task = state.tasks.update_task(&identity, id, patch).await?;
    Ok(Json(task))
}

/// Handler for PATCH /tasks/:id/notes
/// Updates only the notes of a task
#[utoipa::path(
    patch,
    path = "/tasks/{id}/notes",
    params(
        ("id" = i32, Path, description = "Task ID")
    ),
    request_body = NotesUpdate,
    responses(
        (status = 200, description = "Notes updated successfully", body = Task),
        (status = 404, description = "Task not found", body = ErrorResponse)
    ),
    security((), ("bearer" = [])),
    tag = "tasks"
)]
pub async fn update_task_notes(
    State(state): State<AppState>,
    identity: RequestIdentity,
    Path(id): Path<i32>,
    Json(update): Json<NotesUpdate>,
) -> Result<Json<Task>, TaskError> {
    let task = state.tasks.update_notes(&identity, id, update).await?;
    Ok(Json(task))
}

/// Handler for DELETE /tasks/:id
/// Deletes a task and returns the deleted record
#[utoipa::path(
    delete,
    path = "/tasks/{id}",
    params(
        ("id" = i32, Path, description = "Task ID")
    ),
    responses(
        (status = 200, description = "Task deleted", body = Task),
        (status = 404, description = "Task not found", body = ErrorResponse)
    ),
    security((), ("bearer" = [])),
    tag = "tasks"
)]
pub async fn delete_task(
    State(state): State<AppState>,
    identity: RequestIdentity,
    Path(id): Path<i32>,
) -> Result<Json<Task>, TaskError> {
    let task = state.tasks.delete_task(&identity, id).await?;
    Ok(Json(task))
}
