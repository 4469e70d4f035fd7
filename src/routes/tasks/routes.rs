use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::state::AppState;
use crate::tasks::{NewTask, Task, TaskId, TaskPatch};
use super::{ApiError, CreatedResponse, ErrorResponse, MessageResponse};

fn parse_id(raw: &str) -> Result<TaskId, ApiError> {
    raw.parse().map_err(|_| ApiError::InvalidId)
}

/// Create a new task
#[utoipa::path(
    post,
    path = "/task",
    tag = "tasks",
    request_body = NewTask,
    responses(
        (status = 201, description = "Task created", body = CreatedResponse),
        (status = 400, description = "Invalid request payload", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse),
    )
)]
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<NewTask>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(task) = payload?;

    let id = state
        .tasks
        .create_task(state.write_deadline(), task)
        .await
        .map_err(|e| ApiError::from_repository(e, "Failed to create task"))?;

    let response = CreatedResponse {
        id: id.to_string(),
        message: "Task created successfully".to_string(),
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// List all tasks
#[utoipa::path(
    get,
    path = "/tasks",
    tag = "tasks",
    responses(
        (status = 200, description = "All stored tasks", body = [Task]),
        (status = 500, description = "Storage failure", body = ErrorResponse),
    )
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Task>>, ApiError> {
    let tasks = state
        .tasks
        .get_tasks(state.read_deadline())
        .await
        .map_err(|e| ApiError::from_repository(e, "Failed to retrieve tasks"))?;

    Ok(Json(tasks))
}

/// Update an existing task by ID
#[utoipa::path(
    patch,
    path = "/task/{id}",
    tag = "tasks",
    params(("id" = String, Path, description = "Task ID")),
    request_body = TaskPatch,
    responses(
        (status = 200, description = "Task updated successfully", body = MessageResponse),
        (status = 400, description = "Invalid task ID or payload", body = ErrorResponse),
        (status = 404, description = "Task not found", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse),
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<TaskPatch>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    // id is checked before the body
    let id = parse_id(&id)?;
    let Json(patch) = payload?;

    state
        .tasks
        .update_task(state.write_deadline(), id, patch)
        .await
        .map_err(|e| ApiError::from_repository(e, "Failed to update task"))?;

    Ok(Json(MessageResponse::new("Task updated successfully")))
}

/// Delete a task by ID
#[utoipa::path(
    delete,
    path = "/task/{id}",
    tag = "tasks",
    params(("id" = String, Path, description = "Task ID")),
    responses(
        (status = 200, description = "Task deleted successfully", body = MessageResponse),
        (status = 400, description = "Invalid task ID", body = ErrorResponse),
        (status = 404, description = "Task not found", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse),
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_id(&id)?;

    state
        .tasks
        .delete_task(state.write_deadline(), id)
        .await
        .map_err(|e| ApiError::from_repository(e, "Failed to delete task"))?;

    Ok(Json(MessageResponse::new("Task deleted successfully")))
}
