//! Owner-scoped task CRUD endpoint handlers.
//!
//! Every handler takes an [`AuthUser`] argument, so requests without a valid
//! bearer token are rejected before any store access, and every store call
//! is scoped to the caller's id. A task belonging to another user is
//! indistinguishable from a task that does not exist.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{
    routing::{get, put},
    Json, Router,
};
use serde_json::{json, Value};
use tracing::debug;

use crate::models::{AuthUser, CreateTask, Task, UpdateTask};
use crate::state::AppState;
use crate::store::apply_patch;
use crate::utils::http_helpers::{ApiError, AppJson};

/// Registers task management routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/tasks", get(list_tasks).post(create_task))
        .route("/api/tasks/:id", put(update_task).delete(delete_task))
}

/// Lists the caller's tasks, newest first.
async fn list_tasks(
    user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<Task>>, ApiError> {
    let tasks = state.store.list_tasks(user.id).await?;
    Ok(Json(tasks))
}

/// Creates a task owned by the caller.
///
/// The owner is always the authenticated user; any owner field a client
/// smuggles into the payload is dropped during deserialization.
async fn create_task(
    user: AuthUser,
    State(state): State<AppState>,
    AppJson(body): AppJson<CreateTask>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    if body.title.trim().is_empty() {
        return Err(ApiError::validation("Title is required"));
    }

    let task = state.store.insert_task(user.id, body).await?;
    debug!("Task created: id={} owner={}", task.id, task.user_id);
    Ok((StatusCode::CREATED, Json(task)))
}

/// Applies a partial update to one of the caller's tasks.
///
/// Lookup and write are two store calls; a concurrent update or delete of
/// the same task by the same owner can interleave between them. The write
/// re-checks (id, owner), so the race can at worst lose one of the two
/// patches, never widen access.
async fn update_task(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    AppJson(body): AppJson<UpdateTask>,
) -> Result<Json<Task>, ApiError> {
    if let Some(title) = &body.title {
        if title.trim().is_empty() {
            return Err(ApiError::validation("Title is required"));
        }
    }

    let mut task = state
        .store
        .find_task(id, user.id)
        .await?
        .ok_or(ApiError::NotFound("Task not found"))?;

    apply_patch(&mut task, body);

    let updated = state
        .store
        .update_task(&task)
        .await?
        .ok_or(ApiError::NotFound("Task not found"))?;

    Ok(Json(updated))
}

/// Deletes one of the caller's tasks.
///
/// A single conditional delete on (id, owner); the affected-row count
/// decides between 200 and 404.
async fn delete_task(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    let deleted = state.store.delete_task(id, user.id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Task not found"));
    }
    debug!("Task deleted: id={} owner={}", id, user.id);
    Ok(Json(json!({ "message": "Task deleted successfully" })))
}
