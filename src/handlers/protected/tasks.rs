use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;

use crate::app::AppState;
use crate::database::models::{Task, TaskInput, TaskStatusUpdate};
use crate::error::ApiError;
use crate::handlers::parse_id;
use crate::middleware::{ApiResponse, ApiResult, CurrentUser, ValidatedJson};

/// POST /api/projects/:id/tasks
pub async fn create(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Path(project_id): Path<String>,
    ValidatedJson(input): ValidatedJson<TaskInput>,
) -> ApiResult<Task> {
    let project_id = parse_id(&project_id, "project")?;
    Ok(ApiResponse::created(state.tasks.create(&identity, project_id, input).await?))
}

/// GET /api/projects/:id/tasks
pub async fn list(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Path(project_id): Path<String>,
) -> ApiResult<Vec<Task>> {
    let project_id = parse_id(&project_id, "project")?;
    Ok(ApiResponse::success(state.tasks.list(&identity, project_id).await?))
}

/// GET /api/tasks/:id
pub async fn show(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<Task> {
    let id = parse_id(&id, "task")?;
    Ok(ApiResponse::success(state.tasks.get(&identity, id).await?))
}

/// PUT /api/projects/:id/tasks/:task_id
pub async fn update(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Path((project_id, id)): Path<(String, String)>,
    ValidatedJson(input): ValidatedJson<TaskInput>,
) -> ApiResult<Task> {
    let project_id = parse_id(&project_id, "project")?;
    let id = parse_id(&id, "task")?;
    Ok(ApiResponse::success(state.tasks.update(&identity, project_id, id, input).await?))
}

/// PATCH /api/tasks/:id/status
pub async fn update_status(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Path(id): Path<String>,
    body: Result<Json<TaskStatusUpdate>, JsonRejection>,
) -> ApiResult<Task> {
    let id = parse_id(&id, "task")?;
    let Json(update) = body.map_err(|rejection| ApiError::invalid_json(rejection.body_text()))?;
    Ok(ApiResponse::success(state.tasks.update_status(&identity, id, update.status).await?))
}

/// DELETE /api/tasks/:id
pub async fn delete(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<()> {
    let id = parse_id(&id, "task")?;
    state.tasks.delete(&identity, id).await?;
    Ok(ApiResponse::no_content())
}
