use axum::extract::{Path, State};

use crate::app::AppState;
use crate::database::models::{Project, ProjectInput};
use crate::handlers::parse_id;
use crate::middleware::{ApiResponse, ApiResult, CurrentUser, ValidatedJson};

/// GET /api/projects
pub async fn list(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
) -> ApiResult<Vec<Project>> {
    Ok(ApiResponse::success(state.projects.list(&identity).await?))
}

/// POST /api/projects
pub async fn create(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    ValidatedJson(input): ValidatedJson<ProjectInput>,
) -> ApiResult<Project> {
    Ok(ApiResponse::created(state.projects.create(&identity, input).await?))
}

/// GET /api/projects/:id
pub async fn show(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<Project> {
    let id = parse_id(&id, "project")?;
    Ok(ApiResponse::success(state.projects.get(&identity, id).await?))
}

/// PUT /api/projects/:id
pub async fn update(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<ProjectInput>,
) -> ApiResult<Project> {
    let id = parse_id(&id, "project")?;
    Ok(ApiResponse::success(state.projects.update(&identity, id, input).await?))
}

/// DELETE /api/projects/:id - tasks go with it
pub async fn delete(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<()> {
    let id = parse_id(&id, "project")?;
    state.projects.delete(&identity, id).await?;
    Ok(ApiResponse::no_content())
}
