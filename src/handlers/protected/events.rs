use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};

use crate::app::AppState;
use crate::database::models::{Event, EventQuery, EventUpdate, NewEvent};
use crate::error::ApiError;
use crate::handlers::parse_id;
use crate::middleware::{ApiResponse, ApiResult, CurrentUser, ValidatedJson};

/// POST /api/events - the target calendar must belong to the caller
pub async fn create(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    ValidatedJson(event): ValidatedJson<NewEvent>,
) -> ApiResult<Event> {
    Ok(ApiResponse::created(state.events.create(&identity, event).await?))
}

/// GET /api/events?calendar_ids=a,b&start=...&end=...
pub async fn list(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    query: Result<Query<EventQuery>, QueryRejection>,
) -> ApiResult<Vec<Event>> {
    let Query(query) = query.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
    Ok(ApiResponse::success(state.events.list(&identity, &query).await?))
}

/// GET /api/events/:id
pub async fn show(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<Event> {
    let id = parse_id(&id, "event")?;
    Ok(ApiResponse::success(state.events.get(&identity, id).await?))
}

/// PUT /api/events/:id
pub async fn update(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Path(id): Path<String>,
    ValidatedJson(update): ValidatedJson<EventUpdate>,
) -> ApiResult<Event> {
    let id = parse_id(&id, "event")?;
    Ok(ApiResponse::success(state.events.update(&identity, id, update).await?))
}

/// DELETE /api/events/:id
pub async fn delete(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<()> {
    let id = parse_id(&id, "event")?;
    state.events.delete(&identity, id).await?;
    Ok(ApiResponse::no_content())
}
