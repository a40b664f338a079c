use axum::extract::{Path, State};

use crate::app::AppState;
use crate::database::models::{Calendar, CalendarInput};
use crate::handlers::parse_id;
use crate::middleware::{ApiResponse, ApiResult, CurrentUser, ValidatedJson};

/// GET /api/calendars
pub async fn list(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
) -> ApiResult<Vec<Calendar>> {
    Ok(ApiResponse::success(state.calendars.list(&identity).await?))
}

/// POST /api/calendars
pub async fn create(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    ValidatedJson(input): ValidatedJson<CalendarInput>,
) -> ApiResult<Calendar> {
    Ok(ApiResponse::created(state.calendars.create(&identity, input).await?))
}

/// GET /api/calendars/:id
pub async fn show(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<Calendar> {
    let id = parse_id(&id, "calendar")?;
    Ok(ApiResponse::success(state.calendars.get(&identity, id).await?))
}

/// PUT /api/calendars/:id
pub async fn update(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<CalendarInput>,
) -> ApiResult<Calendar> {
    let id = parse_id(&id, "calendar")?;
    Ok(ApiResponse::success(state.calendars.update(&identity, id, input).await?))
}

/// DELETE /api/calendars/:id - also removes the calendar's events
pub async fn delete(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<()> {
    let id = parse_id(&id, "calendar")?;
    state.calendars.delete(&identity, id).await?;
    Ok(ApiResponse::no_content())
}
