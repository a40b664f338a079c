use axum::extract::State;

use crate::app::AppState;
use crate::database::models::UserProfile;
use crate::middleware::{ApiResponse, ApiResult, CurrentUser};

/// GET /api/auth/me
pub async fn me_get(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
) -> ApiResult<UserProfile> {
    Ok(ApiResponse::success(state.auth.me(&identity).await?))
}
