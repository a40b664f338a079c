// handlers/public/auth.rs - POST /auth/register, POST /auth/login

use axum::extract::State;

use crate::app::AppState;
use crate::database::models::{LoginRequest, RegisterRequest, UserProfile};
use crate::middleware::{ApiResponse, ApiResult, ValidatedJson};
use crate::services::LoginResponse;

/// POST /auth/register - create an account, 201 with the public profile
pub async fn register_post(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<UserProfile> {
    let profile = state.auth.register(request).await?;
    Ok(ApiResponse::created(profile))
}

/// POST /auth/login - exchange credentials for a token
pub async fn login_post(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<LoginResponse> {
    let session = state.auth.login(request).await?;
    Ok(ApiResponse::success(session))
}
