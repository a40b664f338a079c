use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::auth::{claims, AuthError, TokenCodec};
use crate::error::ApiError;
use crate::UserId;

use super::identity::{self, Identity};

/// Authentication gate for every protected route.
///
/// Rejections stop the pipeline; on success the identity is attached to the
/// request and the wrapped handler runs.
pub async fn require_auth(
    State(codec): State<Arc<TokenCodec>>,
    request: Request,
    next: Next,
) -> Response {
    match authenticate(request.headers(), &codec) {
        Ok(identity) => next.run(identity::attach(request, identity)).await,
        Err(err) => {
            let unauthorized = err.status_code() == 401;
            let mut response = err.into_response();
            if unauthorized {
                response
                    .headers_mut()
                    .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
            }
            response
        }
    }
}

/// Header → token → claims → identity. Client messages stay generic, the
/// specific failure is logged.
pub fn authenticate(headers: &HeaderMap, codec: &TokenCodec) -> Result<Identity, ApiError> {
    let header = headers.get(header::AUTHORIZATION).ok_or_else(|| {
        tracing::debug!("AuthGate: missing Authorization header");
        ApiError::unauthorized("Authorization header required")
    })?;

    let token = bearer_token(header).ok_or_else(|| {
        tracing::debug!("AuthGate: invalid Authorization header format");
        ApiError::unauthorized("Invalid Authorization header format")
    })?;

    let claims = codec.decode(token).map_err(|err| match err {
        AuthError::Configuration => {
            tracing::error!("CRITICAL: JWT secret is not configured, rejecting authenticated request");
            ApiError::internal_server_error("Internal server configuration error")
        }
        other => {
            tracing::warn!(kind = other.kind(), "AuthGate: token rejected: {}", other);
            ApiError::unauthorized("Invalid or expired token")
        }
    })?;

    let user_id = claims::validate::<UserId>(&claims).map_err(|err| {
        tracing::warn!(kind = err.kind(), "AuthGate: {}", err);
        ApiError::unauthorized("Invalid token claims")
    })?;

    tracing::debug!(%user_id, "AuthGate: token validated");
    Ok(Identity { user_id })
}

/// `Bearer <token>`: exactly two space-separated parts, scheme case-insensitive.
fn bearer_token(value: &HeaderValue) -> Option<&str> {
    let value = value.to_str().ok()?;
    let mut parts = value.split(' ');
    let scheme = parts.next()?;
    let token = parts.next()?;
    if parts.next().is_some() || !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }
    Some(token)
}
