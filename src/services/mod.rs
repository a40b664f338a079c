pub mod auth_service;
pub mod calendar_service;
pub mod event_service;
pub mod project_service;
pub mod task_service;

pub use auth_service::{AuthService, LoginResponse};
pub use calendar_service::CalendarService;
pub use event_service::EventService;
pub use project_service::ProjectService;
pub use task_service::TaskService;

use thiserror::Error;

use crate::auth::AuthError;
use crate::database::DatabaseError;
use crate::error::ApiError;
use crate::ownership::OwnershipError;

/// Failures of the domain services, folded into [`ApiError`] at the handler edge.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Ownership(#[from] OwnershipError),

    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("{0}")]
    BadRequest(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Ownership(e) => e.into(),
            ServiceError::Database(e) => e.into(),
            ServiceError::Auth(e) => e.into(),
            ServiceError::InvalidCredentials => ApiError::unauthorized("Invalid email or password"),
            ServiceError::BadRequest(msg) => ApiError::bad_request(msg),
            ServiceError::Internal(msg) => {
                tracing::error!("Service failure: {}", msg);
                ApiError::internal_server_error("An error occurred while processing your request")
            }
        }
    }
}
