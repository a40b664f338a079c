// handlers/mod.rs - two security tiers
//
// public:    no authentication (/, /health, /auth/*)
// protected: behind the authentication gate (/api/*)
pub mod protected;
pub mod public;

use uuid::Uuid;

use crate::error::ApiError;

/// Path ids arrive as strings so a malformed id gets the JSON error envelope.
pub(crate) fn parse_id(raw: &str, what: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::bad_request(format!("Invalid {} ID", what)))
}
