pub mod auth;
pub mod identity;
pub mod response;
pub mod validated_json;

pub use auth::require_auth;
pub use identity::{CurrentUser, Identity};
pub use response::{ApiResponse, ApiResult};
pub use validated_json::ValidatedJson;
