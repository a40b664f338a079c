pub mod claims;
pub mod error;
pub mod password;
pub mod token;

pub use claims::{validate, IdentityKey};
pub use error::AuthError;
pub use token::{Claims, JwtSecret, TokenCodec, DEFAULT_TTL_HOURS, MAX_TTL_HOURS};
