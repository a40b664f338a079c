use thiserror::Error;

/// Reasons a token could not be issued or turned into an identity.
///
/// Every variant except `Configuration` reaches the client as the same opaque
/// 401; the variant itself only shows up in server logs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("JWT secret is not configured")]
    Configuration,

    #[error("malformed token")]
    MalformedToken,

    #[error("token has expired")]
    ExpiredToken,

    #[error("token is not valid yet")]
    NotYetValidToken,

    #[error("invalid token signature")]
    InvalidSignature,

    #[error("unexpected signing algorithm: {0}")]
    UnexpectedAlgorithm(String),

    #[error("invalid token claims: {0}")]
    InvalidClaims(String),

    #[error("failed to sign token: {0}")]
    Signing(String),
}

impl AuthError {
    /// Short machine-readable kind, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            AuthError::Configuration => "configuration",
            AuthError::MalformedToken => "malformed",
            AuthError::ExpiredToken => "expired",
            AuthError::NotYetValidToken => "not_yet_valid",
            AuthError::InvalidSignature => "invalid_signature",
            AuthError::UnexpectedAlgorithm(_) => "unexpected_algorithm",
            AuthError::InvalidClaims(_) => "invalid_claims",
            AuthError::Signing(_) => "signing",
        }
    }
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
            ErrorKind::ImmatureSignature => AuthError::NotYetValidToken,
            ErrorKind::InvalidSignature => AuthError::InvalidSignature,
            ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
                AuthError::UnexpectedAlgorithm("rejected by verifier".to_string())
            }
            ErrorKind::MissingRequiredClaim(claim) => {
                AuthError::InvalidClaims(format!("missing required claim '{}'", claim))
            }
            _ => AuthError::MalformedToken,
        }
    }
}
