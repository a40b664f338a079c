use std::fmt;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, decode_header, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::AuthError;

/// Only the symmetric HMAC family is ever accepted.
const HMAC_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// Default token lifetime.
pub const DEFAULT_TTL_HOURS: u64 = 72;

/// Longest accepted token lifetime (one year).
pub const MAX_TTL_HOURS: u64 = 24 * 365;

/// Registered claims carried by every identity token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub nbf: i64,
    pub exp: i64,
}

/// Symmetric signing secret. Debug output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct JwtSecret(String);

impl JwtSecret {
    /// Returns `None` for an empty or whitespace-only secret.
    pub fn new(secret: impl Into<String>) -> Option<Self> {
        let secret = secret.into();
        if secret.trim().is_empty() {
            None
        } else {
            Some(Self(secret))
        }
    }

    fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for JwtSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("JwtSecret(***)")
    }
}

/// Issues and verifies HMAC-signed identity tokens.
///
/// A codec without a secret fails every issue and decode with
/// [`AuthError::Configuration`]; there is no fallback key.
#[derive(Debug, Clone)]
pub struct TokenCodec {
    secret: Option<JwtSecret>,
    ttl: Duration,
}

fn ttl_from_hours(hours: u64) -> Duration {
    let hours = if (1..=MAX_TTL_HOURS).contains(&hours) {
        hours
    } else {
        tracing::warn!(hours, "token ttl out of range, using {} hours", DEFAULT_TTL_HOURS);
        DEFAULT_TTL_HOURS
    };
    i64::try_from(hours)
        .ok()
        .and_then(Duration::try_hours)
        .unwrap_or_else(|| Duration::seconds(DEFAULT_TTL_HOURS as i64 * 3600))
}

impl TokenCodec {
    /// A `ttl_hours` of zero or above [`MAX_TTL_HOURS`] falls back to
    /// [`DEFAULT_TTL_HOURS`].
    pub fn new(secret: Option<JwtSecret>, ttl_hours: u64) -> Self {
        Self {
            secret,
            ttl: ttl_from_hours(ttl_hours),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.secret.is_some()
    }

    /// Sign a fresh token for `user_id`, valid from now until now + ttl.
    pub fn issue<K: fmt::Display>(&self, user_id: &K) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now,
            nbf: now,
            exp: now + self.ttl.num_seconds(),
        };
        self.sign(&claims)
    }

    pub(crate) fn sign(&self, claims: &Claims) -> Result<String, AuthError> {
        let secret = self.secret.as_ref().ok_or_else(|| {
            tracing::error!("refusing to issue token: JWT secret is not configured");
            AuthError::Configuration
        })?;

        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .map_err(|e| AuthError::Signing(e.to_string()))
    }

    /// Verify signature, algorithm and validity window, returning the claims.
    pub fn decode(&self, token: &str) -> Result<Claims, AuthError> {
        let secret = self.secret.as_ref().ok_or(AuthError::Configuration)?;

        // The header is inspected before any key material is touched.
        let header = decode_header(token).map_err(|_| AuthError::MalformedToken)?;
        if !HMAC_ALGORITHMS.contains(&header.alg) {
            return Err(AuthError::UnexpectedAlgorithm(format!("{:?}", header.alg)));
        }

        let mut validation = Validation::new(header.alg);
        validation.algorithms = HMAC_ALGORITHMS.to_vec();
        validation.leeway = 0;
        validation.validate_nbf = true;
        validation.set_required_spec_claims(&["exp", "nbf", "sub"]);

        let data = decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)?;

        // exp is exclusive
        if data.claims.exp <= Utc::now().timestamp() {
            return Err(AuthError::ExpiredToken);
        }

        Ok(data.claims)
    }
}
