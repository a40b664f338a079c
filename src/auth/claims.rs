use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::str::FromStr;

use uuid::Uuid;

use super::{AuthError, Claims};

/// A type usable as the owning-user key of resources.
///
/// One key type is chosen for the whole deployment (see [`crate::UserId`]).
pub trait IdentityKey: Clone + Debug + Display + Eq + Hash + Send + Sync + 'static {
    /// Human name of the expected format, used in log messages.
    const FORMAT: &'static str;

    fn parse_subject(subject: &str) -> Option<Self>;
}

impl IdentityKey for Uuid {
    const FORMAT: &'static str = "UUID";

    fn parse_subject(subject: &str) -> Option<Self> {
        Uuid::from_str(subject).ok()
    }
}

impl IdentityKey for i64 {
    const FORMAT: &'static str = "integer";

    fn parse_subject(subject: &str) -> Option<Self> {
        subject.parse().ok()
    }
}

/// Turn verified claims into a usable identity key.
pub fn validate<K: IdentityKey>(claims: &Claims) -> Result<K, AuthError> {
    let subject = claims.sub.trim();
    if subject.is_empty() {
        return Err(AuthError::InvalidClaims("missing subject".to_string()));
    }

    if claims.iat > claims.nbf || claims.nbf > claims.exp {
        return Err(AuthError::InvalidClaims(format!(
            "inconsistent timestamps iat={} nbf={} exp={}",
            claims.iat, claims.nbf, claims.exp
        )));
    }

    K::parse_subject(subject).ok_or_else(|| {
        AuthError::InvalidClaims(format!("subject '{}' is not a valid {}", subject, K::FORMAT))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(sub: &str) -> Claims {
        Claims {
            sub: sub.to_string(),
            iat: 100,
            nbf: 100,
            exp: 200,
        }
    }

    #[test]
    fn integer_subject_parses_for_integer_keys() {
        assert_eq!(validate::<i64>(&claims("42")), Ok(42));
    }

    #[test]
    fn uuid_subject_parses_for_uuid_keys() {
        let id = Uuid::new_v4();
        assert_eq!(validate::<Uuid>(&claims(&id.to_string())), Ok(id));
    }

    #[test]
    fn empty_subject_is_rejected() {
        assert!(matches!(validate::<i64>(&claims("")), Err(AuthError::InvalidClaims(_))));
        assert!(matches!(validate::<Uuid>(&claims("  ")), Err(AuthError::InvalidClaims(_))));
    }

    #[test]
    fn key_type_mismatch_is_rejected() {
        assert!(matches!(validate::<Uuid>(&claims("42")), Err(AuthError::InvalidClaims(_))));
        let id = Uuid::new_v4().to_string();
        assert!(matches!(validate::<i64>(&claims(&id)), Err(AuthError::InvalidClaims(_))));
    }

    #[test]
    fn out_of_order_timestamps_are_rejected() {
        let mut c = claims("1");
        c.nbf = 300;
        assert!(matches!(validate::<i64>(&c), Err(AuthError::InvalidClaims(_))));

        let mut c = claims("1");
        c.iat = 150;
        assert!(matches!(validate::<i64>(&c), Err(AuthError::InvalidClaims(_))));
    }
}
