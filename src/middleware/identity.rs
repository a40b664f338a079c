use axum::{async_trait, extract::FromRequestParts, extract::Request, http::request::Parts};

use crate::error::ApiError;
use crate::UserId;

/// The authenticated caller of one request.
///
/// Lives in that request's extensions only: it is keyed by type, never stored
/// globally and dropped together with the request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
}

/// Hand the request on with `identity` attached.
pub fn attach(mut request: Request, identity: Identity) -> Request {
    request.extensions_mut().insert(identity);
    request
}

/// The identity attached by the gate, if the gate ran for this request.
pub fn current(request: &Request) -> Option<&Identity> {
    request.extensions().get::<Identity>()
}

/// Extractor for handlers behind the authentication gate.
///
/// A missing identity means the route was mounted outside the gate. That is
/// a wiring bug, so the request fails closed with a 500 instead of running
/// with a default identity.
pub struct CurrentUser(pub Identity);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| {
                tracing::error!(
                    "authentication was not performed for {} {}",
                    parts.method,
                    parts.uri.path()
                );
                ApiError::internal_server_error("Authentication context missing")
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::StatusCode;

    #[test]
    fn attach_then_read_back() {
        let identity = Identity { user_id: UserId::new_v4() };
        let request = Request::new(Body::empty());
        assert!(current(&request).is_none());

        let request = attach(request, identity.clone());
        assert_eq!(current(&request), Some(&identity));
    }

    #[test]
    fn identities_do_not_leak_between_requests() {
        let first = attach(Request::new(Body::empty()), Identity { user_id: UserId::new_v4() });
        let second = Request::new(Body::empty());
        assert!(current(&first).is_some());
        assert!(current(&second).is_none());
    }

    #[tokio::test]
    async fn extractor_fails_closed_without_identity() {
        let (mut parts, _) = Request::new(Body::empty()).into_parts();
        let rejection = CurrentUser::from_request_parts(&mut parts, &()).await.err().unwrap();
        assert_eq!(rejection.status_code(), StatusCode::INTERNAL_SERVER_ERROR.as_u16());
    }

    #[tokio::test]
    async fn extractor_returns_attached_identity() {
        let identity = Identity { user_id: UserId::new_v4() };
        let request = attach(Request::new(Body::empty()), identity.clone());
        let (mut parts, _) = request.into_parts();
        let CurrentUser(found) = CurrentUser::from_request_parts(&mut parts, &()).await.ok().unwrap();
        assert_eq!(found, identity);
    }
}
