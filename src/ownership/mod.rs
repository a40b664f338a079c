use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::database::DatabaseError;
use crate::middleware::Identity;
use crate::UserId;

/// A resource that records its owning user directly.
pub trait Owned {
    const KIND: &'static str;

    fn id(&self) -> Uuid;

    fn owner(&self) -> &UserId;
}

/// Resolves the owner of a parent resource (calendar for events, project for tasks).
#[async_trait]
pub trait ParentLookup: Send + Sync {
    fn parent_kind(&self) -> &'static str;

    /// `Ok(None)` when the parent does not exist.
    async fn owner_of(&self, parent_id: Uuid) -> Result<Option<UserId>, DatabaseError>;
}

/// Why access to a resource was refused.
///
/// `NotFound` and `Mismatch` produce the same response; only the logs tell
/// them apart.
#[derive(Debug, Error)]
pub enum OwnershipError {
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: Uuid },

    #[error("{kind} {id} is owned by {owner}, not {requester}")]
    Mismatch {
        kind: &'static str,
        id: Uuid,
        owner: UserId,
        requester: UserId,
    },

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl OwnershipError {
    /// Builds and logs a `NotFound`, so services reporting a missing row
    /// leave the same trace as the checks below.
    pub fn not_found(kind: &'static str, id: Uuid) -> Self {
        let err = OwnershipError::NotFound { kind, id };
        err.log();
        err
    }

    /// The resource kind the caller asked about, for the client message.
    pub fn kind(&self) -> Option<&'static str> {
        match self {
            OwnershipError::NotFound { kind, .. } | OwnershipError::Mismatch { kind, .. } => Some(kind),
            OwnershipError::Database(_) => None,
        }
    }

    fn log(&self) {
        match self {
            OwnershipError::NotFound { kind, id } => {
                tracing::info!(kind, %id, "ownership check: resource not found");
            }
            OwnershipError::Mismatch { kind, id, owner, requester } => {
                tracing::warn!(kind, %id, %owner, %requester, "ownership check: owner mismatch");
            }
            OwnershipError::Database(e) => {
                tracing::error!("ownership check: datastore error: {}", e);
            }
        }
    }
}

/// `resource.owner == identity.user_id`.
pub fn check_direct<R: Owned>(resource: &R, identity: &Identity) -> Result<(), OwnershipError> {
    if resource.owner() == &identity.user_id {
        return Ok(());
    }

    let err = OwnershipError::Mismatch {
        kind: R::KIND,
        id: resource.id(),
        owner: resource.owner().clone(),
        requester: identity.user_id.clone(),
    };
    err.log();
    Err(err)
}

/// Same as [`check_direct`] for an optional lookup result, treating `None`
/// as not found.
pub fn check_found<R: Owned>(
    resource: Option<R>,
    kind: &'static str,
    id: Uuid,
    identity: &Identity,
) -> Result<R, OwnershipError> {
    let resource = resource.ok_or_else(|| OwnershipError::not_found(kind, id))?;
    check_direct(&resource, identity)?;
    Ok(resource)
}

/// Look the parent's owner up and compare it with the identity. Runs on
/// every call; nothing is cached between requests.
pub async fn check_transitive<L>(
    parent_id: Uuid,
    identity: &Identity,
    lookup: &L,
) -> Result<(), OwnershipError>
where
    L: ParentLookup + ?Sized,
{
    let owner = lookup.owner_of(parent_id).await.map_err(|e| {
        let err = OwnershipError::Database(e);
        err.log();
        err
    })?;

    match owner {
        Some(owner) if owner == identity.user_id => Ok(()),
        Some(owner) => {
            let err = OwnershipError::Mismatch {
                kind: lookup.parent_kind(),
                id: parent_id,
                owner,
                requester: identity.user_id.clone(),
            };
            err.log();
            Err(err)
        }
        None => Err(OwnershipError::not_found(lookup.parent_kind(), parent_id)),
    }
}
