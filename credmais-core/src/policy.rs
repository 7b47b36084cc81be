use credmais_api::{ApiError, ApiResult, Identity};
use credmais_db::repository::OwnerScope;
use credmais_db::Owned;
use uuid::Uuid;

/// Single place deciding what an identity may see and change.
///
/// Records without an owner (legacy sellers) are reachable by the administrator only.
/// A record the caller may not access is reported exactly like a missing one.
pub struct OwnershipPolicy;

impl OwnershipPolicy {
    pub fn can_access(identity: &Identity, owner_id: Option<Uuid>) -> bool {
        identity.is_admin || owner_id == Some(identity.account_id)
    }

    /// Scope applied to every list-style query issued on behalf of `identity`.
    pub fn scope(identity: &Identity) -> OwnerScope {
        if identity.is_admin {
            OwnerScope::All
        } else {
            OwnerScope::Owner(identity.account_id)
        }
    }

    /// Returns the record when `identity` may access it, `NotFound` otherwise.
    pub fn authorize<T: Owned>(identity: &Identity, record: Option<T>, what: &str) -> ApiResult<T> {
        match record {
            Some(record) if Self::can_access(identity, record.get_owner_id()) => Ok(record),
            _ => Err(ApiError::not_found(what)),
        }
    }

    pub fn require_admin(identity: &Identity) -> ApiResult<()> {
        if identity.is_admin {
            Ok(())
        } else {
            Err(ApiError::Forbidden(
                "only the administrator may perform this operation".to_string(),
            ))
        }
    }
}
