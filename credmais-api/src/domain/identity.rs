use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The acting account of a request, resolved from the session.
///
/// `is_admin` is computed once at resolution time by comparing the account email with the
/// configured administrator address; no other privilege level exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub account_id: Uuid,
    pub display_name: String,
    pub is_admin: bool,
}

impl Identity {
    pub fn new(account_id: Uuid, display_name: impl Into<String>, is_admin: bool) -> Self {
        Self {
            account_id,
            display_name: display_name.into(),
            is_admin,
        }
    }
}
