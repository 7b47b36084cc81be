use chrono::{DateTime, Utc};
use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::identifiable::Identifiable;
use crate::models::text_limits::{EMAIL_CAPACITY, NAME_CAPACITY, PHONE_CAPACITY};

/// # Documentation
/// Staff account owning contracts and notes.
///
/// Accounts created by the administrator start as placeholders: the email is a
/// system-generated address and the password is a one-time provisional password.
/// `pending_first_access` is cleared exactly once, when the owner claims the account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountModel {
    pub id: Uuid,

    /// Display name; placeholders are looked up by exact name during first access
    pub name: HeaplessString<NAME_CAPACITY>,

    /// Login address, stored lowercase. Legacy rows may have none.
    pub email: Option<HeaplessString<EMAIL_CAPACITY>>,

    pub phone: Option<HeaplessString<PHONE_CAPACITY>>,

    /// Argon2 PHC string
    pub password_hash: String,

    pub blocked: bool,

    pub pending_first_access: bool,

    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountState {
    /// Created by the administrator, waiting for the owner to claim it
    Placeholder,
    /// Owner has set a permanent email and password
    Claimed,
}

impl AccountModel {
    pub fn state(&self) -> AccountState {
        if self.pending_first_access {
            AccountState::Placeholder
        } else {
            AccountState::Claimed
        }
    }

    pub fn email_str(&self) -> Option<&str> {
        self.email.as_deref()
    }
}

impl Identifiable for AccountModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}
