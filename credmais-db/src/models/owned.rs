use uuid::Uuid;

use super::identifiable::Identifiable;

/// Trait for records partitioned by the account that owns them
pub trait Owned: Identifiable {
    /// Returns the owning account, if the record carries one
    fn get_owner_id(&self) -> Option<Uuid>;
}
