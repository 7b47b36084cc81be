use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::identifiable::Identifiable;
use crate::models::text_limits::{NAME_CAPACITY, PHONE_CAPACITY};
use crate::models::owned::Owned;

/// # Documentation
/// Seller credited on contracts.
///
/// Sellers are visible to every account. `owner_id` records the account that registered
/// the seller and gates edits; legacy rows may have no owner.
/// Deleting a seller leaves contracts referencing it untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SellerModel {
    pub id: Uuid,

    pub owner_id: Option<Uuid>,

    pub name: HeaplessString<NAME_CAPACITY>,

    pub phone: Option<HeaplessString<PHONE_CAPACITY>>,
}

impl Identifiable for SellerModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

impl Owned for SellerModel {
    fn get_owner_id(&self) -> Option<Uuid> {
        self.owner_id
    }
}
