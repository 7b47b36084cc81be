use chrono::{DateTime, Utc};
use heapless::String as HeaplessString;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::common_enums::{CommissionStatus, ContractStatus, FormalizationStatus};
use crate::models::identifiable::Identifiable;
use crate::models::text_limits::{NAME_CAPACITY, PHONE_CAPACITY, PRODUCT_CAPACITY, TAX_ID_CAPACITY};
use crate::models::owned::Owned;

/// # Documentation
/// Client record: one credit contract brokered for a client.
///
/// - Owned by exactly one account (`owner_id`)
/// - `product` is free text; dashboard categories match it by case-insensitive substring
/// - The three status fields are independent and may move to any value
/// - Evidence files hang off the contract and are removed with it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractModel {
    pub id: Uuid,

    pub owner_id: Uuid,

    /// Client name
    pub name: HeaplessString<NAME_CAPACITY>,

    /// Client tax id (CPF)
    pub tax_id: HeaplessString<TAX_ID_CAPACITY>,

    pub phone: Option<HeaplessString<PHONE_CAPACITY>>,

    pub product: Option<HeaplessString<PRODUCT_CAPACITY>>,

    /// Never negative
    pub amount: Decimal,

    /// Seller credited for the sale. May point at a deleted seller.
    pub seller_id: Option<Uuid>,

    pub contract_status: ContractStatus,

    pub commission_status: CommissionStatus,

    pub formalization_status: FormalizationStatus,

    pub created_at: DateTime<Utc>,
}

impl Identifiable for ContractModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

impl Owned for ContractModel {
    fn get_owner_id(&self) -> Option<Uuid> {
        Some(self.owner_id)
    }
}
