use credmais_db::models::contract::ContractModel;
use crate::utils::{get_heapless_string, get_optional_heapless_string, TryFromRow};
use postgres_unit_of_work::Executor;
use sqlx::{postgres::PgRow, Row};
use std::error::Error;

pub struct ContractRepositoryImpl {
    pub executor: Executor,
}

impl ContractRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}

impl TryFromRow<PgRow> for ContractModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(ContractModel {
            id: row.try_get("id")?,
            owner_id: row.try_get("owner_id")?,
            name: get_heapless_string(row, "name")?,
            tax_id: get_heapless_string(row, "tax_id")?,
            phone: get_optional_heapless_string(row, "phone")?,
            product: get_optional_heapless_string(row, "product")?,
            amount: row.try_get("amount")?,
            seller_id: row.try_get("seller_id")?,
            contract_status: row.try_get("contract_status")?,
            commission_status: row.try_get("commission_status")?,
            formalization_status: row.try_get("formalization_status")?,
            created_at: row.try_get("created_at")?,
        })
    }
}
