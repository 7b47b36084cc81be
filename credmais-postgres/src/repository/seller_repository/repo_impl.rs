use credmais_db::models::seller::SellerModel;
use crate::utils::{get_heapless_string, get_optional_heapless_string, TryFromRow};
use postgres_unit_of_work::Executor;
use sqlx::{postgres::PgRow, Row};
use std::error::Error;

pub struct SellerRepositoryImpl {
    pub executor: Executor,
}

impl SellerRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}

impl TryFromRow<PgRow> for SellerModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(SellerModel {
            id: row.try_get("id")?,
            owner_id: row.try_get("owner_id")?,
            name: get_heapless_string(row, "name")?,
            phone: get_optional_heapless_string(row, "phone")?,
        })
    }
}
