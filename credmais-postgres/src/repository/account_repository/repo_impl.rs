use credmais_db::models::account::AccountModel;
use crate::utils::{get_heapless_string, get_optional_heapless_string, TryFromRow};
use postgres_unit_of_work::Executor;
use sqlx::{postgres::PgRow, Row};
use std::error::Error;

pub struct AccountRepositoryImpl {
    pub executor: Executor,
}

impl AccountRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}

impl TryFromRow<PgRow> for AccountModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(AccountModel {
            id: row.try_get("id")?,
            name: get_heapless_string(row, "name")?,
            email: get_optional_heapless_string(row, "email")?,
            phone: get_optional_heapless_string(row, "phone")?,
            password_hash: row.try_get("password_hash")?,
            blocked: row.try_get("blocked")?,
            pending_first_access: row.try_get("pending_first_access")?,
            created_at: row.try_get("created_at")?,
        })
    }
}
