use credmais_db::models::evidence::EvidenceModel;
use crate::utils::{get_heapless_string, TryFromRow};
use postgres_unit_of_work::Executor;
use sqlx::{postgres::PgRow, Row};
use std::error::Error;

pub struct EvidenceRepositoryImpl {
    pub executor: Executor,
}

impl EvidenceRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}

impl TryFromRow<PgRow> for EvidenceModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(EvidenceModel {
            id: row.try_get("id")?,
            contract_id: row.try_get("contract_id")?,
            stored_file_name: get_heapless_string(row, "stored_file_name")?,
            created_at: row.try_get("created_at")?,
        })
    }
}
