use credmais_db::models::note::NoteModel;
use crate::utils::{get_heapless_string, TryFromRow};
use postgres_unit_of_work::Executor;
use sqlx::{postgres::PgRow, Row};
use std::error::Error;

pub struct NoteRepositoryImpl {
    pub executor: Executor,
}

impl NoteRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}

impl TryFromRow<PgRow> for NoteModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(NoteModel {
            id: row.try_get("id")?,
            owner_id: row.try_get("owner_id")?,
            title: get_heapless_string(row, "title")?,
            text: row.try_get("text")?,
            created_at: row.try_get("created_at")?,
        })
    }
}
