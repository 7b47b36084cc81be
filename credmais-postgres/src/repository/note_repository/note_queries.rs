use async_trait::async_trait;
use credmais_db::models::note::NoteModel;
use credmais_db::repository::contract_query::OwnerScope;
use credmais_db::repository::note_queries::NoteQueries;
use crate::utils::TryFromRow;
use sqlx::Postgres;
use std::error::Error;

use super::repo_impl::NoteRepositoryImpl;

#[async_trait]
impl NoteQueries<Postgres> for NoteRepositoryImpl {
    async fn find_by_scope(
        &self,
        scope: OwnerScope,
    ) -> Result<Vec<NoteModel>, Box<dyn Error + Send + Sync>> {
        // NULL owner binds to "no constraint"
        let query = r#"
            SELECT * FROM note
            WHERE $1::uuid IS NULL OR owner_id = $1
            ORDER BY created_at DESC, id
        "#;
        let rows = {
            let mut tx = self.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query(query)
                .bind(scope.owner_id())
                .fetch_all(&mut **transaction)
                .await?
        };

        rows.iter().map(NoteModel::try_from_row).collect()
    }
}
