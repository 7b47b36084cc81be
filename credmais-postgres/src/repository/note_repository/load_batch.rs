use async_trait::async_trait;
use credmais_db::models::note::NoteModel;
use credmais_db::repository::load_batch::LoadBatch;
use crate::utils::TryFromRow;
use sqlx::Postgres;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::NoteRepositoryImpl;

impl NoteRepositoryImpl {
    pub(super) async fn load_batch_impl(
        repo: &NoteRepositoryImpl,
        ids: &[Uuid],
    ) -> Result<Vec<Option<NoteModel>>, Box<dyn Error + Send + Sync>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let query = r#"SELECT * FROM note WHERE id = ANY($1)"#;
        let rows = {
            let mut tx = repo.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query(query).bind(ids).fetch_all(&mut **transaction).await?
        };

        let mut item_map = std::collections::HashMap::new();
        for row in rows {
            let item = NoteModel::try_from_row(&row)?;
            item_map.insert(item.id, item);
        }

        Ok(ids.iter().map(|id| item_map.remove(id)).collect())
    }
}

#[async_trait]
impl LoadBatch<Postgres, NoteModel> for NoteRepositoryImpl {
    async fn load_batch(&self, ids: &[Uuid]) -> Result<Vec<Option<NoteModel>>, Box<dyn Error + Send + Sync>> {
        Self::load_batch_impl(self, ids).await
    }
}

#[cfg(test)]
mod tests {
    use crate::repository::account_repository::test_utils::test_utils::create_test_placeholder;
    use crate::test_helper::setup_test_context;
    use credmais_db::repository::{CreateBatch, LoadBatch};
    use super::super::test_utils::test_utils::create_test_note;

    #[tokio::test]
    async fn test_load_batch() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let Some(ctx) = setup_test_context().await? else {
            return Ok(());
        };
        let owner = create_test_placeholder("Reader");
        ctx.repos().accounts.create_batch(vec![owner.clone()]).await?;
        let note = create_test_note(owner.id, "Pendências");
        ctx.repos().notes.create_batch(vec![note.clone()]).await?;

        let loaded = ctx.repos().notes.load_batch(&[note.id]).await?;
        let loaded = loaded[0].as_ref().unwrap();
        assert_eq!(loaded.title.as_str(), "Pendências");
        assert_eq!(loaded.text, note.text);

        Ok(())
    }
}
