use async_trait::async_trait;
use credmais_db::models::note::NoteModel;
use credmais_db::repository::create_batch::CreateBatch;
use sqlx::Postgres;
use std::error::Error;

use super::repo_impl::NoteRepositoryImpl;

impl NoteRepositoryImpl {
    pub(super) async fn create_batch_impl(
        repo: &NoteRepositoryImpl,
        items: Vec<NoteModel>,
    ) -> Result<Vec<NoteModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut saved_items = Vec::with_capacity(items.len());
        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        for item in items {
            sqlx::query(
                r#"
                INSERT INTO note (id, owner_id, title, text, created_at)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(item.id)
            .bind(item.owner_id)
            .bind(item.title.as_str())
            .bind(&item.text)
            .bind(item.created_at)
            .execute(&mut **transaction)
            .await?;

            saved_items.push(item);
        }

        Ok(saved_items)
    }
}

#[async_trait]
impl CreateBatch<Postgres, NoteModel> for NoteRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<NoteModel>,
    ) -> Result<Vec<NoteModel>, Box<dyn Error + Send + Sync>> {
        Self::create_batch_impl(self, items).await
    }
}
