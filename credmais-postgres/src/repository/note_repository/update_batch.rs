use async_trait::async_trait;
use credmais_db::models::note::NoteModel;
use credmais_db::repository::update_batch::UpdateBatch;
use sqlx::Postgres;
use std::error::Error;

use super::repo_impl::NoteRepositoryImpl;

impl NoteRepositoryImpl {
    pub(super) async fn update_batch_impl(
        &self,
        items: Vec<NoteModel>,
    ) -> Result<Vec<NoteModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        for item in &items {
            let result = sqlx::query(r#"UPDATE note SET title = $2, text = $3 WHERE id = $1"#)
                .bind(item.id)
                .bind(item.title.as_str())
                .bind(&item.text)
                .execute(&mut **transaction)
                .await?;

            if result.rows_affected() == 0 {
                return Err(format!("Note {} not found", item.id).into());
            }
        }

        Ok(items)
    }
}

#[async_trait]
impl UpdateBatch<Postgres, NoteModel> for NoteRepositoryImpl {
    async fn update_batch(
        &self,
        items: Vec<NoteModel>,
    ) -> Result<Vec<NoteModel>, Box<dyn Error + Send + Sync>> {
        self.update_batch_impl(items).await
    }
}
