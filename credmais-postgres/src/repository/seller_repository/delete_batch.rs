use async_trait::async_trait;
use credmais_db::models::seller::SellerModel;
use credmais_db::repository::delete_batch::DeleteBatch;
use sqlx::Postgres;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::SellerRepositoryImpl;

impl SellerRepositoryImpl {
    pub(super) async fn delete_batch_impl(
        repo: &SellerRepositoryImpl,
        ids: &[Uuid],
    ) -> Result<usize, Box<dyn Error + Send + Sync>> {
        if ids.is_empty() {
            return Ok(0);
        }

        let query = r#"DELETE FROM seller WHERE id = ANY($1)"#;
        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
        let result = sqlx::query(query).bind(ids).execute(&mut **transaction).await?;

        Ok(result.rows_affected() as usize)
    }
}

#[async_trait]
impl DeleteBatch<Postgres, SellerModel> for SellerRepositoryImpl {
    async fn delete_batch(
        &self,
        ids: &[Uuid],
    ) -> Result<usize, Box<dyn Error + Send + Sync>> {
        Self::delete_batch_impl(self, ids).await
    }
}
