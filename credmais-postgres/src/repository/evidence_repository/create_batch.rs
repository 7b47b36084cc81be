use async_trait::async_trait;
use credmais_db::models::evidence::EvidenceModel;
use credmais_db::repository::create_batch::CreateBatch;
use sqlx::Postgres;
use std::error::Error;

use super::repo_impl::EvidenceRepositoryImpl;

impl EvidenceRepositoryImpl {
    pub(super) async fn create_batch_impl(
        repo: &EvidenceRepositoryImpl,
        items: Vec<EvidenceModel>,
    ) -> Result<Vec<EvidenceModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut saved_items = Vec::with_capacity(items.len());
        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        for item in items {
            sqlx::query(
                r#"
                INSERT INTO evidence (id, contract_id, stored_file_name, created_at)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(item.id)
            .bind(item.contract_id)
            .bind(item.stored_file_name.as_str())
            .bind(item.created_at)
            .execute(&mut **transaction)
            .await?;

            saved_items.push(item);
        }

        Ok(saved_items)
    }
}

#[async_trait]
impl CreateBatch<Postgres, EvidenceModel> for EvidenceRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<EvidenceModel>,
    ) -> Result<Vec<EvidenceModel>, Box<dyn Error + Send + Sync>> {
        Self::create_batch_impl(self, items).await
    }
}
