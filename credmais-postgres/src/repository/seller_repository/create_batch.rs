use async_trait::async_trait;
use credmais_db::models::seller::SellerModel;
use credmais_db::repository::create_batch::CreateBatch;
use sqlx::Postgres;
use std::error::Error;

use super::repo_impl::SellerRepositoryImpl;

impl SellerRepositoryImpl {
    pub(super) async fn create_batch_impl(
        repo: &SellerRepositoryImpl,
        items: Vec<SellerModel>,
    ) -> Result<Vec<SellerModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut saved_items = Vec::with_capacity(items.len());
        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        for item in items {
            sqlx::query(
                r#"
                INSERT INTO seller (id, owner_id, name, phone)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(item.id)
            .bind(item.owner_id)
            .bind(item.name.as_str())
            .bind(item.phone.as_ref().map(|s| s.as_str()))
            .execute(&mut **transaction)
            .await?;

            saved_items.push(item);
        }

        Ok(saved_items)
    }
}

#[async_trait]
impl CreateBatch<Postgres, SellerModel> for SellerRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<SellerModel>,
    ) -> Result<Vec<SellerModel>, Box<dyn Error + Send + Sync>> {
        Self::create_batch_impl(self, items).await
    }
}
