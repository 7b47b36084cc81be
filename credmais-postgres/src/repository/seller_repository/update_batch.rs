use async_trait::async_trait;
use credmais_db::models::seller::SellerModel;
use credmais_db::repository::update_batch::UpdateBatch;
use sqlx::Postgres;
use std::error::Error;

use super::repo_impl::SellerRepositoryImpl;

impl SellerRepositoryImpl {
    pub(super) async fn update_batch_impl(
        &self,
        items: Vec<SellerModel>,
    ) -> Result<Vec<SellerModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        for item in &items {
            let result = sqlx::query(
                r#"
                UPDATE seller SET
                    owner_id = $2,
                    name = $3,
                    phone = $4
                WHERE id = $1
                "#,
            )
            .bind(item.id)
            .bind(item.owner_id)
            .bind(item.name.as_str())
            .bind(item.phone.as_ref().map(|s| s.as_str()))
            .execute(&mut **transaction)
            .await?;

            if result.rows_affected() == 0 {
                return Err(format!("Seller {} not found", item.id).into());
            }
        }

        Ok(items)
    }
}

#[async_trait]
impl UpdateBatch<Postgres, SellerModel> for SellerRepositoryImpl {
    async fn update_batch(
        &self,
        items: Vec<SellerModel>,
    ) -> Result<Vec<SellerModel>, Box<dyn Error + Send + Sync>> {
        self.update_batch_impl(items).await
    }
}
