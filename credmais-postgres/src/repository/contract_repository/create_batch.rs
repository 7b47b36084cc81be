use async_trait::async_trait;
use credmais_db::models::contract::ContractModel;
use credmais_db::repository::create_batch::CreateBatch;
use sqlx::Postgres;
use std::error::Error;

use super::repo_impl::ContractRepositoryImpl;

impl ContractRepositoryImpl {
    pub(super) async fn create_batch_impl(
        repo: &ContractRepositoryImpl,
        items: Vec<ContractModel>,
    ) -> Result<Vec<ContractModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut saved_items = Vec::with_capacity(items.len());
        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        for item in items {
            sqlx::query(
                r#"
                INSERT INTO contract (
                    id, owner_id, name, tax_id, phone, product, amount, seller_id,
                    contract_status, commission_status, formalization_status, created_at
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
                "#,
            )
            .bind(item.id)
            .bind(item.owner_id)
            .bind(item.name.as_str())
            .bind(item.tax_id.as_str())
            .bind(item.phone.as_ref().map(|s| s.as_str()))
            .bind(item.product.as_ref().map(|s| s.as_str()))
            .bind(item.amount)
            .bind(item.seller_id)
            .bind(item.contract_status)
            .bind(item.commission_status)
            .bind(item.formalization_status)
            .bind(item.created_at)
            .execute(&mut **transaction)
            .await?;

            saved_items.push(item);
        }

        Ok(saved_items)
    }
}

#[async_trait]
impl CreateBatch<Postgres, ContractModel> for ContractRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<ContractModel>,
    ) -> Result<Vec<ContractModel>, Box<dyn Error + Send + Sync>> {
        Self::create_batch_impl(self, items).await
    }
}
