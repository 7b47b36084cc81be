use async_trait::async_trait;
use credmais_db::models::contract::ContractModel;
use credmais_db::repository::update_batch::UpdateBatch;
use sqlx::Postgres;
use std::error::Error;

use super::repo_impl::ContractRepositoryImpl;

impl ContractRepositoryImpl {
    pub(super) async fn update_batch_impl(
        &self,
        items: Vec<ContractModel>,
    ) -> Result<Vec<ContractModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        for item in &items {
            // owner_id and created_at are fixed at creation
            let result = sqlx::query(
                r#"
                UPDATE contract SET
                    name = $2,
                    tax_id = $3,
                    phone = $4,
                    product = $5,
                    amount = $6,
                    seller_id = $7,
                    contract_status = $8,
                    commission_status = $9,
                    formalization_status = $10
                WHERE id = $1
                "#,
            )
            .bind(item.id)
            .bind(item.name.as_str())
            .bind(item.tax_id.as_str())
            .bind(item.phone.as_ref().map(|s| s.as_str()))
            .bind(item.product.as_ref().map(|s| s.as_str()))
            .bind(item.amount)
            .bind(item.seller_id)
            .bind(item.contract_status)
            .bind(item.commission_status)
            .bind(item.formalization_status)
            .execute(&mut **transaction)
            .await?;

            if result.rows_affected() == 0 {
                return Err(format!("Contract {} not found", item.id).into());
            }
        }

        Ok(items)
    }
}

#[async_trait]
impl UpdateBatch<Postgres, ContractModel> for ContractRepositoryImpl {
    async fn update_batch(
        &self,
        items: Vec<ContractModel>,
    ) -> Result<Vec<ContractModel>, Box<dyn Error + Send + Sync>> {
        self.update_batch_impl(items).await
    }
}

#[cfg(test)]
mod tests {
    use crate::repository::account_repository::test_utils::test_utils::create_test_placeholder;
    use crate::test_helper::setup_test_context;
    use credmais_db::models::common_enums::{CommissionStatus, ContractStatus, FormalizationStatus};
    use credmais_db::repository::{CreateBatch, LoadBatch, UpdateBatch};
    use rust_decimal::Decimal;
    use super::super::test_utils::test_utils::create_test_contract;

    #[tokio::test]
    async fn test_update_batch_moves_statuses_independently() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let Some(ctx) = setup_test_context().await? else {
            return Ok(());
        };
        let owner = create_test_placeholder("Updater");
        ctx.repos().accounts.create_batch(vec![owner.clone()]).await?;
        let contract = create_test_contract(owner.id, Some("Refin"), Decimal::new(50000, 2));
        ctx.repos().contracts.create_batch(vec![contract.clone()]).await?;

        let mut updated = contract.clone();
        updated.contract_status = ContractStatus::Cancelled;
        updated.commission_status = CommissionStatus::Paid;
        updated.formalization_status = FormalizationStatus::InProgress;
        ctx.repos().contracts.update_batch(vec![updated]).await?;

        let loaded = ctx.repos().contracts.load_batch(&[contract.id]).await?;
        let loaded = loaded[0].as_ref().unwrap();
        assert_eq!(loaded.contract_status, ContractStatus::Cancelled);
        assert_eq!(loaded.commission_status, CommissionStatus::Paid);
        assert_eq!(loaded.formalization_status, FormalizationStatus::InProgress);
        assert_eq!(loaded.owner_id, owner.id);

        Ok(())
    }
}
