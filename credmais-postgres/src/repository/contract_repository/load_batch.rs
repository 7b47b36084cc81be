use async_trait::async_trait;
use credmais_db::models::contract::ContractModel;
use credmais_db::repository::load_batch::LoadBatch;
use crate::utils::TryFromRow;
use sqlx::Postgres;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::ContractRepositoryImpl;

impl ContractRepositoryImpl {
    pub(super) async fn load_batch_impl(
        repo: &ContractRepositoryImpl,
        ids: &[Uuid],
    ) -> Result<Vec<Option<ContractModel>>, Box<dyn Error + Send + Sync>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let query = r#"SELECT * FROM contract WHERE id = ANY($1)"#;
        let rows = {
            let mut tx = repo.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query(query).bind(ids).fetch_all(&mut **transaction).await?
        };

        let mut item_map = std::collections::HashMap::new();
        for row in rows {
            let item = ContractModel::try_from_row(&row)?;
            item_map.insert(item.id, item);
        }

        Ok(ids.iter().map(|id| item_map.remove(id)).collect())
    }
}

#[async_trait]
impl LoadBatch<Postgres, ContractModel> for ContractRepositoryImpl {
    async fn load_batch(&self, ids: &[Uuid]) -> Result<Vec<Option<ContractModel>>, Box<dyn Error + Send + Sync>> {
        Self::load_batch_impl(self, ids).await
    }
}

#[cfg(test)]
mod tests {
    use crate::repository::account_repository::test_utils::test_utils::create_test_placeholder;
    use crate::test_helper::setup_test_context;
    use credmais_db::models::common_enums::ContractStatus;
    use credmais_db::repository::{CreateBatch, LoadBatch};
    use rust_decimal::Decimal;
    use super::super::test_utils::test_utils::create_test_contract;

    #[tokio::test]
    async fn test_load_batch_round_trips_amount_and_statuses() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let Some(ctx) = setup_test_context().await? else {
            return Ok(());
        };
        let owner = create_test_placeholder("Loader");
        ctx.repos().accounts.create_batch(vec![owner.clone()]).await?;

        let mut contract = create_test_contract(owner.id, Some("Cartão Benefício"), Decimal::new(123456, 2));
        contract.contract_status = ContractStatus::UnderReview;
        ctx.repos().contracts.create_batch(vec![contract.clone()]).await?;

        let loaded = ctx.repos().contracts.load_batch(&[contract.id]).await?;
        let loaded = loaded[0].as_ref().unwrap();
        assert_eq!(loaded.amount, Decimal::new(123456, 2));
        assert_eq!(loaded.contract_status, ContractStatus::UnderReview);
        assert_eq!(loaded.product.as_deref(), Some("Cartão Benefício"));
        assert_eq!(loaded.created_at, contract.created_at);

        Ok(())
    }
}
