use async_trait::async_trait;
use credmais_db::models::seller::SellerModel;
use credmais_db::repository::exist_by_ids::ExistByIds;
use sqlx::{Postgres, Row};
use std::collections::HashSet;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::SellerRepositoryImpl;

impl SellerRepositoryImpl {
    pub(super) async fn exist_by_ids_impl(
        repo: &SellerRepositoryImpl,
        ids: &[Uuid],
    ) -> Result<Vec<(Uuid, bool)>, Box<dyn Error + Send + Sync>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let query = r#"SELECT id FROM seller WHERE id = ANY($1)"#;
        let rows = {
            let mut tx = repo.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query(query).bind(ids).fetch_all(&mut **transaction).await?
        };

        let mut existing = HashSet::with_capacity(rows.len());
        for row in rows {
            existing.insert(row.try_get::<Uuid, _>("id")?);
        }

        Ok(ids.iter().map(|id| (*id, existing.contains(id))).collect())
    }
}

#[async_trait]
impl ExistByIds<Postgres, SellerModel> for SellerRepositoryImpl {
    async fn exist_by_ids(&self, ids: &[Uuid]) -> Result<Vec<(Uuid, bool)>, Box<dyn Error + Send + Sync>> {
        Self::exist_by_ids_impl(self, ids).await
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helper::setup_test_context;
    use credmais_db::repository::{CreateBatch, ExistByIds};
    use uuid::Uuid;
    use super::super::test_utils::test_utils::create_test_seller;

    #[tokio::test]
    async fn test_exist_by_ids() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let Some(ctx) = setup_test_context().await? else {
            return Ok(());
        };
        let seller_repo = &ctx.repos().sellers;
        let seller = create_test_seller(None, "Present");
        seller_repo.create_batch(vec![seller.clone()]).await?;

        let missing = Uuid::new_v4();
        let result = seller_repo.exist_by_ids(&[seller.id, missing]).await?;
        assert_eq!(result, vec![(seller.id, true), (missing, false)]);

        Ok(())
    }
}
