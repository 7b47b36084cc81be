use async_trait::async_trait;
use credmais_db::models::seller::SellerModel;
use credmais_db::repository::seller_queries::SellerQueries;
use crate::utils::TryFromRow;
use sqlx::Postgres;
use std::error::Error;

use super::repo_impl::SellerRepositoryImpl;

#[async_trait]
impl SellerQueries<Postgres> for SellerRepositoryImpl {
    async fn list_all(&self) -> Result<Vec<SellerModel>, Box<dyn Error + Send + Sync>> {
        let query = r#"SELECT * FROM seller ORDER BY name, id"#;
        let rows = {
            let mut tx = self.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query(query).fetch_all(&mut **transaction).await?
        };

        rows.iter().map(SellerModel::try_from_row).collect()
    }
}
