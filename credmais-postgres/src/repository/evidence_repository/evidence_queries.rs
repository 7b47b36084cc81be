use async_trait::async_trait;
use credmais_db::models::evidence::EvidenceModel;
use credmais_db::repository::evidence_queries::EvidenceQueries;
use crate::utils::TryFromRow;
use sqlx::Postgres;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::EvidenceRepositoryImpl;

#[async_trait]
impl EvidenceQueries<Postgres> for EvidenceRepositoryImpl {
    async fn find_by_contract_id(
        &self,
        contract_id: Uuid,
    ) -> Result<Vec<EvidenceModel>, Box<dyn Error + Send + Sync>> {
        let query = r#"SELECT * FROM evidence WHERE contract_id = $1 ORDER BY created_at, stored_file_name"#;
        let rows = {
            let mut tx = self.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query(query).bind(contract_id).fetch_all(&mut **transaction).await?
        };

        rows.iter().map(EvidenceModel::try_from_row).collect()
    }

    async fn find_by_stored_file_name(
        &self,
        stored_file_name: &str,
    ) -> Result<Option<EvidenceModel>, Box<dyn Error + Send + Sync>> {
        let query = r#"SELECT * FROM evidence WHERE stored_file_name = $1"#;
        let row = {
            let mut tx = self.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query(query)
                .bind(stored_file_name)
                .fetch_optional(&mut **transaction)
                .await?
        };

        row.as_ref().map(EvidenceModel::try_from_row).transpose()
    }
}
