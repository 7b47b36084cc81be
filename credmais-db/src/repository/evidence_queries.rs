use async_trait::async_trait;
use sqlx::Database;
use uuid::Uuid;

use crate::models::evidence::EvidenceModel;

#[async_trait]
pub trait EvidenceQueries<DB: Database>: Send + Sync {
    /// Find every evidence row attached to a contract, oldest first
    async fn find_by_contract_id(
        &self,
        contract_id: Uuid,
    ) -> Result<Vec<EvidenceModel>, Box<dyn std::error::Error + Send + Sync>>;

    /// Find the evidence row backed by the given stored file
    async fn find_by_stored_file_name(
        &self,
        stored_file_name: &str,
    ) -> Result<Option<EvidenceModel>, Box<dyn std::error::Error + Send + Sync>>;
}
