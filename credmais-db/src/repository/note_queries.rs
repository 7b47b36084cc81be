use async_trait::async_trait;
use sqlx::Database;

use crate::models::note::NoteModel;
use crate::repository::contract_query::OwnerScope;

#[async_trait]
pub trait NoteQueries<DB: Database>: Send + Sync {
    /// Find every note visible in the scope, newest first
    async fn find_by_scope(
        &self,
        scope: OwnerScope,
    ) -> Result<Vec<NoteModel>, Box<dyn std::error::Error + Send + Sync>>;
}
