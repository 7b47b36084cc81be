use async_trait::async_trait;
use sqlx::Database;

use crate::models::seller::SellerModel;

#[async_trait]
pub trait SellerQueries<DB: Database>: Send + Sync {
    /// List every seller ordered by name
    async fn list_all(&self) -> Result<Vec<SellerModel>, Box<dyn std::error::Error + Send + Sync>>;
}
