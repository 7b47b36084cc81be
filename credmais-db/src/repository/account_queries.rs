use async_trait::async_trait;
use sqlx::Database;

use crate::models::account::AccountModel;

/// Account lookups needed by login and first-access provisioning
#[async_trait]
pub trait AccountQueries<DB: Database>: Send + Sync {
    /// Find the account holding the given login address (compared lowercase)
    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<AccountModel>, Box<dyn std::error::Error + Send + Sync>>;

    /// Find every account still pending first access whose name equals `name` exactly
    async fn find_pending_by_name(
        &self,
        name: &str,
    ) -> Result<Vec<AccountModel>, Box<dyn std::error::Error + Send + Sync>>;

    /// List every account ordered by name
    async fn list_all(&self) -> Result<Vec<AccountModel>, Box<dyn std::error::Error + Send + Sync>>;
}
