use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::Database;

use crate::models::contract::ContractModel;
use crate::repository::contract_query::ContractQuery;

/// Predicate-driven contract reads
///
/// Both operations evaluate the same [`ContractQuery`], which is what keeps dashboard totals
/// and report totals from drifting apart.
#[async_trait]
pub trait ContractQueries<DB: Database>: Send + Sync {
    /// Find every contract matching the query, newest `created_at` first
    async fn find_contracts(
        &self,
        query: &ContractQuery,
    ) -> Result<Vec<ContractModel>, Box<dyn std::error::Error + Send + Sync>>;

    /// Sum `amount` over every contract matching the query; zero when nothing matches
    async fn sum_amount(
        &self,
        query: &ContractQuery,
    ) -> Result<Decimal, Box<dyn std::error::Error + Send + Sync>>;
}
