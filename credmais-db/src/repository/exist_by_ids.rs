use async_trait::async_trait;
use sqlx::Database;
use uuid::Uuid;

use crate::models::identifiable::Identifiable;

/// Generic repository trait for checking existence of multiple entities by their IDs
///
/// Returns a vector of tuples where each tuple contains the UUID and a boolean indicating existence.
///
/// # Type Parameters
/// * `DB` - The database type (must implement sqlx::Database)
/// * `T` - The entity type the ids refer to
#[async_trait]
pub trait ExistByIds<DB: Database, T: Identifiable>: Send + Sync {
    /// Check existence of multiple entities by their unique identifiers
    ///
    /// # Arguments
    /// * `ids` - A slice of UUIDs to check
    ///
    /// # Returns
    /// * `Ok(Vec<(Uuid, bool)>)` - A vector of tuples mapping each ID to its existence status
    /// * `Err` - An error if the query could not be executed
    async fn exist_by_ids(&self, ids: &[Uuid]) -> Result<Vec<(Uuid, bool)>, Box<dyn std::error::Error + Send + Sync>>;
}
