use async_trait::async_trait;
use sqlx::Database;
use uuid::Uuid;

use crate::models::identifiable::Identifiable;

/// Generic repository trait for deleting multiple entities in a batch
///
/// Returns the number of items actually deleted; unknown ids are skipped.
///
/// # Type Parameters
/// * `DB` - The database type (must implement sqlx::Database)
/// * `T` - The entity type the ids refer to
///
/// # Example
/// ```ignore
/// impl DeleteBatch<Postgres, EvidenceModel> for EvidenceRepositoryImpl {
///     async fn delete_batch(&self, ids: &[Uuid]) -> Result<usize, Box<dyn Error + Send + Sync>> {
///         // Implementation
///     }
/// }
/// ```
#[async_trait]
pub trait DeleteBatch<DB: Database, T: Identifiable>: Send + Sync {
    /// Delete multiple items by their IDs
    ///
    /// # Arguments
    /// * `ids` - A slice of UUIDs of the entities to delete
    ///
    /// # Returns
    /// * `Ok(usize)` - The number of items successfully deleted
    /// * `Err` - An error if the statements could not be executed
    async fn delete_batch(
        &self,
        ids: &[Uuid],
    ) -> Result<usize, Box<dyn std::error::Error + Send + Sync>>;
}
