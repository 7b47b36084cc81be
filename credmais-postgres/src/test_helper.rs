//! Test helper module for transaction-based test isolation
//!
//! Every test runs inside one unit of work that is never committed, so all changes are
//! rolled back when the context is dropped. Tests are skipped when `DATABASE_URL` is not set.

use crate::postgres_repositories::{PostgresRepositories, UnitOfWork};

pub struct TestContext {
    pub unit_of_work: UnitOfWork,
}

impl TestContext {
    pub fn repos(&self) -> &UnitOfWork {
        &self.unit_of_work
    }
}

/// Setup a test context with a transactional database session
///
/// Returns `Ok(None)` when no database is configured.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_example() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
///     let Some(ctx) = setup_test_context().await? else { return Ok(()) };
///     let account_repo = &ctx.repos().accounts;
///
///     // All changes are rolled back when ctx is dropped
///     Ok(())
/// }
/// ```
pub async fn setup_test_context() -> Result<Option<TestContext>, Box<dyn std::error::Error + Send + Sync>> {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        return Ok(None);
    };

    let repos = PostgresRepositories::connect(&database_url, 1).await?;
    repos.migrate().await?;
    let unit_of_work = repos.begin().await?;

    Ok(Some(TestContext { unit_of_work }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::account_repository::test_utils::test_utils::create_test_account;
    use credmais_db::repository::{CreateBatch, LoadBatch};

    #[tokio::test]
    async fn test_transaction_rollback() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let account = create_test_account("Rollback", "rollback@credmais.test");
        {
            let Some(ctx) = setup_test_context().await? else {
                return Ok(());
            };
            ctx.repos().accounts.create_batch(vec![account.clone()]).await?;
            let loaded = ctx.repos().accounts.load_batch(&[account.id]).await?;
            assert!(loaded[0].is_some());
        }

        {
            let Some(ctx) = setup_test_context().await? else {
                return Ok(());
            };
            let loaded = ctx.repos().accounts.load_batch(&[account.id]).await?;
            assert!(loaded[0].is_none());
        }

        Ok(())
    }
}
