use credmais_db::repository::Repositories;
use postgres_unit_of_work::Executor;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres};
use std::error::Error;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::repository::account_repository::AccountRepositoryImpl;
use crate::repository::contract_repository::ContractRepositoryImpl;
use crate::repository::evidence_repository::EvidenceRepositoryImpl;
use crate::repository::note_repository::NoteRepositoryImpl;
use crate::repository::seller_repository::SellerRepositoryImpl;

pub struct PostgresRepositories {
    pool: Arc<PgPool>,
}

impl PostgresRepositories {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    pub async fn connect(
        database_url: &str,
        max_connections: u32,
    ) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(30))
            .connect(database_url)
            .await?;
        Ok(Self::new(Arc::new(pool)))
    }

    pub fn pool(&self) -> &Arc<PgPool> {
        &self.pool
    }

    pub async fn migrate(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        sqlx::migrate!().run(&*self.pool).await?;
        Ok(())
    }

    /// Create all repositories sharing a single transaction
    pub async fn begin(&self) -> Result<UnitOfWork, Box<dyn Error + Send + Sync>> {
        let tx = self.pool.begin().await?;
        let executor = Executor::new(tx);

        Ok(UnitOfWork {
            accounts: Arc::new(AccountRepositoryImpl::new(executor.clone())),
            sellers: Arc::new(SellerRepositoryImpl::new(executor.clone())),
            contracts: Arc::new(ContractRepositoryImpl::new(executor.clone())),
            evidence: Arc::new(EvidenceRepositoryImpl::new(executor.clone())),
            notes: Arc::new(NoteRepositoryImpl::new(executor.clone())),
            executor,
        })
    }
}

/// Repositories of one request. Dropping it without [`UnitOfWork::commit`] rolls back.
pub struct UnitOfWork {
    executor: Executor,
    pub accounts: Arc<AccountRepositoryImpl>,
    pub sellers: Arc<SellerRepositoryImpl>,
    pub contracts: Arc<ContractRepositoryImpl>,
    pub evidence: Arc<EvidenceRepositoryImpl>,
    pub notes: Arc<NoteRepositoryImpl>,
}

impl UnitOfWork {
    pub fn repositories(&self) -> Repositories<Postgres> {
        Repositories {
            accounts: self.accounts.clone(),
            sellers: self.sellers.clone(),
            contracts: self.contracts.clone(),
            evidence: self.evidence.clone(),
            notes: self.notes.clone(),
        }
    }

    pub async fn commit(self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let tx = self.executor.tx.lock().await.take();
        let transaction = tx.ok_or("Transaction has been consumed")?;
        transaction.commit().await?;
        debug!("unit of work committed");
        Ok(())
    }
}
