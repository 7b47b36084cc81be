use std::sync::Arc;

use credmais_db::repository::Repositories;
use sqlx::Database;

use crate::aggregator::CategoryAggregator;
use crate::config::CoreConfig;
use crate::contracts::ContractService;
use crate::evidence::{EvidenceService, FileStore};
use crate::identity::IdentityContext;
use crate::notes::NoteService;
use crate::provisioning::AccountService;
use crate::report::ReportEngine;
use crate::sellers::SellerService;
use crate::session::SessionStore;

/// Every service of one unit of work, wired over the same repositories.
///
/// Built per request from the backend's repository bundle; construction only clones `Arc`s.
pub struct CoreServices<DB: Database> {
    pub identity: Arc<IdentityContext<DB>>,
    pub accounts: AccountService<DB>,
    pub aggregator: CategoryAggregator<DB>,
    pub reports: ReportEngine<DB>,
    pub evidence: Arc<EvidenceService<DB>>,
    pub contracts: ContractService<DB>,
    pub sellers: SellerService<DB>,
    pub notes: NoteService<DB>,
}

impl<DB: Database> CoreServices<DB> {
    pub fn new(
        config: &CoreConfig,
        repositories: Repositories<DB>,
        sessions: Arc<dyn SessionStore>,
        files: Arc<dyn FileStore>,
    ) -> Self {
        let identity = Arc::new(IdentityContext::new(
            &config.admin_email,
            repositories.accounts.clone(),
            sessions.clone(),
        ));
        let evidence = Arc::new(EvidenceService::new(
            repositories.contracts.clone(),
            repositories.evidence.clone(),
            files,
            config.max_upload_bytes,
        ));

        Self {
            accounts: AccountService::new(
                config,
                identity.clone(),
                repositories.accounts.clone(),
                repositories.contracts.clone(),
                sessions.clone(),
            ),
            aggregator: CategoryAggregator::new(repositories.contracts.clone()),
            reports: ReportEngine::new(
                repositories.contracts.clone(),
                repositories.sellers.clone(),
                sessions,
            ),
            contracts: ContractService::new(
                repositories.contracts.clone(),
                repositories.sellers.clone(),
                evidence.clone(),
            ),
            sellers: SellerService::new(repositories.sellers, repositories.contracts),
            notes: NoteService::new(repositories.notes),
            identity,
            evidence,
        }
    }
}
