use sqlx::Database;
use std::sync::Arc;

use crate::models::{
    account::AccountModel, contract::ContractModel, evidence::EvidenceModel, note::NoteModel,
    seller::SellerModel,
};
use crate::repository::{
    account_queries::AccountQueries, contract_queries::ContractQueries,
    create_batch::CreateBatch, delete_batch::DeleteBatch, evidence_queries::EvidenceQueries,
    exist_by_ids::ExistByIds, load_batch::LoadBatch, note_queries::NoteQueries,
    seller_queries::SellerQueries, update_batch::UpdateBatch,
};

/// Full set of operations an account store provides
pub trait AccountRepository<DB: Database>:
    LoadBatch<DB, AccountModel>
    + CreateBatch<DB, AccountModel>
    + UpdateBatch<DB, AccountModel>
    + DeleteBatch<DB, AccountModel>
    + AccountQueries<DB>
{
}

impl<DB: Database, R> AccountRepository<DB> for R where
    R: LoadBatch<DB, AccountModel>
        + CreateBatch<DB, AccountModel>
        + UpdateBatch<DB, AccountModel>
        + DeleteBatch<DB, AccountModel>
        + AccountQueries<DB>
{
}

pub trait SellerRepository<DB: Database>:
    LoadBatch<DB, SellerModel>
    + CreateBatch<DB, SellerModel>
    + UpdateBatch<DB, SellerModel>
    + DeleteBatch<DB, SellerModel>
    + ExistByIds<DB, SellerModel>
    + SellerQueries<DB>
{
}

impl<DB: Database, R> SellerRepository<DB> for R where
    R: LoadBatch<DB, SellerModel>
        + CreateBatch<DB, SellerModel>
        + UpdateBatch<DB, SellerModel>
        + DeleteBatch<DB, SellerModel>
        + ExistByIds<DB, SellerModel>
        + SellerQueries<DB>
{
}

pub trait ContractRepository<DB: Database>:
    LoadBatch<DB, ContractModel>
    + CreateBatch<DB, ContractModel>
    + UpdateBatch<DB, ContractModel>
    + DeleteBatch<DB, ContractModel>
    + ContractQueries<DB>
{
}

impl<DB: Database, R> ContractRepository<DB> for R where
    R: LoadBatch<DB, ContractModel>
        + CreateBatch<DB, ContractModel>
        + UpdateBatch<DB, ContractModel>
        + DeleteBatch<DB, ContractModel>
        + ContractQueries<DB>
{
}

pub trait EvidenceRepository<DB: Database>:
    LoadBatch<DB, EvidenceModel>
    + CreateBatch<DB, EvidenceModel>
    + DeleteBatch<DB, EvidenceModel>
    + EvidenceQueries<DB>
{
}

impl<DB: Database, R> EvidenceRepository<DB> for R where
    R: LoadBatch<DB, EvidenceModel>
        + CreateBatch<DB, EvidenceModel>
        + DeleteBatch<DB, EvidenceModel>
        + EvidenceQueries<DB>
{
}

pub trait NoteRepository<DB: Database>:
    LoadBatch<DB, NoteModel>
    + CreateBatch<DB, NoteModel>
    + UpdateBatch<DB, NoteModel>
    + DeleteBatch<DB, NoteModel>
    + NoteQueries<DB>
{
}

impl<DB: Database, R> NoteRepository<DB> for R where
    R: LoadBatch<DB, NoteModel>
        + CreateBatch<DB, NoteModel>
        + UpdateBatch<DB, NoteModel>
        + DeleteBatch<DB, NoteModel>
        + NoteQueries<DB>
{
}

/// Every repository of one unit of work.
///
/// Backends build one bundle per request so all writes of an operation share a transaction.
pub struct Repositories<DB: Database> {
    pub accounts: Arc<dyn AccountRepository<DB>>,
    pub sellers: Arc<dyn SellerRepository<DB>>,
    pub contracts: Arc<dyn ContractRepository<DB>>,
    pub evidence: Arc<dyn EvidenceRepository<DB>>,
    pub notes: Arc<dyn NoteRepository<DB>>,
}

impl<DB: Database> Clone for Repositories<DB> {
    fn clone(&self) -> Self {
        Self {
            accounts: self.accounts.clone(),
            sellers: self.sellers.clone(),
            contracts: self.contracts.clone(),
            evidence: self.evidence.clone(),
            notes: self.notes.clone(),
        }
    }
}
