use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use credmais_api::Identity;
use credmais_db::repository::{
    AccountQueries, ContractQueries, ContractQuery, CreateBatch, DeleteBatch, EvidenceQueries,
    ExistByIds, LoadBatch, NoteQueries, OwnerScope, Repositories, SellerQueries, UpdateBatch,
};
use credmais_db::{
    AccountModel, CommissionStatus, ContractModel, ContractStatus, EvidenceModel,
    FormalizationStatus, NoteModel, SellerModel,
};
use heapless::String as HeaplessString;
use rust_decimal::Decimal;
use sqlx::Postgres;
use tempfile::TempDir;
use uuid::Uuid;

use crate::config::{CoreConfig, DEFAULT_MAX_UPLOAD_BYTES};
use crate::evidence::{FileStore, LocalFileStore};
use crate::identity::IdentityContext;
use crate::password::hash_password;
use crate::services::CoreServices;
use crate::session::{MokaSessionStore, SessionState, SessionStore};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub const TEST_ADMIN_EMAIL: &str = "admin@credmais.com";
pub const TEST_PASSWORD: &str = "secret";

pub fn test_config() -> CoreConfig {
    CoreConfig {
        admin_email: TEST_ADMIN_EMAIL.to_string(),
        admin_name: "Administrador".to_string(),
        admin_initial_password: None,
        upload_dir: "uploads".into(),
        max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        session_idle: Duration::from_secs(60),
        session_max_entries: 100,
        database_url: None,
    }
}

/// Argon2 is slow on purpose; fixtures share one hash of [`TEST_PASSWORD`].
fn test_password_hash() -> String {
    static HASH: OnceLock<String> = OnceLock::new();
    HASH.get_or_init(|| hash_password(TEST_PASSWORD).unwrap())
        .clone()
}

pub fn claimed_account(name: &str, email: &str) -> AccountModel {
    AccountModel {
        id: Uuid::new_v4(),
        name: HeaplessString::try_from(name).unwrap(),
        email: Some(HeaplessString::try_from(email.to_lowercase().as_str()).unwrap()),
        phone: None,
        password_hash: test_password_hash(),
        blocked: false,
        pending_first_access: false,
        created_at: Utc::now(),
    }
}

pub fn seller_model(owner_id: Option<Uuid>, name: &str) -> SellerModel {
    SellerModel {
        id: Uuid::new_v4(),
        owner_id,
        name: HeaplessString::try_from(name).unwrap(),
        phone: None,
    }
}

pub fn contract_model(owner_id: Uuid, product: &str, amount: Decimal) -> ContractModel {
    ContractModel {
        id: Uuid::new_v4(),
        owner_id,
        name: HeaplessString::try_from("Maria Souza").unwrap(),
        tax_id: HeaplessString::try_from("123.456.789-00").unwrap(),
        phone: None,
        product: Some(HeaplessString::try_from(product).unwrap()),
        amount,
        seller_id: None,
        contract_status: ContractStatus::Open,
        commission_status: CommissionStatus::ToPay,
        formalization_status: FormalizationStatus::NotFormalized,
        created_at: Utc::now(),
    }
}

#[derive(Default)]
struct Tables {
    accounts: HashMap<Uuid, AccountModel>,
    sellers: HashMap<Uuid, SellerModel>,
    contracts: HashMap<Uuid, ContractModel>,
    evidence: HashMap<Uuid, EvidenceModel>,
    notes: HashMap<Uuid, NoteModel>,
}

/// In-memory record store implementing every repository trait.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap()
    }

    pub fn repositories(self: &Arc<Self>) -> Repositories<Postgres> {
        Repositories {
            accounts: self.clone(),
            sellers: self.clone(),
            contracts: self.clone(),
            evidence: self.clone(),
            notes: self.clone(),
        }
    }

    pub fn insert_account(&self, account: AccountModel) -> AccountModel {
        self.lock().accounts.insert(account.id, account.clone());
        account
    }

    pub fn insert_seller(&self, seller: SellerModel) -> SellerModel {
        self.lock().sellers.insert(seller.id, seller.clone());
        seller
    }

    pub fn insert_contract(&self, contract: ContractModel) -> ContractModel {
        self.lock().contracts.insert(contract.id, contract.clone());
        contract
    }
}

macro_rules! memory_table {
    ($model:ty, $table:ident) => {
        #[async_trait]
        impl LoadBatch<Postgres, $model> for MemoryStore {
            async fn load_batch(&self, ids: &[Uuid]) -> Result<Vec<Option<$model>>, BoxError> {
                let tables = self.lock();
                Ok(ids.iter().map(|id| tables.$table.get(id).cloned()).collect())
            }
        }

        #[async_trait]
        impl CreateBatch<Postgres, $model> for MemoryStore {
            async fn create_batch(&self, items: Vec<$model>) -> Result<Vec<$model>, BoxError> {
                let mut tables = self.lock();
                for item in &items {
                    if tables.$table.contains_key(&item.id) {
                        return Err(format!("duplicate id {}", item.id).into());
                    }
                }
                for item in &items {
                    tables.$table.insert(item.id, item.clone());
                }
                Ok(items)
            }
        }

        #[async_trait]
        impl UpdateBatch<Postgres, $model> for MemoryStore {
            async fn update_batch(&self, items: Vec<$model>) -> Result<Vec<$model>, BoxError> {
                let mut tables = self.lock();
                for item in &items {
                    if !tables.$table.contains_key(&item.id) {
                        return Err(format!("missing id {}", item.id).into());
                    }
                }
                for item in &items {
                    tables.$table.insert(item.id, item.clone());
                }
                Ok(items)
            }
        }

        #[async_trait]
        impl DeleteBatch<Postgres, $model> for MemoryStore {
            async fn delete_batch(&self, ids: &[Uuid]) -> Result<usize, BoxError> {
                let mut tables = self.lock();
                Ok(ids.iter().filter(|id| tables.$table.remove(*id).is_some()).count())
            }
        }

        #[async_trait]
        impl ExistByIds<Postgres, $model> for MemoryStore {
            async fn exist_by_ids(&self, ids: &[Uuid]) -> Result<Vec<(Uuid, bool)>, BoxError> {
                let tables = self.lock();
                Ok(ids.iter().map(|id| (*id, tables.$table.contains_key(id))).collect())
            }
        }
    };
}

memory_table!(AccountModel, accounts);
memory_table!(SellerModel, sellers);
memory_table!(ContractModel, contracts);
memory_table!(EvidenceModel, evidence);
memory_table!(NoteModel, notes);

#[async_trait]
impl AccountQueries<Postgres> for MemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<AccountModel>, BoxError> {
        let email = email.to_lowercase();
        Ok(self
            .lock()
            .accounts
            .values()
            .find(|a| a.email_str().is_some_and(|e| e.to_lowercase() == email))
            .cloned())
    }

    async fn find_pending_by_name(&self, name: &str) -> Result<Vec<AccountModel>, BoxError> {
        Ok(self
            .lock()
            .accounts
            .values()
            .filter(|a| a.pending_first_access && a.name.as_str() == name)
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> Result<Vec<AccountModel>, BoxError> {
        let mut accounts: Vec<_> = self.lock().accounts.values().cloned().collect();
        accounts.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(accounts)
    }
}

#[async_trait]
impl SellerQueries<Postgres> for MemoryStore {
    async fn list_all(&self) -> Result<Vec<SellerModel>, BoxError> {
        let mut sellers: Vec<_> = self.lock().sellers.values().cloned().collect();
        sellers.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(sellers)
    }
}

#[async_trait]
impl ContractQueries<Postgres> for MemoryStore {
    async fn find_contracts(&self, query: &ContractQuery) -> Result<Vec<ContractModel>, BoxError> {
        let mut contracts: Vec<_> = self
            .lock()
            .contracts
            .values()
            .filter(|c| query.matches(c))
            .cloned()
            .collect();
        contracts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(contracts)
    }

    async fn sum_amount(&self, query: &ContractQuery) -> Result<Decimal, BoxError> {
        Ok(self
            .lock()
            .contracts
            .values()
            .filter(|c| query.matches(c))
            .map(|c| c.amount)
            .sum())
    }
}

#[async_trait]
impl EvidenceQueries<Postgres> for MemoryStore {
    async fn find_by_contract_id(&self, contract_id: Uuid) -> Result<Vec<EvidenceModel>, BoxError> {
        let mut rows: Vec<_> = self
            .lock()
            .evidence
            .values()
            .filter(|e| e.contract_id == contract_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(rows)
    }

    async fn find_by_stored_file_name(
        &self,
        stored_file_name: &str,
    ) -> Result<Option<EvidenceModel>, BoxError> {
        Ok(self
            .lock()
            .evidence
            .values()
            .find(|e| e.stored_file_name.as_str() == stored_file_name)
            .cloned())
    }
}

#[async_trait]
impl NoteQueries<Postgres> for MemoryStore {
    async fn find_by_scope(&self, scope: OwnerScope) -> Result<Vec<NoteModel>, BoxError> {
        let mut notes: Vec<_> = self
            .lock()
            .notes
            .values()
            .filter(|n| scope.admits(n.owner_id))
            .cloned()
            .collect();
        notes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(notes)
    }
}

/// Memory store, session store and a temporary upload directory wired into the services.
pub struct TestEnv {
    pub config: CoreConfig,
    pub store: Arc<MemoryStore>,
    pub sessions: Arc<dyn SessionStore>,
    pub files: Arc<dyn FileStore>,
    pub identity: Arc<IdentityContext<Postgres>>,
    services: CoreServices<Postgres>,
    _upload_dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    pub fn with_admin_password(password: &str) -> Self {
        Self::with_config(CoreConfig {
            admin_initial_password: Some(password.to_string()),
            ..test_config()
        })
    }

    fn with_config(mut config: CoreConfig) -> Self {
        let upload_dir = tempfile::tempdir().unwrap();
        config.upload_dir = upload_dir.path().to_path_buf();

        let store = Arc::new(MemoryStore::default());
        let sessions: Arc<dyn SessionStore> = Arc::new(MokaSessionStore::new(&config));
        let files: Arc<dyn FileStore> = Arc::new(LocalFileStore::new(upload_dir.path()));
        let services = CoreServices::new(
            &config,
            store.repositories(),
            sessions.clone(),
            files.clone(),
        );

        Self {
            config,
            identity: services.identity.clone(),
            store,
            sessions,
            files,
            services,
            _upload_dir: upload_dir,
        }
    }

    pub fn services(&self) -> &CoreServices<Postgres> {
        &self.services
    }

    pub async fn session_for(&self, account_id: Uuid) -> String {
        let token = crate::session::new_session_token();
        let state = SessionState {
            account_id: Some(account_id),
            ..Default::default()
        };
        self.sessions.store(&token, state).await;
        token
    }

    pub fn admin_identity(&self) -> Identity {
        let admin = self.store.insert_account(claimed_account("Administrador", TEST_ADMIN_EMAIL));
        Identity::new(admin.id, admin.name.as_str(), true)
    }

    pub fn user_identity(&self, name: &str, email: &str) -> Identity {
        let account = self.store.insert_account(claimed_account(name, email));
        Identity::new(account.id, account.name.as_str(), false)
    }
}
