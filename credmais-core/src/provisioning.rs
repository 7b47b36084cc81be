use std::sync::Arc;

use chrono::Utc;
use credmais_api::{
    AccountEditInput, ApiError, ApiResult, ClaimInput, FirstAccessInput, Identity, LoginInput,
    PlaceholderInput,
};
use credmais_db::repository::{AccountRepository, ContractQuery, ContractRepository, OwnerScope};
use credmais_db::AccountModel;
use sqlx::Database;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::config::CoreConfig;
use crate::identity::{normalize_email, IdentityContext};
use crate::password::{hash_password, random_token, verify_password};
use crate::policy::OwnershipPolicy;
use crate::session::{SessionState, SessionStore};
use crate::text::{bounded, bounded_opt};

const PLACEHOLDER_DOMAIN: &str = "@placeholder.invalid";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// The session now belongs to this identity
    Authenticated(Identity),
    /// The account is still a placeholder; the caller must go through first access
    FirstAccessRequired,
}

pub fn is_placeholder_email(email: &str) -> bool {
    email.ends_with(PLACEHOLDER_DOMAIN)
}

/// Login, the placeholder-to-claimed lifecycle and account administration.
pub struct AccountService<DB: Database> {
    identity: Arc<IdentityContext<DB>>,
    accounts: Arc<dyn AccountRepository<DB>>,
    contracts: Arc<dyn ContractRepository<DB>>,
    sessions: Arc<dyn SessionStore>,
    admin_name: String,
    admin_initial_password: Option<String>,
}

impl<DB: Database> AccountService<DB> {
    pub fn new(
        config: &CoreConfig,
        identity: Arc<IdentityContext<DB>>,
        accounts: Arc<dyn AccountRepository<DB>>,
        contracts: Arc<dyn ContractRepository<DB>>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            identity,
            accounts,
            contracts,
            sessions,
            admin_name: config.admin_name.clone(),
            admin_initial_password: config.admin_initial_password.clone(),
        }
    }

    pub async fn login(&self, token: &str, input: &LoginInput) -> ApiResult<LoginOutcome> {
        input.validate()?;
        let account = self
            .accounts
            .find_by_email(&normalize_email(&input.email))
            .await?
            .ok_or(ApiError::InvalidCredential)?;

        if account.pending_first_access {
            info!(account_id = %account.id, "login redirected to first access");
            return Ok(LoginOutcome::FirstAccessRequired);
        }
        if !verify_password(&input.password, &account.password_hash) {
            info!(account_id = %account.id, "login rejected: bad credentials");
            return Err(ApiError::InvalidCredential);
        }
        if account.blocked {
            info!(account_id = %account.id, "login rejected: account blocked");
            return Err(ApiError::AccountBlocked);
        }

        let state = SessionState {
            account_id: Some(account.id),
            display_name: Some(account.name.to_string()),
            ..Default::default()
        };
        self.sessions.store(token, state).await;
        info!(account_id = %account.id, "login succeeded");

        Ok(LoginOutcome::Authenticated(Identity::new(
            account.id,
            account.name.as_str(),
            self.identity.is_admin_account(&account),
        )))
    }

    pub async fn logout(&self, token: &str) {
        self.sessions.remove(token).await;
    }

    /// Creates an account the real owner will claim later through first access.
    pub async fn create_placeholder(
        &self,
        identity: &Identity,
        input: &PlaceholderInput,
    ) -> ApiResult<AccountModel> {
        OwnershipPolicy::require_admin(identity)?;
        input.validate()?;

        let email = format!("pending-{}{}", random_token(24).to_lowercase(), PLACEHOLDER_DOMAIN);
        let account = AccountModel {
            id: Uuid::new_v4(),
            name: bounded(&input.name, "Name")?,
            email: Some(bounded(&email, "Email")?),
            phone: bounded_opt(input.phone.as_deref(), "Phone")?,
            password_hash: hash_password(&input.provisional_password)?,
            blocked: false,
            pending_first_access: true,
            created_at: Utc::now(),
        };
        let created = self.accounts.create_batch(vec![account]).await?;
        let account = created
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::InternalError("account was not created".to_string()))?;
        info!(account_id = %account.id, "placeholder account created");
        Ok(account)
    }

    /// Proves knowledge of the provisional password and marks the session for claiming.
    pub async fn validate_provisional(
        &self,
        token: &str,
        input: &FirstAccessInput,
    ) -> ApiResult<Uuid> {
        input.validate()?;
        let candidates = self.accounts.find_pending_by_name(input.name.trim()).await?;
        if candidates.is_empty() {
            return Err(ApiError::not_found("Pending account"));
        }
        let account = candidates
            .into_iter()
            .find(|a| verify_password(&input.provisional_password, &a.password_hash))
            .ok_or(ApiError::InvalidCredential)?;

        let mut state = self.sessions.load(token).await.unwrap_or_default();
        state.first_access_account_id = Some(account.id);
        self.sessions.store(token, state).await;
        info!(account_id = %account.id, "provisional password validated");
        Ok(account.id)
    }

    /// Gives the validated placeholder its permanent email and password.
    ///
    /// The session is not logged in afterwards; the owner signs in with the new credentials.
    pub async fn claim(&self, token: &str, input: &ClaimInput) -> ApiResult<()> {
        let mut state = self.sessions.load(token).await.unwrap_or_default();
        let account_id = state.first_access_account_id.ok_or_else(|| {
            ApiError::InvalidState("first access has not been validated".to_string())
        })?;

        let mut account = self
            .accounts
            .load_batch(&[account_id])
            .await?
            .into_iter()
            .next()
            .flatten()
            .ok_or_else(|| ApiError::not_found("Account"))?;
        if !account.pending_first_access {
            return Err(ApiError::InvalidState("account has already been claimed".to_string()));
        }

        input.validate()?;
        let email = normalize_email(&input.email);
        self.ensure_email_available(&email, account.id).await?;

        account.email = Some(bounded(&email, "Email")?);
        account.password_hash = hash_password(&input.new_password)?;
        account.pending_first_access = false;
        self.accounts.update_batch(vec![account]).await?;

        state.first_access_account_id = None;
        self.sessions.store(token, state).await;
        info!(%account_id, "account claimed");
        Ok(())
    }

    /// Creates the administrator account from configuration when it does not exist yet.
    pub async fn ensure_admin_account(&self) -> ApiResult<Option<AccountModel>> {
        let admin_email = self.identity.admin_email().to_string();
        if self.accounts.find_by_email(&admin_email).await?.is_some() {
            return Ok(None);
        }
        let Some(password) = self.admin_initial_password.as_deref() else {
            warn!(email = %admin_email, "no administrator account and no initial password configured");
            return Ok(None);
        };

        let account = AccountModel {
            id: Uuid::new_v4(),
            name: bounded(&self.admin_name, "Name")?,
            email: Some(bounded(&admin_email, "Email")?),
            phone: None,
            password_hash: hash_password(password)?,
            blocked: false,
            pending_first_access: false,
            created_at: Utc::now(),
        };
        let created = self.accounts.create_batch(vec![account]).await?;
        info!(email = %admin_email, "administrator account created");
        Ok(created.into_iter().next())
    }

    pub async fn list_accounts(&self, identity: &Identity) -> ApiResult<Vec<AccountModel>> {
        OwnershipPolicy::require_admin(identity)?;
        Ok(self.accounts.list_all().await?)
    }

    pub async fn block(&self, identity: &Identity, account_id: Uuid) -> ApiResult<AccountModel> {
        self.set_blocked(identity, account_id, true).await
    }

    pub async fn unblock(&self, identity: &Identity, account_id: Uuid) -> ApiResult<AccountModel> {
        self.set_blocked(identity, account_id, false).await
    }

    /// Admin edit. A new password also ends first access for a placeholder.
    pub async fn edit_account(
        &self,
        identity: &Identity,
        account_id: Uuid,
        input: &AccountEditInput,
    ) -> ApiResult<AccountModel> {
        OwnershipPolicy::require_admin(identity)?;
        input.validate()?;
        let mut account = self.load_account(account_id).await?;

        account.name = bounded(&input.name, "Name")?;
        account.phone = bounded_opt(input.phone.as_deref(), "Phone")?;
        if let Some(email) = input.email.as_deref().map(normalize_email) {
            self.ensure_email_available(&email, account.id).await?;
            account.email = Some(bounded(&email, "Email")?);
        }
        if let Some(password) = input.new_password.as_deref() {
            if account.pending_first_access {
                let has_real_email = account
                    .email_str()
                    .is_some_and(|email| !is_placeholder_email(email));
                if !has_real_email {
                    return Err(ApiError::ValidationError(
                        "a real email is required to activate this account".to_string(),
                    ));
                }
                account.pending_first_access = false;
                info!(%account_id, "account claimed by the administrator");
            }
            account.password_hash = hash_password(password)?;
        }

        let updated = self.accounts.update_batch(vec![account]).await?;
        updated
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::not_found("Account"))
    }

    /// Deletes an account that no longer owns contracts.
    pub async fn delete_account(&self, identity: &Identity, account_id: Uuid) -> ApiResult<()> {
        OwnershipPolicy::require_admin(identity)?;
        if account_id == identity.account_id {
            return Err(ApiError::InvalidState(
                "the administrator account cannot be deleted".to_string(),
            ));
        }
        self.load_account(account_id).await?;

        let owned = self
            .contracts
            .find_contracts(&ContractQuery::scoped(OwnerScope::Owner(account_id)))
            .await?;
        if !owned.is_empty() {
            return Err(ApiError::InvalidState(format!(
                "account still owns {} contract(s)",
                owned.len()
            )));
        }

        self.accounts.delete_batch(&[account_id]).await?;
        info!(%account_id, "account deleted");
        Ok(())
    }

    async fn set_blocked(
        &self,
        identity: &Identity,
        account_id: Uuid,
        blocked: bool,
    ) -> ApiResult<AccountModel> {
        OwnershipPolicy::require_admin(identity)?;
        if account_id == identity.account_id {
            return Err(ApiError::InvalidState(
                "the administrator account cannot be blocked".to_string(),
            ));
        }
        let mut account = self.load_account(account_id).await?;
        account.blocked = blocked;
        let updated = self.accounts.update_batch(vec![account]).await?;
        info!(%account_id, blocked, "account block flag changed");
        updated
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::not_found("Account"))
    }

    async fn load_account(&self, account_id: Uuid) -> ApiResult<AccountModel> {
        self.accounts
            .load_batch(&[account_id])
            .await?
            .into_iter()
            .next()
            .flatten()
            .ok_or_else(|| ApiError::not_found("Account"))
    }

    /// The administrator address is reserved; any other address may belong to one account only.
    async fn ensure_email_available(&self, email: &str, account_id: Uuid) -> ApiResult<()> {
        if is_placeholder_email(email) {
            return Err(ApiError::ValidationError("this email domain is reserved".to_string()));
        }
        let taken_by = self.accounts.find_by_email(email).await?;
        match taken_by {
            Some(other) if other.id != account_id => {
                Err(ApiError::Conflict(format!("email {email} is already in use")))
            }
            None if email == self.identity.admin_email() => {
                Err(ApiError::ValidationError("this email is reserved".to_string()))
            }
            _ => Ok(()),
        }
    }
}
