use std::sync::Arc;

use credmais_api::{ApiError, ApiResult, Identity};
use credmais_db::repository::AccountRepository;
use credmais_db::AccountModel;
use sqlx::Database;
use tracing::debug;

use crate::session::{SessionState, SessionStore};

/// Resolves the acting identity of a request from its session.
///
/// The administrator address is injected once, already normalised; nothing else decides
/// administrative rights.
pub struct IdentityContext<DB: Database> {
    admin_email: String,
    accounts: Arc<dyn AccountRepository<DB>>,
    sessions: Arc<dyn SessionStore>,
}

impl<DB: Database> IdentityContext<DB> {
    pub fn new(
        admin_email: &str,
        accounts: Arc<dyn AccountRepository<DB>>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            admin_email: normalize_email(admin_email),
            accounts,
            sessions,
        }
    }

    pub fn admin_email(&self) -> &str {
        &self.admin_email
    }

    pub fn is_admin_account(&self, account: &AccountModel) -> bool {
        account
            .email_str()
            .is_some_and(|email| normalize_email(email) == self.admin_email)
    }

    /// Resolves `(account, is_admin)` for the session token.
    ///
    /// A session pointing at a deleted or blocked account is dropped and reported as
    /// `Unauthenticated`.
    pub async fn resolve(&self, token: &str) -> ApiResult<Identity> {
        let account_id = self
            .sessions
            .load(token)
            .await
            .and_then(|state| state.account_id)
            .ok_or(ApiError::Unauthenticated)?;

        let account = self
            .accounts
            .load_batch(&[account_id])
            .await?
            .into_iter()
            .next()
            .flatten();

        match account {
            Some(account) if !account.blocked && !account.pending_first_access => Ok(Identity::new(
                account.id,
                account.name.as_str(),
                self.is_admin_account(&account),
            )),
            _ => {
                debug!(%account_id, "dropping session of an account that can no longer log in");
                self.sessions.store(token, SessionState::default()).await;
                Err(ApiError::Unauthenticated)
            }
        }
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
