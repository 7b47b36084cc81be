use async_trait::async_trait;
use credmais_api::LastReportQuery;
use moka::future::Cache;
use uuid::Uuid;

use crate::config::CoreConfig;

/// Per-caller state kept between requests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    /// Logged-in account; `None` until a successful login
    pub account_id: Option<Uuid>,
    pub display_name: Option<String>,
    /// Provisioning marker set by a successful first-access validation
    pub first_access_account_id: Option<Uuid>,
    pub last_report: Option<LastReportQuery>,
}

/// Storage of session state keyed by an opaque token issued by the hosting layer.
///
/// Expiry is the store's responsibility.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self, token: &str) -> Option<SessionState>;

    async fn store(&self, token: &str, state: SessionState);

    async fn remove(&self, token: &str);
}

/// In-process session store with idle expiry.
pub struct MokaSessionStore {
    cache: Cache<String, SessionState>,
}

impl MokaSessionStore {
    pub fn new(config: &CoreConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.session_max_entries)
            .time_to_idle(config.session_idle)
            .build();
        Self { cache }
    }
}

#[async_trait]
impl SessionStore for MokaSessionStore {
    async fn load(&self, token: &str) -> Option<SessionState> {
        self.cache.get(token).await
    }

    async fn store(&self, token: &str, state: SessionState) {
        self.cache.insert(token.to_string(), state).await;
    }

    async fn remove(&self, token: &str) {
        self.cache.invalidate(token).await;
    }
}

/// Issues a fresh, unguessable session token.
pub fn new_session_token() -> String {
    Uuid::new_v4().simple().to_string()
}
