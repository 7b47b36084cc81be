use async_trait::async_trait;
use credmais_db::models::account::AccountModel;
use credmais_db::repository::account_queries::AccountQueries;
use crate::utils::TryFromRow;
use sqlx::Postgres;
use std::error::Error;

use super::repo_impl::AccountRepositoryImpl;

impl AccountRepositoryImpl {
    async fn fetch_accounts(
        &self,
        query: &str,
        bind: Option<&str>,
    ) -> Result<Vec<AccountModel>, Box<dyn Error + Send + Sync>> {
        let rows = {
            let mut tx = self.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            let mut statement = sqlx::query(query);
            if let Some(value) = bind {
                statement = statement.bind(value);
            }
            statement.fetch_all(&mut **transaction).await?
        };

        rows.iter().map(AccountModel::try_from_row).collect()
    }
}

#[async_trait]
impl AccountQueries<Postgres> for AccountRepositoryImpl {
    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<AccountModel>, Box<dyn Error + Send + Sync>> {
        let normalized = email.trim().to_lowercase();
        let mut found = self
            .fetch_accounts(
                r#"SELECT * FROM account WHERE LOWER(email) = $1"#,
                Some(normalized.as_str()),
            )
            .await?;
        Ok(found.pop())
    }

    async fn find_pending_by_name(
        &self,
        name: &str,
    ) -> Result<Vec<AccountModel>, Box<dyn Error + Send + Sync>> {
        self.fetch_accounts(
            r#"SELECT * FROM account WHERE pending_first_access AND name = $1 ORDER BY created_at"#,
            Some(name),
        )
        .await
    }

    async fn list_all(&self) -> Result<Vec<AccountModel>, Box<dyn Error + Send + Sync>> {
        self.fetch_accounts(r#"SELECT * FROM account ORDER BY name, created_at"#, None)
            .await
    }
}
