use async_trait::async_trait;
use credmais_db::models::account::AccountModel;
use credmais_db::repository::create_batch::CreateBatch;
use sqlx::Postgres;
use std::error::Error;

use super::repo_impl::AccountRepositoryImpl;

impl AccountRepositoryImpl {
    pub(super) async fn create_batch_impl(
        repo: &AccountRepositoryImpl,
        items: Vec<AccountModel>,
    ) -> Result<Vec<AccountModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut saved_items = Vec::with_capacity(items.len());
        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        for item in items {
            sqlx::query(
                r#"
                INSERT INTO account (id, name, email, phone, password_hash, blocked, pending_first_access, created_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                "#,
            )
            .bind(item.id)
            .bind(item.name.as_str())
            .bind(item.email.as_ref().map(|s| s.as_str()))
            .bind(item.phone.as_ref().map(|s| s.as_str()))
            .bind(&item.password_hash)
            .bind(item.blocked)
            .bind(item.pending_first_access)
            .bind(item.created_at)
            .execute(&mut **transaction)
            .await?;

            saved_items.push(item);
        }

        Ok(saved_items)
    }
}

#[async_trait]
impl CreateBatch<Postgres, AccountModel> for AccountRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<AccountModel>,
    ) -> Result<Vec<AccountModel>, Box<dyn Error + Send + Sync>> {
        Self::create_batch_impl(self, items).await
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helper::setup_test_context;
    use credmais_db::repository::create_batch::CreateBatch;
    use super::super::test_utils::test_utils::create_test_account;

    #[tokio::test]
    async fn test_create_batch() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let Some(ctx) = setup_test_context().await? else {
            return Ok(());
        };
        let account_repo = &ctx.repos().accounts;

        let mut accounts = Vec::new();
        for i in 0..3 {
            accounts.push(create_test_account(
                &format!("Account {i}"),
                &format!("create-{i}-{}@credmais.test", uuid::Uuid::new_v4().simple()),
            ));
        }

        let saved = account_repo.create_batch(accounts.clone()).await?;
        assert_eq!(saved.len(), 3);
        assert_eq!(saved[0].id, accounts[0].id);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_batch_empty() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let Some(ctx) = setup_test_context().await? else {
            return Ok(());
        };
        let saved = ctx.repos().accounts.create_batch(Vec::new()).await?;
        assert!(saved.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_create_batch_rejects_duplicate_email_in_any_case() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let Some(ctx) = setup_test_context().await? else {
            return Ok(());
        };
        let account_repo = &ctx.repos().accounts;
        let email = format!("dup-{}@credmais.test", uuid::Uuid::new_v4().simple());

        account_repo.create_batch(vec![create_test_account("First", &email)]).await?;
        let second = create_test_account("Second", &email.to_uppercase());
        assert!(account_repo.create_batch(vec![second]).await.is_err());

        Ok(())
    }
}
