use async_trait::async_trait;
use credmais_db::models::account::AccountModel;
use credmais_db::repository::update_batch::UpdateBatch;
use sqlx::Postgres;
use std::error::Error;

use super::repo_impl::AccountRepositoryImpl;

impl AccountRepositoryImpl {
    pub(super) async fn update_batch_impl(
        &self,
        items: Vec<AccountModel>,
    ) -> Result<Vec<AccountModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        for item in &items {
            let result = sqlx::query(
                r#"
                UPDATE account SET
                    name = $2,
                    email = $3,
                    phone = $4,
                    password_hash = $5,
                    blocked = $6,
                    pending_first_access = $7
                WHERE id = $1
                "#,
            )
            .bind(item.id)
            .bind(item.name.as_str())
            .bind(item.email.as_ref().map(|s| s.as_str()))
            .bind(item.phone.as_ref().map(|s| s.as_str()))
            .bind(&item.password_hash)
            .bind(item.blocked)
            .bind(item.pending_first_access)
            .execute(&mut **transaction)
            .await?;

            if result.rows_affected() == 0 {
                return Err(format!("Account {} not found", item.id).into());
            }
        }

        Ok(items)
    }
}

#[async_trait]
impl UpdateBatch<Postgres, AccountModel> for AccountRepositoryImpl {
    async fn update_batch(
        &self,
        items: Vec<AccountModel>,
    ) -> Result<Vec<AccountModel>, Box<dyn Error + Send + Sync>> {
        self.update_batch_impl(items).await
    }
}
