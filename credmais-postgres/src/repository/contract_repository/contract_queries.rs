use async_trait::async_trait;
use credmais_db::models::contract::ContractModel;
use credmais_db::repository::contract_queries::ContractQueries;
use credmais_db::repository::contract_query::ContractQuery;
use crate::utils::{like_pattern, TryFromRow};
use rust_decimal::Decimal;
use sqlx::{Postgres, QueryBuilder};
use std::error::Error;

use super::repo_impl::ContractRepositoryImpl;

/// Appends the WHERE clause equivalent to [`ContractQuery::matches`].
fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, query: &ContractQuery) {
    builder.push(" WHERE TRUE");
    if let Some(owner_id) = query.scope.owner_id() {
        builder.push(" AND owner_id = ").push_bind(owner_id);
    }
    if let Some(from) = query.created_from {
        builder.push(" AND created_at >= ").push_bind(from);
    }
    if let Some(to) = query.created_to {
        builder.push(" AND created_at <= ").push_bind(to);
    }
    if let Some(seller_id) = query.seller_id {
        builder.push(" AND seller_id = ").push_bind(seller_id);
    }
    if let Some(status) = query.contract_status {
        builder.push(" AND contract_status = ").push_bind(status);
    }
    if let Some(product) = &query.product_equals {
        builder.push(" AND product = ").push_bind(product.clone());
    }
    if let Some(fragment) = &query.product_contains {
        builder.push(" AND product ILIKE ").push_bind(like_pattern(fragment));
    }
    if let Some(fragment) = &query.client_name_contains {
        builder.push(" AND name ILIKE ").push_bind(like_pattern(fragment));
    }
    if let Some(fragment) = &query.tax_id_contains {
        builder.push(" AND tax_id LIKE ").push_bind(like_pattern(fragment));
    }
}

#[async_trait]
impl ContractQueries<Postgres> for ContractRepositoryImpl {
    async fn find_contracts(
        &self,
        query: &ContractQuery,
    ) -> Result<Vec<ContractModel>, Box<dyn Error + Send + Sync>> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT * FROM contract");
        push_filters(&mut builder, query);
        builder.push(" ORDER BY created_at DESC, id");

        let rows = {
            let mut tx = self.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            builder.build().fetch_all(&mut **transaction).await?
        };

        rows.iter().map(ContractModel::try_from_row).collect()
    }

    async fn sum_amount(
        &self,
        query: &ContractQuery,
    ) -> Result<Decimal, Box<dyn Error + Send + Sync>> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT COALESCE(SUM(amount), 0) FROM contract");
        push_filters(&mut builder, query);

        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
        let total = builder
            .build_query_scalar::<Decimal>()
            .fetch_one(&mut **transaction)
            .await?;

        Ok(total)
    }
}
