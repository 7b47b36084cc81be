use std::sync::Arc;

use credmais_api::{ApiError, ApiResult, Identity, SellerInput};
use credmais_db::repository::{ContractQuery, ContractRepository, OwnerScope, SellerRepository};
use credmais_db::SellerModel;
use sqlx::Database;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::policy::OwnershipPolicy;
use crate::text::{bounded, bounded_opt};

/// Sellers are readable by everyone; edits go through the registering owner.
pub struct SellerService<DB: Database> {
    sellers: Arc<dyn SellerRepository<DB>>,
    contracts: Arc<dyn ContractRepository<DB>>,
}

impl<DB: Database> SellerService<DB> {
    pub fn new(
        sellers: Arc<dyn SellerRepository<DB>>,
        contracts: Arc<dyn ContractRepository<DB>>,
    ) -> Self {
        Self { sellers, contracts }
    }

    pub async fn list(&self) -> ApiResult<Vec<SellerModel>> {
        Ok(self.sellers.list_all().await?)
    }

    pub async fn save(&self, identity: &Identity, input: &SellerInput) -> ApiResult<SellerModel> {
        input.validate()?;
        let name = bounded(&input.name, "Seller name")?;
        let phone = bounded_opt(input.phone.as_deref(), "Phone")?;

        let saved = match input.id {
            Some(seller_id) => {
                let mut seller = self.editable(identity, seller_id).await?;
                seller.name = name;
                seller.phone = phone;
                self.sellers.update_batch(vec![seller]).await?
            }
            None => {
                let seller = SellerModel {
                    id: Uuid::new_v4(),
                    owner_id: Some(identity.account_id),
                    name,
                    phone,
                };
                self.sellers.create_batch(vec![seller]).await?
            }
        };
        let seller = saved
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::not_found("Seller"))?;
        info!(seller_id = %seller.id, "seller saved");
        Ok(seller)
    }

    /// Deletes the seller; contracts keep their stale reference.
    pub async fn delete(&self, identity: &Identity, seller_id: Uuid) -> ApiResult<()> {
        self.editable(identity, seller_id).await?;
        self.sellers.delete_batch(&[seller_id]).await?;
        info!(%seller_id, "seller deleted");
        Ok(())
    }

    /// Gives every ownerless seller the owner of the oldest contract referencing it.
    ///
    /// Returns the number of sellers updated; sellers no contract references stay ownerless.
    pub async fn backfill_seller_owners(&self, identity: &Identity) -> ApiResult<usize> {
        OwnershipPolicy::require_admin(identity)?;

        let mut updated = Vec::new();
        for mut seller in self.sellers.list_all().await? {
            if seller.owner_id.is_some() {
                continue;
            }
            let query = ContractQuery::scoped(OwnerScope::All).with_seller(seller.id);
            let oldest = self.contracts.find_contracts(&query).await?.pop();
            if let Some(contract) = oldest {
                seller.owner_id = Some(contract.owner_id);
                updated.push(seller);
            }
        }

        let count = updated.len();
        if count > 0 {
            self.sellers.update_batch(updated).await?;
        }
        info!(count, "seller owners backfilled");
        Ok(count)
    }

    async fn editable(&self, identity: &Identity, seller_id: Uuid) -> ApiResult<SellerModel> {
        let seller = self
            .sellers
            .load_batch(&[seller_id])
            .await?
            .into_iter()
            .next()
            .flatten();
        OwnershipPolicy::authorize(identity, seller, "Seller")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{contract_model, seller_model, TestEnv};
    use chrono::{Duration, Utc};
    use rust_decimal::Decimal;

    fn input(id: Option<Uuid>, name: &str) -> SellerInput {
        SellerInput {
            id,
            name: name.into(),
            phone: Some("11 99999-0000".into()),
        }
    }

    #[tokio::test]
    async fn test_sellers_are_global_but_edits_are_owned() {
        let env = TestEnv::new();
        let ana = env.user_identity("Ana", "ana@x.com");
        let bia = env.user_identity("Bia", "bia@x.com");
        let sellers = &env.services().sellers;

        let carlos = sellers.save(&ana, &input(None, "Carlos")).await.unwrap();
        assert_eq!(carlos.owner_id, Some(ana.account_id));
        sellers.save(&bia, &input(None, "Bruno")).await.unwrap();

        let names: Vec<String> = sellers
            .list()
            .await
            .unwrap()
            .iter()
            .map(|s| s.name.to_string())
            .collect();
        assert_eq!(names, vec!["Bruno", "Carlos"]);

        assert!(matches!(
            sellers.save(&bia, &input(Some(carlos.id), "Carla")).await,
            Err(ApiError::NotFound(_))
        ));
        assert!(matches!(
            sellers.delete(&bia, carlos.id).await,
            Err(ApiError::NotFound(_))
        ));
        let renamed = sellers.save(&ana, &input(Some(carlos.id), "Carla")).await.unwrap();
        assert_eq!(renamed.name.as_str(), "Carla");
    }

    #[tokio::test]
    async fn test_legacy_seller_is_admin_only() {
        let env = TestEnv::new();
        let ana = env.user_identity("Ana", "ana@x.com");
        let admin = env.admin_identity();
        let legacy = env.store.insert_seller(seller_model(None, "Antigo"));
        let sellers = &env.services().sellers;

        assert!(matches!(
            sellers.delete(&ana, legacy.id).await,
            Err(ApiError::NotFound(_))
        ));
        sellers.delete(&admin, legacy.id).await.unwrap();
        assert!(sellers.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_deleting_seller_keeps_contracts() {
        let env = TestEnv::new();
        let ana = env.user_identity("Ana", "ana@x.com");
        let seller = env.store.insert_seller(seller_model(Some(ana.account_id), "Carlos"));
        let mut contract = contract_model(ana.account_id, "Refin", Decimal::ONE);
        contract.seller_id = Some(seller.id);
        let contract = env.store.insert_contract(contract);

        env.services().sellers.delete(&ana, seller.id).await.unwrap();
        let kept = env.services().contracts.get(&ana, contract.id).await.unwrap();
        assert_eq!(kept.seller_id, Some(seller.id));
    }

    #[tokio::test]
    async fn test_backfill_uses_oldest_referencing_contract() {
        let env = TestEnv::new();
        let admin = env.admin_identity();
        let ana = env.user_identity("Ana", "ana@x.com");
        let bia = env.user_identity("Bia", "bia@x.com");
        let referenced = env.store.insert_seller(seller_model(None, "Carlos"));
        let unreferenced = env.store.insert_seller(seller_model(None, "Sem Vendas"));

        let mut older = contract_model(bia.account_id, "Refin", Decimal::ONE);
        older.seller_id = Some(referenced.id);
        older.created_at = Utc::now() - Duration::days(30);
        let mut newer = contract_model(ana.account_id, "Refin", Decimal::ONE);
        newer.seller_id = Some(referenced.id);
        env.store.insert_contract(older);
        env.store.insert_contract(newer);
        let sellers = &env.services().sellers;

        assert!(matches!(
            sellers.backfill_seller_owners(&ana).await,
            Err(ApiError::Forbidden(_))
        ));
        assert_eq!(sellers.backfill_seller_owners(&admin).await.unwrap(), 1);

        let all = sellers.list().await.unwrap();
        let carlos = all.iter().find(|s| s.id == referenced.id).unwrap();
        assert_eq!(carlos.owner_id, Some(bia.account_id));
        let idle = all.iter().find(|s| s.id == unreferenced.id).unwrap();
        assert_eq!(idle.owner_id, None);
        assert_eq!(sellers.backfill_seller_owners(&admin).await.unwrap(), 0);
    }
}
