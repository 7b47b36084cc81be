use std::str::FromStr;
use std::sync::Arc;

use chrono::Utc;
use credmais_api::{parse_amount, ApiError, ApiResult, ContractInput, Identity};
use credmais_db::repository::{ContractQuery, ContractRepository, SellerRepository};
use credmais_db::{CommissionStatus, ContractModel, ContractStatus, FormalizationStatus};
use sqlx::Database;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::evidence::EvidenceService;
use crate::policy::OwnershipPolicy;
use crate::text::{bounded, bounded_opt};

/// Status fields to change; `None` leaves a field as it is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusChange {
    pub contract_status: Option<ContractStatus>,
    pub commission_status: Option<CommissionStatus>,
    pub formalization_status: Option<FormalizationStatus>,
}

impl StatusChange {
    /// Reads the three status fields of the edit form; blank fields are left unchanged.
    pub fn from_form(
        contract_status: Option<&str>,
        commission_status: Option<&str>,
        formalization_status: Option<&str>,
    ) -> ApiResult<Self> {
        Ok(Self {
            contract_status: parse_status(contract_status, "contract status")?,
            commission_status: parse_status(commission_status, "commission status")?,
            formalization_status: parse_status(formalization_status, "formalization status")?,
        })
    }
}

fn parse_status<S: FromStr>(raw: Option<&str>, field: &str) -> ApiResult<Option<S>> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(value) => S::from_str(value)
            .map(Some)
            .map_err(|_| ApiError::ValidationError(format!("Unknown {field} {value:?}"))),
    }
}

pub struct ContractService<DB: Database> {
    contracts: Arc<dyn ContractRepository<DB>>,
    sellers: Arc<dyn SellerRepository<DB>>,
    evidence: Arc<EvidenceService<DB>>,
}

impl<DB: Database> ContractService<DB> {
    pub fn new(
        contracts: Arc<dyn ContractRepository<DB>>,
        sellers: Arc<dyn SellerRepository<DB>>,
        evidence: Arc<EvidenceService<DB>>,
    ) -> Self {
        Self {
            contracts,
            sellers,
            evidence,
        }
    }

    /// Contracts visible to `identity`, newest first.
    pub async fn list(&self, identity: &Identity) -> ApiResult<Vec<ContractModel>> {
        let query = ContractQuery::scoped(OwnershipPolicy::scope(identity));
        Ok(self.contracts.find_contracts(&query).await?)
    }

    pub async fn search_by_tax_id(
        &self,
        identity: &Identity,
        fragment: &str,
    ) -> ApiResult<Vec<ContractModel>> {
        let query = ContractQuery::scoped(OwnershipPolicy::scope(identity))
            .with_tax_id_containing(fragment.trim());
        Ok(self.contracts.find_contracts(&query).await?)
    }

    pub async fn get(&self, identity: &Identity, contract_id: Uuid) -> ApiResult<ContractModel> {
        let contract = self
            .contracts
            .load_batch(&[contract_id])
            .await?
            .into_iter()
            .next()
            .flatten();
        OwnershipPolicy::authorize(identity, contract, "Contract")
    }

    /// Creates the contract when `input.id` is empty, updates it otherwise.
    ///
    /// Updates keep owner, statuses and creation time.
    pub async fn save(&self, identity: &Identity, input: &ContractInput) -> ApiResult<ContractModel> {
        input.validate()?;
        let amount = parse_amount(&input.amount)?;
        if let Some(seller_id) = input.seller_id {
            let exists = self
                .sellers
                .exist_by_ids(&[seller_id])
                .await?
                .into_iter()
                .any(|(_, exists)| exists);
            if !exists {
                return Err(ApiError::ValidationError("Seller does not exist".to_string()));
            }
        }

        let name = bounded(&input.name, "Client name")?;
        let tax_id = bounded(&input.tax_id, "Tax id")?;
        let phone = bounded_opt(input.phone.as_deref(), "Phone")?;
        let product = bounded_opt(input.product.as_deref(), "Product")?;

        match input.id {
            Some(contract_id) => {
                let mut contract = self.get(identity, contract_id).await?;
                contract.name = name;
                contract.tax_id = tax_id;
                contract.phone = phone;
                contract.product = product;
                contract.amount = amount;
                contract.seller_id = input.seller_id;
                let updated = self.contracts.update_batch(vec![contract]).await?;
                info!(%contract_id, "contract updated");
                updated
                    .into_iter()
                    .next()
                    .ok_or_else(|| ApiError::not_found("Contract"))
            }
            None => {
                let contract = ContractModel {
                    id: Uuid::new_v4(),
                    owner_id: identity.account_id,
                    name,
                    tax_id,
                    phone,
                    product,
                    amount,
                    seller_id: input.seller_id,
                    contract_status: ContractStatus::Open,
                    commission_status: CommissionStatus::ToPay,
                    formalization_status: FormalizationStatus::NotFormalized,
                    created_at: Utc::now(),
                };
                let created = self.contracts.create_batch(vec![contract]).await?;
                let contract = created
                    .into_iter()
                    .next()
                    .ok_or_else(|| ApiError::InternalError("contract was not created".to_string()))?;
                info!(contract_id = %contract.id, owner_id = %contract.owner_id, "contract created");
                Ok(contract)
            }
        }
    }

    pub async fn update_status(
        &self,
        identity: &Identity,
        contract_id: Uuid,
        change: StatusChange,
    ) -> ApiResult<ContractModel> {
        let mut contract = self.get(identity, contract_id).await?;
        if let Some(status) = change.contract_status {
            contract.contract_status = status;
        }
        if let Some(status) = change.commission_status {
            contract.commission_status = status;
        }
        if let Some(status) = change.formalization_status {
            contract.formalization_status = status;
        }
        let updated = self.contracts.update_batch(vec![contract]).await?;
        info!(%contract_id, ?change, "contract status updated");
        updated
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::not_found("Contract"))
    }

    /// Deletes the contract together with its evidence files.
    pub async fn delete(&self, identity: &Identity, contract_id: Uuid) -> ApiResult<()> {
        self.evidence
            .cascade_on_contract_delete(identity, contract_id)
            .await
            .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evidence::UploadedFile;
    use crate::test_support::{contract_model, seller_model, TestEnv};
    use rust_decimal::Decimal;

    fn input(name: &str, tax_id: &str, amount: &str) -> ContractInput {
        ContractInput {
            name: name.into(),
            tax_id: tax_id.into(),
            product: Some("Refin".into()),
            amount: amount.into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_applies_defaults() {
        let env = TestEnv::new();
        let user = env.user_identity("Ana", "ana@x.com");
        let contract = env
            .services()
            .contracts
            .save(&user, &input("José", "111.222.333-44", ""))
            .await
            .unwrap();

        assert_eq!(contract.owner_id, user.account_id);
        assert_eq!(contract.amount, Decimal::ZERO);
        assert_eq!(contract.contract_status, ContractStatus::Open);
        assert_eq!(contract.commission_status, CommissionStatus::ToPay);
        assert_eq!(contract.formalization_status, FormalizationStatus::NotFormalized);
    }

    #[tokio::test]
    async fn test_invalid_amount_writes_nothing() {
        let env = TestEnv::new();
        let user = env.user_identity("Ana", "ana@x.com");
        let contracts = &env.services().contracts;
        let created = contracts
            .save(&user, &input("José", "111", "1.500,00"))
            .await
            .unwrap();
        assert_eq!(created.amount, Decimal::new(150000, 2));

        let bad = ContractInput {
            id: Some(created.id),
            name: "Outro Nome".into(),
            ..input("José", "111", "mil reais")
        };
        assert!(matches!(
            contracts.save(&user, &bad).await,
            Err(ApiError::ValidationError(_))
        ));
        let stored = contracts.get(&user, created.id).await.unwrap();
        assert_eq!(stored.name.as_str(), "José");
        assert_eq!(stored.amount, Decimal::new(150000, 2));
    }

    #[tokio::test]
    async fn test_accented_name_within_limit_is_accepted() {
        let env = TestEnv::new();
        let user = env.user_identity("Ana", "ana@x.com");
        let name = "ã".repeat(80);
        let contract = env
            .services()
            .contracts
            .save(&user, &input(&name, "111", "10"))
            .await
            .unwrap();
        assert_eq!(contract.name.as_str(), name);
    }

    #[tokio::test]
    async fn test_amount_beyond_stored_precision_writes_nothing() {
        let env = TestEnv::new();
        let user = env.user_identity("Ana", "ana@x.com");
        let contracts = &env.services().contracts;

        for amount in ["1000000000000", "1.005"] {
            assert!(matches!(
                contracts.save(&user, &input("José", "111", amount)).await,
                Err(ApiError::ValidationError(_))
            ));
        }
        assert!(contracts.list(&user).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_seller_is_rejected() {
        let env = TestEnv::new();
        let user = env.user_identity("Ana", "ana@x.com");
        let seller = env.store.insert_seller(seller_model(None, "Carlos"));
        let contracts = &env.services().contracts;

        let with_unknown = ContractInput {
            seller_id: Some(Uuid::new_v4()),
            ..input("José", "111", "10")
        };
        assert!(matches!(
            contracts.save(&user, &with_unknown).await,
            Err(ApiError::ValidationError(_))
        ));
        let with_known = ContractInput {
            seller_id: Some(seller.id),
            ..input("José", "111", "10")
        };
        assert_eq!(
            contracts.save(&user, &with_known).await.unwrap().seller_id,
            Some(seller.id)
        );
    }

    #[tokio::test]
    async fn test_other_owners_contracts_are_invisible() {
        let env = TestEnv::new();
        let ana = env.user_identity("Ana", "ana@x.com");
        let bia = env.user_identity("Bia", "bia@x.com");
        let admin = env.admin_identity();
        let mut theirs = contract_model(bia.account_id, "Refin", Decimal::ONE);
        theirs.tax_id = "999.888.777-66".try_into().unwrap();
        let theirs = env.store.insert_contract(theirs);
        env.store
            .insert_contract(contract_model(ana.account_id, "Refin", Decimal::ONE));
        let contracts = &env.services().contracts;

        assert!(contracts.list(&ana).await.unwrap().iter().all(|c| c.owner_id == ana.account_id));
        assert!(contracts.search_by_tax_id(&ana, "999").await.unwrap().is_empty());
        assert!(matches!(
            contracts.get(&ana, theirs.id).await,
            Err(ApiError::NotFound(_))
        ));
        assert!(matches!(
            contracts
                .update_status(&ana, theirs.id, StatusChange::default())
                .await,
            Err(ApiError::NotFound(_))
        ));
        assert!(matches!(
            contracts.delete(&ana, theirs.id).await,
            Err(ApiError::NotFound(_))
        ));
        let edit = ContractInput {
            id: Some(theirs.id),
            ..input("Hack", "1", "1")
        };
        assert!(matches!(
            contracts.save(&ana, &edit).await,
            Err(ApiError::NotFound(_))
        ));

        assert_eq!(contracts.list(&admin).await.unwrap().len(), 2);
        assert_eq!(contracts.search_by_tax_id(&bia, "999").await.unwrap().len(), 1);
        assert!(contracts.get(&admin, theirs.id).await.is_ok());
    }

    #[tokio::test]
    async fn test_status_fields_move_freely() {
        let env = TestEnv::new();
        let user = env.user_identity("Ana", "ana@x.com");
        let contract = env
            .store
            .insert_contract(contract_model(user.account_id, "Refin", Decimal::ONE));
        let contracts = &env.services().contracts;

        let paid = contracts
            .update_status(
                &user,
                contract.id,
                StatusChange {
                    contract_status: Some(ContractStatus::Paid),
                    commission_status: Some(CommissionStatus::Paid),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(paid.contract_status, ContractStatus::Paid);
        assert_eq!(paid.formalization_status, FormalizationStatus::NotFormalized);

        let back = contracts
            .update_status(
                &user,
                contract.id,
                StatusChange {
                    contract_status: Some(ContractStatus::Open),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(back.contract_status, ContractStatus::Open);
        assert_eq!(back.commission_status, CommissionStatus::Paid);
    }

    #[test]
    fn test_status_change_from_form() {
        let change = StatusChange::from_form(Some("UnderReview"), Some("  "), Some("Formalized"))
            .unwrap();
        assert_eq!(
            change,
            StatusChange {
                contract_status: Some(ContractStatus::UnderReview),
                commission_status: None,
                formalization_status: Some(FormalizationStatus::Formalized),
            }
        );
        assert_eq!(StatusChange::from_form(None, None, None).unwrap(), StatusChange::default());

        let err = StatusChange::from_form(None, Some("Pending"), None).unwrap_err();
        assert!(matches!(err, ApiError::ValidationError(msg) if msg.contains("commission status")));
    }

    #[tokio::test]
    async fn test_status_from_form_is_applied() {
        let env = TestEnv::new();
        let user = env.user_identity("Ana", "ana@x.com");
        let contract = env
            .store
            .insert_contract(contract_model(user.account_id, "Refin", Decimal::ONE));
        let change = StatusChange::from_form(Some("Cancelled"), Some("Cancelled"), None).unwrap();

        let updated = env
            .services()
            .contracts
            .update_status(&user, contract.id, change)
            .await
            .unwrap();
        assert_eq!(updated.contract_status, ContractStatus::Cancelled);
        assert_eq!(updated.commission_status, CommissionStatus::Cancelled);
        assert_eq!(updated.formalization_status, FormalizationStatus::NotFormalized);
    }

    #[tokio::test]
    async fn test_delete_cascades_to_evidence() {
        let env = TestEnv::new();
        let user = env.user_identity("Ana", "ana@x.com");
        let contract = env
            .store
            .insert_contract(contract_model(user.account_id, "Refin", Decimal::ONE));
        let services = env.services();
        services
            .evidence
            .attach(&user, contract.id, vec![UploadedFile::new("a.pdf", b"x".to_vec())])
            .await
            .unwrap();
        let row = services
            .evidence
            .list_for_contract(&user, contract.id)
            .await
            .unwrap()
            .remove(0);

        services.contracts.delete(&user, contract.id).await.unwrap();
        assert!(!env.files.exists(&row.stored_file_name).await.unwrap());
        assert!(matches!(
            services.contracts.get(&user, contract.id).await,
            Err(ApiError::NotFound(_))
        ));
    }
}
