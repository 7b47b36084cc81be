#[cfg(test)]
pub mod test_utils {
    use chrono::{DurationRound, TimeDelta, Utc};
    use credmais_db::models::contract::ContractModel;
    use credmais_db::models::evidence::EvidenceModel;
    use credmais_db::repository::CreateBatch;
    use heapless::String as HeaplessString;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    use crate::repository::account_repository::test_utils::test_utils::create_test_placeholder;
    use crate::repository::contract_repository::test_utils::test_utils::create_test_contract;
    use crate::test_helper::TestContext;

    pub fn create_test_evidence(contract_id: Uuid, stored_file_name: &str) -> EvidenceModel {
        EvidenceModel {
            id: Uuid::new_v4(),
            contract_id,
            stored_file_name: HeaplessString::try_from(stored_file_name).unwrap(),
            created_at: Utc::now().duration_trunc(TimeDelta::microseconds(1)).unwrap(),
        }
    }

    pub fn unique_file_name() -> String {
        format!("12345678900_{}.pdf", Uuid::new_v4().simple())
    }

    /// Creates an owner account and one contract to hang evidence off
    pub async fn create_parent_contract(
        ctx: &TestContext,
    ) -> Result<ContractModel, Box<dyn std::error::Error + Send + Sync>> {
        let owner = create_test_placeholder("Evidence Owner");
        ctx.repos().accounts.create_batch(vec![owner.clone()]).await?;
        let contract = create_test_contract(owner.id, Some("FGTS"), Decimal::new(30000, 2));
        ctx.repos().contracts.create_batch(vec![contract.clone()]).await?;
        Ok(contract)
    }
}
