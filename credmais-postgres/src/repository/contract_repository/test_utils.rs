#[cfg(test)]
pub mod test_utils {
    use chrono::{DateTime, DurationRound, TimeDelta, Utc};
    use credmais_db::models::common_enums::{CommissionStatus, ContractStatus, FormalizationStatus};
    use credmais_db::models::contract::ContractModel;
    use heapless::String as HeaplessString;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    pub fn create_test_contract(owner_id: Uuid, product: Option<&str>, amount: Decimal) -> ContractModel {
        ContractModel {
            id: Uuid::new_v4(),
            owner_id,
            name: HeaplessString::try_from("Maria Souza").unwrap(),
            tax_id: HeaplessString::try_from("123.456.789-00").unwrap(),
            phone: None,
            product: product.map(|p| HeaplessString::try_from(p).unwrap()),
            amount,
            seller_id: None,
            contract_status: ContractStatus::Open,
            commission_status: CommissionStatus::ToPay,
            formalization_status: FormalizationStatus::NotFormalized,
            created_at: Utc::now().duration_trunc(TimeDelta::microseconds(1)).unwrap(),
        }
    }

    pub fn created_at(mut contract: ContractModel, at: DateTime<Utc>) -> ContractModel {
        contract.created_at = at;
        contract
    }
}
