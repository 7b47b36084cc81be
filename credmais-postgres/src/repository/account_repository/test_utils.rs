#[cfg(test)]
pub mod test_utils {
    use chrono::{DurationRound, TimeDelta, Utc};
    use credmais_db::models::account::AccountModel;
    use heapless::String as HeaplessString;
    use uuid::Uuid;

    pub fn create_test_account(name: &str, email: &str) -> AccountModel {
        AccountModel {
            id: Uuid::new_v4(),
            name: HeaplessString::try_from(name).unwrap(),
            email: Some(HeaplessString::try_from(email).unwrap()),
            phone: None,
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$aGFzaA".to_string(),
            blocked: false,
            pending_first_access: false,
            // Postgres keeps microseconds
            created_at: Utc::now().duration_trunc(TimeDelta::microseconds(1)).unwrap(),
        }
    }

    pub fn create_test_placeholder(name: &str) -> AccountModel {
        let mut account = create_test_account(
            name,
            &format!("pending-{}@placeholder.invalid", Uuid::new_v4().simple()),
        );
        account.pending_first_access = true;
        account
    }
}
