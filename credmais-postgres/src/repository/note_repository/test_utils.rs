#[cfg(test)]
pub mod test_utils {
    use chrono::{DurationRound, TimeDelta, Utc};
    use credmais_db::models::note::NoteModel;
    use heapless::String as HeaplessString;
    use uuid::Uuid;

    pub fn create_test_note(owner_id: Uuid, title: &str) -> NoteModel {
        NoteModel {
            id: Uuid::new_v4(),
            owner_id,
            title: HeaplessString::try_from(title).unwrap(),
            text: "Ligar para o cliente na segunda".to_string(),
            created_at: Utc::now().duration_trunc(TimeDelta::microseconds(1)).unwrap(),
        }
    }
}
