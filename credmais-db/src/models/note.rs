use chrono::{DateTime, Utc};
use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::identifiable::Identifiable;
use crate::models::text_limits::TITLE_CAPACITY;
use crate::models::owned::Owned;

/// Free-form note kept by an account, unrelated to contracts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteModel {
    pub id: Uuid,

    pub owner_id: Uuid,

    pub title: HeaplessString<TITLE_CAPACITY>,

    pub text: String,

    pub created_at: DateTime<Utc>,
}

impl Identifiable for NoteModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

impl Owned for NoteModel {
    fn get_owner_id(&self) -> Option<Uuid> {
        Some(self.owner_id)
    }
}
