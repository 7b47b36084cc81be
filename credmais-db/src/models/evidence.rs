use chrono::{DateTime, Utc};
use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::identifiable::Identifiable;
use crate::models::text_limits::STORED_FILE_NAME_CAPACITY;

/// # Documentation
/// Supporting file attached to a contract.
///
/// The blob lives in the flat evidence store under `stored_file_name`; the row exists
/// only while the file does. Access is authorised through the owning contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvidenceModel {
    pub id: Uuid,

    pub contract_id: Uuid,

    pub stored_file_name: HeaplessString<STORED_FILE_NAME_CAPACITY>,

    pub created_at: DateTime<Utc>,
}

impl Identifiable for EvidenceModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}
