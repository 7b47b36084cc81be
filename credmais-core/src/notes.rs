use std::sync::Arc;

use chrono::Utc;
use credmais_api::{ApiError, ApiResult, Identity, NoteInput};
use credmais_db::repository::NoteRepository;
use credmais_db::NoteModel;
use sqlx::Database;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::policy::OwnershipPolicy;
use crate::text::bounded;

pub struct NoteService<DB: Database> {
    notes: Arc<dyn NoteRepository<DB>>,
}

impl<DB: Database> NoteService<DB> {
    pub fn new(notes: Arc<dyn NoteRepository<DB>>) -> Self {
        Self { notes }
    }

    pub async fn list(&self, identity: &Identity) -> ApiResult<Vec<NoteModel>> {
        Ok(self
            .notes
            .find_by_scope(OwnershipPolicy::scope(identity))
            .await?)
    }

    pub async fn get(&self, identity: &Identity, note_id: Uuid) -> ApiResult<NoteModel> {
        let note = self
            .notes
            .load_batch(&[note_id])
            .await?
            .into_iter()
            .next()
            .flatten();
        OwnershipPolicy::authorize(identity, note, "Note")
    }

    pub async fn save(&self, identity: &Identity, input: &NoteInput) -> ApiResult<NoteModel> {
        input.validate()?;
        let title = bounded(&input.title, "Title")?;

        let saved = match input.id {
            Some(note_id) => {
                let mut note = self.get(identity, note_id).await?;
                note.title = title;
                note.text = input.text.clone();
                self.notes.update_batch(vec![note]).await?
            }
            None => {
                let note = NoteModel {
                    id: Uuid::new_v4(),
                    owner_id: identity.account_id,
                    title,
                    text: input.text.clone(),
                    created_at: Utc::now(),
                };
                self.notes.create_batch(vec![note]).await?
            }
        };
        saved
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::not_found("Note"))
    }

    pub async fn delete(&self, identity: &Identity, note_id: Uuid) -> ApiResult<()> {
        self.get(identity, note_id).await?;
        self.notes.delete_batch(&[note_id]).await?;
        info!(%note_id, "note deleted");
        Ok(())
    }
}
