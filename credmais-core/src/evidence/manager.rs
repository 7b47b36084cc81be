use std::sync::Arc;

use chrono::{DateTime, Utc};
use credmais_api::{ApiError, ApiResult, Identity};
use credmais_db::repository::{ContractRepository, EvidenceRepository};
use credmais_db::{ContractModel, EvidenceModel, STORED_FILE_NAME_CAPACITY};
use heapless::String as HeaplessString;
use sqlx::Database;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::evidence::file_store::FileStore;
use crate::policy::OwnershipPolicy;

pub const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "png", "jpg", "jpeg"];

/// One uploaded file as received from the client.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }
}

pub fn is_allowed_file(file_name: &str) -> bool {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .is_some_and(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
}

/// Reduces a file name to ASCII letters, digits, `.`, `_` and `-`.
///
/// Whitespace and path separators become `_`; leading and trailing dots or underscores
/// are stripped, so the result never names a parent directory.
pub fn secure_file_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
            out.push(c);
        } else if c.is_whitespace() || c == '/' || c == '\\' {
            if !out.ends_with('_') {
                out.push('_');
            }
        }
    }
    out.trim_matches(|c| c == '.' || c == '_').to_string()
}

/// Stored name: tax id, upload instant and position in the batch, then the client's name.
///
/// Long names are cut down to the stored column width, keeping the extension.
pub fn evidence_file_name(
    tax_id: &str,
    uploaded_at: DateTime<Utc>,
    index: usize,
    original: &str,
) -> String {
    let name = secure_file_name(&format!(
        "{}_{}_{}_{}",
        tax_id,
        uploaded_at.format("%Y%m%d%H%M%S%3f"),
        index,
        original
    ));
    fit_file_name(name, STORED_FILE_NAME_CAPACITY)
}

/// Shortens a sanitized (ASCII) name to `max` bytes.
fn fit_file_name(mut name: String, max: usize) -> String {
    if name.len() <= max {
        return name;
    }
    let extension = match name.rfind('.') {
        Some(dot) if name.len() - dot < max => name.split_off(dot),
        _ => String::new(),
    };
    name.truncate(max - extension.len());
    let stem = name.trim_end_matches(['.', '_']);
    format!("{stem}{extension}")
}

/// Keeps evidence rows and their backing files consistent.
pub struct EvidenceService<DB: Database> {
    contracts: Arc<dyn ContractRepository<DB>>,
    evidence: Arc<dyn EvidenceRepository<DB>>,
    files: Arc<dyn FileStore>,
    max_upload_bytes: u64,
}

impl<DB: Database> EvidenceService<DB> {
    pub fn new(
        contracts: Arc<dyn ContractRepository<DB>>,
        evidence: Arc<dyn EvidenceRepository<DB>>,
        files: Arc<dyn FileStore>,
        max_upload_bytes: u64,
    ) -> Self {
        Self {
            contracts,
            evidence,
            files,
            max_upload_bytes,
        }
    }

    /// Stores the acceptable files of one upload and returns how many were stored.
    ///
    /// Files with a disallowed extension are skipped. The size ceiling applies to the whole
    /// request and every stored name is settled before anything is written. A failure part
    /// way through removes the files and rows this call already created.
    pub async fn attach(
        &self,
        identity: &Identity,
        contract_id: Uuid,
        files: Vec<UploadedFile>,
    ) -> ApiResult<usize> {
        let actual: u64 = files.iter().map(|f| f.bytes.len() as u64).sum();
        if actual > self.max_upload_bytes {
            return Err(ApiError::PayloadTooLarge {
                limit: self.max_upload_bytes,
                actual,
            });
        }
        let contract = self.authorized_contract(identity, contract_id).await?;

        let uploaded_at = Utc::now();
        let mut pending = Vec::with_capacity(files.len());
        for (index, file) in files.into_iter().enumerate() {
            if !is_allowed_file(&file.file_name) {
                debug!(%contract_id, file_name = %file.file_name, "skipping disallowed file");
                continue;
            }
            let name = evidence_file_name(&contract.tax_id, uploaded_at, index, &file.file_name);
            let stored_file_name = HeaplessString::<STORED_FILE_NAME_CAPACITY>::try_from(
                name.as_str(),
            )
            .map_err(|_| ApiError::InternalError(format!("stored file name {name:?} is too long")))?;
            let row = EvidenceModel {
                id: Uuid::new_v4(),
                contract_id,
                stored_file_name,
                created_at: uploaded_at,
            };
            pending.push((row, file.bytes));
        }
        if pending.is_empty() {
            return Err(ApiError::NoValidFiles);
        }

        let mut written: Vec<EvidenceModel> = Vec::with_capacity(pending.len());
        for (row, bytes) in pending {
            if let Err(err) = self.store_one(&row, &bytes).await {
                warn!(%contract_id, error = %err, "evidence upload failed, rolling back");
                self.discard(&written).await;
                return Err(err);
            }
            written.push(row);
        }

        info!(%contract_id, stored = written.len(), "evidence attached");
        Ok(written.len())
    }

    async fn store_one(&self, row: &EvidenceModel, bytes: &[u8]) -> ApiResult<()> {
        self.files.save(row.stored_file_name.as_str(), bytes).await?;
        if let Err(err) = self.evidence.create_batch(vec![row.clone()]).await {
            self.discard_file(row.stored_file_name.as_str()).await;
            return Err(err.into());
        }
        Ok(())
    }

    /// Best effort; the triggering error is what the caller reports.
    async fn discard(&self, written: &[EvidenceModel]) {
        if written.is_empty() {
            return;
        }
        let ids: Vec<Uuid> = written.iter().map(|e| e.id).collect();
        if let Err(err) = self.evidence.delete_batch(&ids).await {
            warn!(error = %err, "could not remove evidence rows of a failed upload");
        }
        for row in written {
            self.discard_file(row.stored_file_name.as_str()).await;
        }
    }

    async fn discard_file(&self, name: &str) {
        if let Err(err) = self.files.remove(name).await {
            warn!(file = %name, error = %err, "could not remove evidence file of a failed upload");
        }
    }

    /// Removes one evidence file and its row; returns the owning contract id.
    pub async fn detach(&self, identity: &Identity, evidence_id: Uuid) -> ApiResult<Uuid> {
        let evidence = self
            .evidence
            .load_batch(&[evidence_id])
            .await?
            .into_iter()
            .next()
            .flatten()
            .ok_or_else(|| ApiError::not_found("Evidence"))?;
        self.authorized_contract(identity, evidence.contract_id).await?;

        self.remove_file(&evidence).await?;
        self.evidence.delete_batch(&[evidence.id]).await?;
        info!(%evidence_id, contract_id = %evidence.contract_id, "evidence detached");
        Ok(evidence.contract_id)
    }

    pub async fn download(
        &self,
        identity: &Identity,
        stored_file_name: &str,
    ) -> ApiResult<(EvidenceModel, Vec<u8>)> {
        let evidence = self
            .evidence
            .find_by_stored_file_name(stored_file_name)
            .await?
            .ok_or_else(|| ApiError::not_found("Evidence"))?;
        self.authorized_contract(identity, evidence.contract_id).await?;

        let bytes = self.files.read(&evidence.stored_file_name).await?;
        Ok((evidence, bytes))
    }

    pub async fn list_for_contract(
        &self,
        identity: &Identity,
        contract_id: Uuid,
    ) -> ApiResult<Vec<EvidenceModel>> {
        self.authorized_contract(identity, contract_id).await?;
        Ok(self.evidence.find_by_contract_id(contract_id).await?)
    }

    /// Deletes every evidence file and row of the contract, then the contract itself.
    pub async fn cascade_on_contract_delete(
        &self,
        identity: &Identity,
        contract_id: Uuid,
    ) -> ApiResult<usize> {
        self.authorized_contract(identity, contract_id).await?;

        let attached = self.evidence.find_by_contract_id(contract_id).await?;
        for evidence in &attached {
            self.remove_file(evidence).await?;
        }
        let ids: Vec<Uuid> = attached.iter().map(|e| e.id).collect();
        if !ids.is_empty() {
            self.evidence.delete_batch(&ids).await?;
        }
        self.contracts.delete_batch(&[contract_id]).await?;
        info!(%contract_id, evidence = ids.len(), "contract deleted");
        Ok(ids.len())
    }

    async fn remove_file(&self, evidence: &EvidenceModel) -> ApiResult<()> {
        if !self.files.remove(&evidence.stored_file_name).await? {
            warn!(file = %evidence.stored_file_name, "evidence file was already missing");
        }
        Ok(())
    }

    async fn authorized_contract(
        &self,
        identity: &Identity,
        contract_id: Uuid,
    ) -> ApiResult<ContractModel> {
        let contract = self
            .contracts
            .load_batch(&[contract_id])
            .await?
            .into_iter()
            .next()
            .flatten();
        OwnershipPolicy::authorize(identity, contract, "Contract")
    }
}
