use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use credmais_api::{ApiError, ApiResult};
use tokio::fs;

/// Flat blob store for evidence files, keyed by generated file names.
#[async_trait]
pub trait FileStore: Send + Sync {
    async fn save(&self, name: &str, bytes: &[u8]) -> ApiResult<()>;

    /// Fails with `NotFound` when the file is absent.
    async fn read(&self, name: &str) -> ApiResult<Vec<u8>>;

    /// Returns whether a file was actually removed; an absent file is not an error.
    async fn remove(&self, name: &str) -> ApiResult<bool>;

    async fn exists(&self, name: &str) -> ApiResult<bool>;
}

/// [`FileStore`] over one local directory.
pub struct LocalFileStore {
    root: PathBuf,
}

impl LocalFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Creates the directory if needed.
    pub async fn open(root: impl Into<PathBuf>) -> ApiResult<Self> {
        let store = Self::new(root);
        fs::create_dir_all(&store.root).await.map_err(storage_error)?;
        Ok(store)
    }

    fn path_of(&self, name: &str) -> ApiResult<PathBuf> {
        let flat = !name.is_empty()
            && name != "."
            && name != ".."
            && !name.contains(['/', '\\', '\0']);
        if !flat {
            return Err(ApiError::ValidationError(format!("invalid file name {name:?}")));
        }
        Ok(self.root.join(name))
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn save(&self, name: &str, bytes: &[u8]) -> ApiResult<()> {
        let path = self.path_of(name)?;
        fs::write(path, bytes).await.map_err(storage_error)
    }

    async fn read(&self, name: &str) -> ApiResult<Vec<u8>> {
        let path = self.path_of(name)?;
        match fs::read(path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(ApiError::not_found("File")),
            Err(e) => Err(storage_error(e)),
        }
    }

    async fn remove(&self, name: &str) -> ApiResult<bool> {
        let path = self.path_of(name)?;
        match fs::remove_file(path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(storage_error(e)),
        }
    }

    async fn exists(&self, name: &str) -> ApiResult<bool> {
        let path = self.path_of(name)?;
        fs::try_exists(path).await.map_err(storage_error)
    }
}

fn storage_error(err: std::io::Error) -> ApiError {
    ApiError::StorageError(err.to_string())
}
