use async_trait::async_trait;
use axum::body::Bytes;
use thiserror::Error;

/// A named binary to be stored.
#[derive(Clone, Debug)]
pub struct Blob {
    pub name: String,
    pub content_type: &'static str,
    pub bytes: Bytes,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredFile {
    pub name: String,
    pub download_url: String,
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage is misconfigured: {0}")]
    Configuration(String),
    #[error("`{operation}` failed: {message}")]
    Backend {
        operation: &'static str,
        message: String,
    },
}

/// Shared storage addressed by file name.
#[async_trait]
pub trait FileStorage: Send + Sync {
    async fn find_by_name(&self, name: &str) -> Result<Option<StoredFile>, StorageError>;

    async fn create(&self, blob: &Blob, description: &str) -> Result<StoredFile, StorageError>;

    /// Grants read access to anyone holding the link.
    async fn share_with_anyone(&self, file: &StoredFile) -> Result<(), StorageError>;
}
