use crate::uploads::consts::PLACEHOLDER_IMAGE_URL;
use crate::uploads::storage::{Blob, FileStorage, StorageError, StoredFile};
use std::sync::Arc;

/// Create-or-reuse by name. Lookup and create are two separate calls, so two
/// concurrent uploads of a new name may both create it.
#[derive(Clone)]
pub struct IdempotentUploader {
    storage: Arc<dyn FileStorage>,
}

impl IdempotentUploader {
    pub fn new(storage: Arc<dyn FileStorage>) -> Self {
        Self { storage }
    }

    /// Returns the public download URL of the stored blob. Never fails: any
    /// storage error degrades to a placeholder image URL.
    pub async fn upload(&self, blob: &Blob, description: &str) -> String {
        let existing = match self.storage.find_by_name(&blob.name).await {
            Ok(existing) => existing,
            Err(err) => {
                tracing::warn!(
                    name = %blob.name,
                    error = %err,
                    "Storage lookup failed, uploading a fresh copy."
                );
                None
            }
        };

        let result = match existing {
            Some(cached) => {
                tracing::debug!(name = %blob.name, "Reusing the stored file.");
                self.share(cached).await
            }
            None => self.create(blob, description).await,
        };

        match result {
            Ok(file) => file.download_url,
            Err(err) => {
                tracing::warn!(
                    name = %blob.name,
                    error = %err,
                    "Upload failed, falling back to the placeholder image."
                );
                PLACEHOLDER_IMAGE_URL.to_string()
            }
        }
    }

    async fn create(&self, blob: &Blob, description: &str) -> Result<StoredFile, StorageError> {
        let file = self.storage.create(blob, description).await?;
        tracing::info!(name = %file.name, size = blob.bytes.len(), "Stored a new file.");
        self.share(file).await
    }

    async fn share(&self, file: StoredFile) -> Result<StoredFile, StorageError> {
        self.storage.share_with_anyone(&file).await?;
        Ok(file)
    }
}
