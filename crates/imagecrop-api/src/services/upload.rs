use crate::error::HttpAppError;
use imagecrop_core::models::ImageInfo;
use imagecrop_processing::{ImageMetadata, UploadValidator};
use imagecrop_storage::Storage;
use std::sync::Arc;
use uuid::Uuid;

/// Validates, stores, and probes uploaded images
#[derive(Clone)]
pub struct ImageUploadService {
    storage: Arc<dyn Storage>,
    validator: UploadValidator,
}

impl ImageUploadService {
    pub fn new(storage: Arc<dyn Storage>, validator: UploadValidator) -> Self {
        Self { storage, validator }
    }

    pub fn validator(&self) -> &UploadValidator {
        &self.validator
    }

    /// Ingest one file.
    ///
    /// Size and extension are checked before anything touches storage. The bytes are then
    /// written under a fresh identifier and read back to extract dimensions; if that fails
    /// the stored file is removed again so no undecodable upload stays addressable.
    #[tracing::instrument(skip(self, data), fields(size_bytes = data.len()))]
    pub async fn upload(&self, filename: &str, data: Vec<u8>) -> Result<ImageInfo, HttpAppError> {
        let extension = self.validator.validate(filename, data.len())?;

        let image_id = Uuid::new_v4().to_string();
        let stored = self.storage.store(&image_id, &extension, data).await?;

        let metadata = match self.probe(&stored.key, &extension).await {
            Ok(metadata) => metadata,
            Err(err) => {
                self.rollback(&stored.key).await;
                return Err(err);
            }
        };

        tracing::info!(
            image_id = %image_id,
            width = metadata.width,
            height = metadata.height,
            format = %metadata.format,
            size_bytes = metadata.size_bytes,
            "Image uploaded"
        );

        Ok(ImageInfo {
            image_id,
            width: metadata.width,
            height: metadata.height,
            format: metadata.format,
            file_size_bytes: metadata.size_bytes,
            preview_url: stored.url,
        })
    }

    async fn probe(&self, key: &str, extension: &str) -> Result<ImageMetadata, HttpAppError> {
        let data = self.storage.read(key).await?;
        let extension = extension.to_string();

        let metadata =
            tokio::task::spawn_blocking(move || ImageMetadata::extract(&data, &extension))
                .await??;
        Ok(metadata)
    }

    async fn rollback(&self, key: &str) {
        if let Err(e) = self.storage.delete(key).await {
            tracing::warn!(key = %key, error = %e, "Failed to remove rejected upload");
        }
    }
}
