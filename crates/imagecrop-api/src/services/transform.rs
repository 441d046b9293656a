use crate::error::HttpAppError;
use base64::Engine;
use imagecrop_core::models::{ProcessImageRequest, ProcessedImage};
use imagecrop_core::AppError;
use imagecrop_processing::TransformPipeline;
use imagecrop_storage::{Storage, StorageError, StoredObject};
use std::sync::Arc;

/// Runs the crop / resize / encode pipeline against stored images
#[derive(Clone)]
pub struct ImageTransformService {
    storage: Arc<dyn Storage>,
    pipeline: TransformPipeline,
}

impl ImageTransformService {
    pub fn new(storage: Arc<dyn Storage>, pipeline: TransformPipeline) -> Self {
        Self { storage, pipeline }
    }

    /// Resolve an identifier to its stored file.
    ///
    /// Identifiers that could never have been issued are reported as missing.
    pub async fn locate(&self, image_id: &str) -> Result<StoredObject, HttpAppError> {
        match self.storage.find_by_identifier(image_id).await {
            Ok(stored) => Ok(stored),
            Err(StorageError::InvalidKey(reason)) => {
                tracing::debug!(image_id = %image_id, reason = %reason, "Malformed image id");
                Err(AppError::NotFound("Image not found".to_string()).into())
            }
            Err(e) => Err(e.into()),
        }
    }

    #[tracing::instrument(skip(self, request), fields(image_id = %request.image_id))]
    pub async fn process(
        &self,
        request: ProcessImageRequest,
    ) -> Result<ProcessedImage, HttpAppError> {
        if request.image_id.trim().is_empty() {
            return Err(AppError::InvalidInput("Image ID is required".to_string()).into());
        }

        let stored = self.locate(&request.image_id).await?;
        let data = self.storage.read(&stored.key).await?;
        let pipeline = self.pipeline;

        let processed = tokio::task::spawn_blocking(move || {
            let output = pipeline.run(&data, &request)?;
            Ok::<_, imagecrop_processing::ProcessingError>(ProcessedImage {
                base64_data: base64::engine::general_purpose::STANDARD.encode(&output.data),
                file_size_bytes: output.data.len() as u64,
                width: output.width,
                height: output.height,
                format: output.format,
            })
        })
        .await??;

        tracing::info!(
            key = %stored.key,
            width = processed.width,
            height = processed.height,
            format = %processed.format,
            size_bytes = processed.file_size_bytes,
            "Image processed"
        );

        Ok(processed)
    }
}
