//! Application state shared by every handler

use crate::services::{ImageTransformService, ImageUploadService};
use imagecrop_core::Config;
use imagecrop_processing::{TransformPipeline, UploadValidator};
use imagecrop_storage::Storage;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub storage: Arc<dyn Storage>,
    pub upload: ImageUploadService,
    pub transform: ImageTransformService,
}

impl AppState {
    /// Wire the services around a storage backend
    pub fn new(config: Config, storage: Arc<dyn Storage>) -> Self {
        let validator = UploadValidator::new(
            config.max_file_size_bytes(),
            config.allowed_extensions().to_vec(),
        );
        let pipeline = TransformPipeline::new(config.default_quality());

        Self {
            upload: ImageUploadService::new(storage.clone(), validator),
            transform: ImageTransformService::new(storage.clone(), pipeline),
            storage,
            config,
        }
    }
}
