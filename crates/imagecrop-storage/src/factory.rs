use crate::{LocalStorage, Storage, StorageResult};
use imagecrop_core::Config;
use std::sync::Arc;

/// Create the storage backend described by configuration
pub async fn create_storage(config: &Config) -> StorageResult<Arc<dyn Storage>> {
    let storage = LocalStorage::new(
        config.upload_dir(),
        config.uploads_base_url().to_string(),
    )
    .await?;
    Ok(Arc::new(storage))
}
