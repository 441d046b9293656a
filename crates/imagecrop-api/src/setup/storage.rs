use anyhow::{Context, Result};
use imagecrop_core::Config;
use imagecrop_storage::{create_storage, Storage};
use std::sync::Arc;

/// Open the uploads store, creating its directory when missing
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    let storage = create_storage(config)
        .await
        .with_context(|| format!("Failed to open upload directory {}", config.upload_dir()))?;

    tracing::info!(
        backend = storage.backend_name(),
        upload_dir = %config.upload_dir(),
        base_url = %config.uploads_base_url(),
        "Storage initialized"
    );

    Ok(storage)
}
