use crate::keys::{make_key, validate_identifier, validate_key};
use crate::traits::{Storage, StorageError, StorageResult, StoredObject};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem storage implementation
#[derive(Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
    base_url: String,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Uploads directory (e.g., "uploads")
    /// * `base_url` - Prefix the directory is served under (e.g., "/uploads")
    pub async fn new(base_path: impl Into<PathBuf>, base_url: String) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage {
            base_path,
            base_url,
        })
    }

    fn key_to_path(&self, storage_key: &str) -> StorageResult<PathBuf> {
        validate_key(storage_key)?;
        Ok(self.base_path.join(storage_key))
    }

    async fn object_for_key(&self, key: String) -> StorageResult<StoredObject> {
        let size_bytes = self.content_length(&key).await?;
        let url = self.public_url(&key);
        Ok(StoredObject {
            key,
            size_bytes,
            url,
        })
    }
}

/// Remove `path` when its write failed so the key can be stored again, then pass the
/// write result through.
async fn discard_partial<T>(path: &Path, result: StorageResult<T>) -> StorageResult<T> {
    if result.is_err() {
        if let Err(e) = fs::remove_file(path).await {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Failed to remove partially written file"
            );
        }
    }
    result
}

#[async_trait]
impl Storage for LocalStorage {
    async fn store(
        &self,
        identifier: &str,
        extension: &str,
        data: Vec<u8>,
    ) -> StorageResult<StoredObject> {
        let key = make_key(identifier, extension)?;
        let path = self.key_to_path(&key)?;
        let size = data.len();

        let start = std::time::Instant::now();

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => StorageError::AlreadyExists(key.clone()),
                _ => StorageError::UploadFailed(format!(
                    "Failed to create file {}: {}",
                    path.display(),
                    e
                )),
            })?;

        let written: StorageResult<()> = async {
            file.write_all(&data).await.map_err(|e| {
                StorageError::UploadFailed(format!(
                    "Failed to write file {}: {}",
                    path.display(),
                    e
                ))
            })?;
            file.sync_all().await.map_err(|e| {
                StorageError::UploadFailed(format!("Failed to sync file {}: {}", path.display(), e))
            })
        }
        .await;
        drop(file);
        discard_partial(&path, written).await?;

        let url = self.public_url(&key);

        tracing::info!(
            path = %path.display(),
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage upload successful"
        );

        Ok(StoredObject {
            key,
            size_bytes: size as u64,
            url,
        })
    }

    async fn find_by_identifier(&self, identifier: &str) -> StorageResult<StoredObject> {
        validate_identifier(identifier)?;
        let prefix = format!("{}.", identifier);

        let mut entries = fs::read_dir(&self.base_path).await.map_err(|e| {
            StorageError::DownloadFailed(format!(
                "Failed to list {}: {}",
                self.base_path.display(),
                e
            ))
        })?;

        let mut matches = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            if name.starts_with(&prefix) && entry.file_type().await?.is_file() {
                matches.push(name);
            }
        }

        matches.sort();
        if matches.len() > 1 {
            tracing::warn!(
                identifier = %identifier,
                candidates = matches.len(),
                chosen = %matches[0],
                "Multiple stored files share an identifier, using first match"
            );
        }

        let key = matches
            .into_iter()
            .next()
            .ok_or_else(|| StorageError::NotFound(identifier.to_string()))?;

        self.object_for_key(key).await
    }

    async fn read(&self, storage_key: &str) -> StorageResult<Vec<u8>> {
        let path = self.key_to_path(storage_key)?;
        let start = std::time::Instant::now();

        let data = fs::read(&path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => StorageError::NotFound(storage_key.to_string()),
            _ => StorageError::DownloadFailed(format!(
                "Failed to read file {}: {}",
                path.display(),
                e
            )),
        })?;

        tracing::debug!(
            key = %storage_key,
            size_bytes = data.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage read successful"
        );

        Ok(data)
    }

    async fn content_length(&self, storage_key: &str) -> StorageResult<u64> {
        let path = self.key_to_path(storage_key)?;
        match fs::metadata(&path).await {
            Ok(meta) => Ok(meta.len()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(StorageError::NotFound(storage_key.to_string()))
            }
            Err(e) => Err(StorageError::IoError(e)),
        }
    }

    async fn delete(&self, storage_key: &str) -> StorageResult<()> {
        let path = self.key_to_path(storage_key)?;

        match fs::remove_file(&path).await {
            Ok(()) => {
                tracing::info!(key = %storage_key, "Local storage delete successful");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::DeleteFailed(format!(
                "Failed to delete file {}: {}",
                path.display(),
                e
            ))),
        }
    }

    fn public_url(&self, storage_key: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), storage_key)
    }

    fn backend_name(&self) -> &'static str {
        "local"
    }
}
