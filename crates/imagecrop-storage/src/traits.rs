//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use async_trait::async_trait;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Storage key already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// A stored upload as seen by callers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// Storage key, `{identifier}.{extension}`
    pub key: String,
    pub size_bytes: u64,
    /// Public locator for the stored bytes
    pub url: String,
}

/// Storage abstraction trait
///
/// Stored objects are immutable: `store` never overwrites an existing key, and nothing
/// rewrites a key in place.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Persist `data` under `{identifier}.{extension}`
    async fn store(
        &self,
        identifier: &str,
        extension: &str,
        data: Vec<u8>,
    ) -> StorageResult<StoredObject>;

    /// Resolve an identifier to its stored object.
    ///
    /// When several keys share the identifier, the lexicographically smallest key wins.
    async fn find_by_identifier(&self, identifier: &str) -> StorageResult<StoredObject>;

    /// Read the full contents of a key
    async fn read(&self, storage_key: &str) -> StorageResult<Vec<u8>>;

    /// Size in bytes of an existing key
    async fn content_length(&self, storage_key: &str) -> StorageResult<u64>;

    /// Remove a key. Only used to roll back an ingest that failed after writing.
    async fn delete(&self, storage_key: &str) -> StorageResult<()>;

    /// Public locator for a key
    fn public_url(&self, storage_key: &str) -> String;

    /// Short backend name for logs and health output
    fn backend_name(&self) -> &'static str;
}
