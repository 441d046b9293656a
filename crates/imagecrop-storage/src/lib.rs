//! ImageCrop Storage Library
//!
//! This crate provides the storage abstraction for uploaded images and its local
//! filesystem implementation.
//!
//! # Storage key format
//!
//! Every upload lives at a flat key `{identifier}.{extension}` directly under the uploads
//! directory. Keys are written once and never rewritten. Keys must not contain `..`, path
//! separators, or a leading dot.

pub mod factory;
pub(crate) mod keys;
pub mod local;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use local::LocalStorage;
pub use traits::{Storage, StorageError, StorageResult, StoredObject};
