//! ImageCrop Core Library
//!
//! This crate provides the configuration, error taxonomy, and request/response models
//! shared by the storage, processing, and API crates.

pub mod config;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::{BaseConfig, Config, ImageCropConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
