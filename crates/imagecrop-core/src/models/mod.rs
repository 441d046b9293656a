//! Data models for the application
//!
//! Wire shapes for the upload and process endpoints. All JSON fields are camelCase.

mod image;
mod transform;

pub use image::{ImageInfo, UploadResponse};
pub use transform::{
    CompressSpec, ConvertSpec, CropSpec, ProcessImageRequest, ProcessResponse, ProcessedImage,
    ResizeSpec,
};
