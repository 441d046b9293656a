//! Upload and transform orchestration

pub mod transform;
pub mod upload;

pub use transform::ImageTransformService;
pub use upload::ImageUploadService;
