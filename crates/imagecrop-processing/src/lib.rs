//! ImageCrop Processing Library
//!
//! Upload validation, metadata probing, and the crop → resize → encode pipeline.
//! Everything here is synchronous and CPU-bound; async callers run it on a blocking
//! worker.

pub mod encode;
pub mod error;
pub mod image;
pub mod metadata;
pub mod pipeline;
pub mod validator;

pub use encode::{encode, OutputFormat};
pub use error::{ProcessingError, ProcessingResult};
pub use metadata::{probe_dimensions, ImageMetadata};
pub use pipeline::{TransformOutput, TransformPipeline};
pub use validator::{UploadValidator, ValidationError};
