/// Failures raised while decoding, transforming, or encoding an image
#[derive(Debug, thiserror::Error)]
pub enum ProcessingError {
    #[error("Failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Failed to encode image as {format}: {message}")]
    Encode { format: String, message: String },
}

pub type ProcessingResult<T> = Result<T, ProcessingError>;

impl ProcessingError {
    pub(crate) fn encode(format: impl Into<String>, err: impl std::fmt::Display) -> Self {
        ProcessingError::Encode {
            format: format.into(),
            message: err.to_string(),
        }
    }
}
