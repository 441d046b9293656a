use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Metadata describing a stored upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImageInfo {
    /// Opaque identifier generated at upload time
    pub image_id: String,
    pub width: u32,
    pub height: u32,
    /// Lower-cased extension of the uploaded file, not the sniffed codec
    pub format: String,
    pub file_size_bytes: u64,
    /// Path the stored bytes can be fetched from
    pub preview_url: String,
}

/// Response envelope for the upload endpoint
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_info: Option<ImageInfo>,
}

impl UploadResponse {
    pub fn uploaded(image_info: ImageInfo) -> Self {
        Self {
            success: true,
            message: Some("Image uploaded successfully".to_string()),
            image_info: Some(image_info),
        }
    }
}
