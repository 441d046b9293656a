use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Rectangle to extract, in source pixel coordinates.
///
/// Values are signed so that negative or zero sizes reach the pipeline and are reported
/// as processing failures rather than as JSON shape errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CropSpec {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResizeSpec {
    #[serde(default)]
    pub width: Option<i64>,
    #[serde(default)]
    pub height: Option<i64>,
    #[serde(default = "default_maintain_aspect_ratio")]
    pub maintain_aspect_ratio: bool,
}

fn default_maintain_aspect_ratio() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConvertSpec {
    /// Output format label (png, jpg, jpeg, webp, bmp, gif)
    #[serde(default = "default_target_format")]
    pub target_format: String,
    #[serde(default)]
    pub quality: Option<i64>,
}

fn default_target_format() -> String {
    "png".to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompressSpec {
    #[serde(default = "default_compress_quality")]
    pub quality: i64,
}

fn default_compress_quality() -> i64 {
    80
}

/// Body of the process endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProcessImageRequest {
    #[serde(default)]
    pub image_id: String,
    #[serde(default)]
    pub crop: Option<CropSpec>,
    #[serde(default)]
    pub resize: Option<ResizeSpec>,
    #[serde(default)]
    pub convert: Option<ConvertSpec>,
    #[serde(default)]
    pub compress: Option<CompressSpec>,
}

/// Encoded transformation result
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedImage {
    pub base64_data: String,
    pub file_size_bytes: u64,
    pub width: u32,
    pub height: u32,
    /// The requested format label, echoed verbatim
    pub format: String,
}

/// Response envelope for the process endpoint
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProcessResponse {
    pub success: bool,
    pub data: ProcessedImage,
}
