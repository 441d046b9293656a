//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error::ErrorResponse;
use crate::handlers;
use crate::setup::routes::HealthCheckResponse;
use imagecrop_core::models;

/// Returns the OpenAPI document served at `/api/openapi.json`.
pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "ImageCrop API",
        version = "0.1.0",
        description = "Upload images, then crop, resize and convert them. Processed results are returned inline as base64."
    ),
    paths(
        handlers::upload::upload_image,
        handlers::process::process_image,
        handlers::preview::get_upload,
    ),
    components(schemas(
        models::ImageInfo,
        models::UploadResponse,
        models::CropSpec,
        models::ResizeSpec,
        models::ConvertSpec,
        models::CompressSpec,
        models::ProcessImageRequest,
        models::ProcessedImage,
        models::ProcessResponse,
        ErrorResponse,
        HealthCheckResponse,
    )),
    tags(
        (name = "images", description = "Image upload and processing")
    )
)]
struct ApiDoc;
