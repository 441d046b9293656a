use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::upload::extract_multipart_file;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::Json;
use imagecrop_core::models::UploadResponse;
use imagecrop_core::AppError;
use std::sync::Arc;

/// Upload image handler
///
/// Accepts a multipart form with one field named `file`. On success the stored image's
/// identifier, dimensions and preview URL are returned.
///
/// # Errors
/// - `AppError::InvalidInput` - no file, or a disallowed extension
/// - `AppError::PayloadTooLarge` - file exceeds the configured ceiling
/// - `AppError::ImageProcessing` - the file could not be decoded
#[utoipa::path(
    post,
    path = "/ImageCrop/Api/Upload",
    tag = "images",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Image uploaded successfully", body = UploadResponse),
        (status = 400, description = "No file or invalid file type", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Image could not be decoded or stored", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "upload_image"))]
pub async fn upload_image(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, HttpAppError> {
    let multipart = multipart.map_err(|rejection| {
        tracing::debug!(rejection = %rejection.body_text(), "Upload is not a multipart form");
        AppError::InvalidInput("No file uploaded".to_string())
    })?;

    let file =
        extract_multipart_file(multipart, state.upload.validator().max_file_size()).await?;

    let info = state.upload.upload(&file.filename, file.data).await?;

    Ok(Json(UploadResponse::uploaded(info)))
}
