use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::extract::State;
use axum::Json;
use imagecrop_core::models::{ProcessImageRequest, ProcessResponse};
use std::sync::Arc;

/// Crop, resize and re-encode a stored image; the result is returned inline as base64.
#[utoipa::path(
    post,
    path = "/ImageCrop/Api/Process",
    tag = "images",
    request_body = ProcessImageRequest,
    responses(
        (status = 200, description = "Processed image", body = ProcessResponse),
        (status = 400, description = "Missing image id or malformed body", body = ErrorResponse),
        (status = 404, description = "Image not found", body = ErrorResponse),
        (status = 500, description = "Error processing image", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, request), fields(operation = "process_image"))]
pub async fn process_image(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<ProcessImageRequest>,
) -> Result<Json<ProcessResponse>, HttpAppError> {
    let data = state.transform.process(request).await?;

    Ok(Json(ProcessResponse {
        success: true,
        data,
    }))
}
