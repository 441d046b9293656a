//! Multipart helpers for the upload handler

use crate::constants::UPLOAD_FIELD;
use axum::extract::Multipart;
use axum::http::StatusCode;
use imagecrop_core::AppError;

/// Uploaded file as read from the form
#[derive(Debug)]
pub struct UploadedFile {
    pub filename: String,
    pub data: Vec<u8>,
}

/// Extract the single `file` field from a multipart form.
///
/// Other fields are ignored. A second `file` field is rejected, and a form without one
/// answers "No file uploaded".
pub async fn extract_multipart_file(
    mut multipart: Multipart,
    max_file_size: usize,
) -> Result<UploadedFile, AppError> {
    let mut upload: Option<UploadedFile> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, max_file_size))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        if upload.is_some() {
            return Err(AppError::InvalidInput(
                "Multiple file fields are not allowed; send exactly one field named 'file'"
                    .to_string(),
            ));
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| multipart_error(e, max_file_size))?;

        upload = Some(UploadedFile {
            filename,
            data: data.to_vec(),
        });
    }

    upload.ok_or_else(|| AppError::InvalidInput("No file uploaded".to_string()))
}

fn multipart_error(err: axum::extract::multipart::MultipartError, max_file_size: usize) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(format!(
            "File size exceeds {}MB limit",
            max_file_size / 1024 / 1024
        ))
    } else {
        AppError::InvalidInput(format!("Failed to read multipart: {}", err.body_text()))
    }
}
