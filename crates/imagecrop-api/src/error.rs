//! HTTP error response conversion
//!
//! Handlers return `Result<_, HttpAppError>`. Domain errors from the storage and
//! processing crates convert into it with `?`, so every failure renders the same
//! envelope and is logged once, here.
//!
//! Error bodies leave without `details`. Outside production, [`error_details_middleware`]
//! swaps in the full body that `IntoResponse` left in the response extensions.

use axum::{
    body::Body,
    extract::rejection::JsonRejection,
    extract::{FromRequest, Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use imagecrop_core::{AppError, ErrorMetadata, LogLevel};
use imagecrop_processing::{ProcessingError, ValidationError};
use imagecrop_storage::StorageError;
use serde::de::DeserializeOwned;
use tokio::task::JoinError;

pub use imagecrop_infra::ErrorResponse;

/// Wrapper type for AppError to implement IntoResponse
///
/// `IntoResponse` is foreign and so is `AppError`, hence the local newtype.
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError(AppError::from(err))
    }
}

/// Convert JSON body deserialization failures into a 400 with our envelope.
impl From<JsonRejection> for HttpAppError {
    fn from(rejection: JsonRejection) -> Self {
        HttpAppError(AppError::InvalidInput(format!(
            "Invalid request body: {}",
            rejection.body_text()
        )))
    }
}

impl From<JoinError> for HttpAppError {
    fn from(err: JoinError) -> Self {
        tracing::error!(error = %err, "Blocking image task failed");
        HttpAppError(AppError::Internal(format!("Image task failed: {}", err)))
    }
}

/// JSON body extractor that answers with the error envelope on deserialization failure.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = HttpAppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(inner) = Json::<T>::from_request(req, state)
            .await
            .map_err(HttpAppError::from)?;
        Ok(ValidatedJson(inner))
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Error => {
            tracing::error!(
                error = %error.detailed_message(),
                error_type = error_type,
                "Error occurred"
            );
        }
    }
}

/// Build the envelope for an error. Sensitive errors never carry details.
pub fn error_body(app_error: &AppError) -> ErrorResponse {
    let details = if app_error.is_sensitive() {
        None
    } else {
        Some(app_error.detailed_message())
    };

    ErrorResponse {
        success: false,
        message: app_error.client_message(),
        code: app_error.error_code().to_string(),
        recoverable: app_error.is_recoverable(),
        suggested_action: app_error.suggested_action().map(String::from),
        details,
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        let body = error_body(app_error);
        let redacted = ErrorResponse {
            details: None,
            ..body.clone()
        };

        let mut response = (status, Json(redacted)).into_response();
        if body.details.is_some() {
            response.extensions_mut().insert(DetailedErrorBody(body));
        }
        response
    }
}

/// Error envelope including `details`, carried in the response extensions
#[derive(Debug, Clone)]
struct DetailedErrorBody(ErrorResponse);

/// Whether error responses may include `details`
#[derive(Debug, Clone, Copy)]
pub struct ErrorDetails {
    expose: bool,
}

impl ErrorDetails {
    pub fn new(is_production: bool) -> Self {
        Self {
            expose: !is_production,
        }
    }
}

/// Restore `details` on error bodies when the deployment allows it.
pub async fn error_details_middleware(
    State(policy): State<ErrorDetails>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;

    let Some(DetailedErrorBody(body)) = response.extensions_mut().remove::<DetailedErrorBody>()
    else {
        return response;
    };
    if !policy.expose {
        return response;
    }

    let bytes = match serde_json::to_vec(&body) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to serialize detailed error body");
            return response;
        }
    };

    let (mut parts, _) = response.into_parts();
    parts.headers.remove(header::CONTENT_LENGTH);
    Response::from_parts(parts, Body::from(bytes))
}

// Domain errors into HttpAppError

impl From<StorageError> for HttpAppError {
    fn from(err: StorageError) -> Self {
        let app = match err {
            StorageError::NotFound(_) => AppError::NotFound("Image not found".to_string()),
            StorageError::InvalidKey(msg) => AppError::InvalidInput(msg),
            StorageError::UploadFailed(msg)
            | StorageError::DownloadFailed(msg)
            | StorageError::DeleteFailed(msg) => AppError::Storage(msg),
            StorageError::AlreadyExists(key) => {
                AppError::Storage(format!("Storage key already exists: {}", key))
            }
            StorageError::IoError(err) => AppError::Storage(format!("IO error: {}", err)),
            StorageError::ConfigError(msg) => AppError::Internal(msg),
        };
        HttpAppError(app)
    }
}

impl From<ValidationError> for HttpAppError {
    fn from(err: ValidationError) -> Self {
        let app = match err {
            ValidationError::EmptyFile => AppError::InvalidInput("No file uploaded".to_string()),
            ValidationError::FileTooLarge { max, .. } => AppError::PayloadTooLarge(format!(
                "File size exceeds {}MB limit",
                max / 1024 / 1024
            )),
            ValidationError::InvalidExtension { allowed, .. } => {
                let allowed: Vec<String> = allowed.iter().map(|e| e.to_uppercase()).collect();
                AppError::InvalidInput(format!(
                    "Invalid file type. Allowed: {}",
                    allowed.join(", ")
                ))
            }
        };
        HttpAppError(app)
    }
}

impl From<ProcessingError> for HttpAppError {
    fn from(err: ProcessingError) -> Self {
        HttpAppError(AppError::ImageProcessing(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_storage_error_not_found() {
        let storage_err = StorageError::NotFound("abc".to_string());
        let HttpAppError(app_err) = storage_err.into();
        match app_err {
            AppError::NotFound(msg) => assert_eq!(msg, "Image not found"),
            _ => panic!("Expected NotFound variant"),
        }
    }

    #[test]
    fn test_from_storage_error_io_error_is_sensitive() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "/srv/uploads");
        let HttpAppError(app_err) = StorageError::IoError(io_err).into();
        assert!(matches!(app_err, AppError::Storage(_)));
        assert!(app_err.is_sensitive());
        assert!(!app_err.client_message().contains("/srv/uploads"));
    }

    #[test]
    fn test_from_storage_error_invalid_key() {
        let storage_err = StorageError::InvalidKey("Invalid key".to_string());
        let HttpAppError(app_err) = storage_err.into();
        match app_err {
            AppError::InvalidInput(msg) => assert_eq!(msg, "Invalid key"),
            _ => panic!("Expected InvalidInput variant"),
        }
    }

    #[test]
    fn test_from_validation_error_file_too_large() {
        let validation_err = ValidationError::FileTooLarge {
            size: 11 * 1024 * 1024,
            max: 10 * 1024 * 1024,
        };
        let HttpAppError(app_err) = validation_err.into();
        assert_eq!(app_err.http_status_code(), 413);
        assert_eq!(app_err.client_message(), "File size exceeds 10MB limit");
    }

    #[test]
    fn test_from_validation_error_invalid_extension() {
        let validation_err = ValidationError::InvalidExtension {
            extension: "txt".to_string(),
            allowed: vec!["jpg".to_string(), "png".to_string()],
        };
        let HttpAppError(app_err) = validation_err.into();
        assert_eq!(app_err.http_status_code(), 400);
        assert_eq!(
            app_err.client_message(),
            "Invalid file type. Allowed: JPG, PNG"
        );
    }

    #[test]
    fn test_from_validation_error_empty_file() {
        let HttpAppError(app_err) = ValidationError::EmptyFile.into();
        match app_err {
            AppError::InvalidInput(msg) => assert_eq!(msg, "No file uploaded"),
            _ => panic!("Expected InvalidInput variant"),
        }
    }

    #[test]
    fn test_from_processing_error() {
        let err = ProcessingError::InvalidGeometry("crop width must be positive".to_string());
        let HttpAppError(app_err) = err.into();
        assert_eq!(app_err.http_status_code(), 500);
        assert!(app_err
            .client_message()
            .starts_with("Error processing image: "));
    }

    #[test]
    fn test_error_body_shape() {
        let err = AppError::NotFound("Image not found".to_string());
        let json = serde_json::to_value(error_body(&err)).unwrap();

        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Image not found");
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["recoverable"], false);
        assert!(json["suggestedAction"].is_string());
        assert!(json["details"].is_string());
    }

    #[test]
    fn test_error_body_hides_sensitive_details() {
        let sensitive = AppError::Internal("db password".to_string());
        let body = error_body(&sensitive);
        assert!(body.details.is_none());
        assert_eq!(body.message, "Internal server error");
    }

    fn failing_app(policy: ErrorDetails) -> axum::Router {
        axum::Router::new()
            .route(
                "/",
                axum::routing::get(|| async {
                    Err::<(), _>(HttpAppError(AppError::NotFound("Image not found".to_string())))
                }),
            )
            .layer(axum::middleware::from_fn_with_state(
                policy,
                error_details_middleware,
            ))
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_into_response_omits_details_by_default() {
        let response =
            HttpAppError(AppError::NotFound("Image not found".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.extensions().get::<DetailedErrorBody>().is_some());
    }

    #[tokio::test]
    async fn test_details_exposed_outside_production() {
        use tower::ServiceExt;

        let response = failing_app(ErrorDetails::new(false))
            .oneshot(axum::http::Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let json = body_json(response).await;
        assert_eq!(json["code"], "NOT_FOUND");
        assert!(json["details"]
            .as_str()
            .unwrap()
            .contains("Image not found"));
    }

    #[tokio::test]
    async fn test_details_hidden_in_production() {
        use tower::ServiceExt;

        let response = failing_app(ErrorDetails::new(true))
            .oneshot(axum::http::Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.extensions().get::<DetailedErrorBody>().is_none());

        let json = body_json(response).await;
        assert_eq!(json["message"], "Image not found");
        assert!(json.get("details").is_none());
    }
}
