//! JSON error envelope
//!
//! The `IntoResponse` conversion for `imagecrop_core::AppError` lives in the api crate;
//! this crate only owns the wire shape.

use serde::Serialize;
use utoipa::ToSchema;

/// Body of every failed response
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Always `false`
    pub success: bool,
    pub message: String,
    /// Stable machine-readable error code
    pub code: String,
    pub recoverable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_action: Option<String>,
    /// Underlying error text; omitted in production and for sensitive errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_skips_empty_fields() {
        let body = serde_json::to_value(ErrorResponse {
            success: false,
            message: "Image not found".to_string(),
            code: "NOT_FOUND".to_string(),
            recoverable: false,
            suggested_action: None,
            details: None,
        })
        .unwrap();

        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Image not found");
        assert_eq!(body["code"], "NOT_FOUND");
        assert!(body.get("suggestedAction").is_none());
        assert!(body.get("details").is_none());
    }
}
