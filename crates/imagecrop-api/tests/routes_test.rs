//! Preview, health, and documentation routes.

mod helpers;

use helpers::fixtures::create_test_png;
use helpers::{setup_test_app, setup_test_app_with};

#[tokio::test]
async fn test_preview_serves_stored_bytes() {
    let app = setup_test_app().await;
    let data = create_test_png(5, 5);
    let image_id = app.upload_ok("photo.png", data.clone()).await;

    let response = app
        .client()
        .get(&format!("/uploads/{}.png", image_id))
        .await;
    response.assert_status_ok();

    assert_eq!(response.header("content-type"), "image/png");
    assert_eq!(response.as_bytes().to_vec(), data);
}

#[tokio::test]
async fn test_preview_missing_file() {
    let app = setup_test_app().await;

    let response = app.client().get("/uploads/missing.png").await;
    assert_eq!(response.status_code(), 404);

    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_preview_rejects_hidden_files() {
    let app = setup_test_app().await;
    std::fs::write(app.upload_dir().join(".secret"), b"x").unwrap();

    let response = app.client().get("/uploads/.secret").await;
    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_health_and_liveness() {
    let app = setup_test_app().await;

    let response = app.client().get("/health").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["backend"], "local");

    let response = app.client().get("/live").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "alive");
}

#[tokio::test]
async fn test_health_reports_missing_upload_dir() {
    let app = setup_test_app().await;
    std::fs::remove_dir_all(app.upload_dir()).unwrap();

    let response = app.client().get("/health").await;
    assert_eq!(response.status_code(), 503);
}

#[tokio::test]
async fn test_responses_carry_request_id_and_security_headers() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .get("/live")
        .add_header("X-Request-ID", "test-request")
        .await;

    assert_eq!(response.header("x-request-id"), "test-request");
    assert_eq!(response.header("x-content-type-options"), "nosniff");
}

#[tokio::test]
async fn test_openapi_document() {
    let app = setup_test_app().await;

    let response = app.client().get("/api/openapi.json").await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert!(body["paths"]["/ImageCrop/Api/Process"].is_object());
}

#[tokio::test]
async fn test_preview_mounted_at_configured_prefix() {
    let app = setup_test_app_with(|config| {
        config.uploads_base_url = "/media/".to_string();
    })
    .await;
    let data = create_test_png(4, 4);

    let response = app.upload("photo.png", data.clone()).await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let preview_url = body["imageInfo"]["previewUrl"].as_str().unwrap().to_string();
    assert!(preview_url.starts_with("/media/"));

    let response = app.client().get(&preview_url).await;
    response.assert_status_ok();
    assert_eq!(response.as_bytes().to_vec(), data);

    let default_path = preview_url.replacen("/media/", "/uploads/", 1);
    assert_eq!(app.client().get(&default_path).await.status_code(), 404);
}

#[tokio::test]
async fn test_preview_falls_back_for_external_base_url() {
    let app = setup_test_app_with(|config| {
        config.uploads_base_url = "https://cdn.example.com/images".to_string();
    })
    .await;
    let image_id = app.upload_ok("photo.png", create_test_png(4, 4)).await;

    let response = app.upload("other.png", create_test_png(2, 2)).await;
    let body: serde_json::Value = response.json();
    assert!(body["imageInfo"]["previewUrl"]
        .as_str()
        .unwrap()
        .starts_with("https://cdn.example.com/images/"));

    app.client()
        .get(&format!("/uploads/{}.png", image_id))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_error_details_follow_configured_environment() {
    let missing = serde_json::json!({ "imageId": "5f0c5a8e-0000-4000-8000-000000000000" });

    let development = setup_test_app().await;
    let response = development.process(missing.clone()).await;
    assert_eq!(response.status_code(), 404);
    let body: serde_json::Value = response.json();
    assert!(body["details"].is_string());

    let production = setup_test_app_with(|config| {
        config.base.environment = "production".to_string();
        config.base.cors_origins = vec!["https://app.example.com".to_string()];
    })
    .await;
    let response = production.process(missing).await;
    assert_eq!(response.status_code(), 404);
    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], "Image not found");
    assert_eq!(body["code"], "NOT_FOUND");
    assert!(body.get("details").is_none());
}
