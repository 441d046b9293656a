//! Test helpers: build AppState and router for integration tests.
//!
//! Run with `cargo test -p imagecrop-api`.

pub mod fixtures;

use axum_test::multipart::{MultipartForm, Part};
use axum_test::{TestResponse, TestServer};
use imagecrop_api::setup::routes;
use imagecrop_api::state::AppState;
use imagecrop_core::{BaseConfig, Config, ImageCropConfig};
use imagecrop_storage::{LocalStorage, Storage};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

/// Upload ceiling used by every test app
pub const TEST_MAX_FILE_SIZE: usize = 1024 * 1024;

/// Test application: server and its uploads directory.
pub struct TestApp {
    pub server: TestServer,
    pub temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    pub fn upload_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Names of every file currently in the uploads directory
    pub fn stored_files(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.upload_dir())
            .expect("read upload dir")
            .map(|entry| entry.expect("dir entry").file_name().into_string().unwrap())
            .collect();
        names.sort();
        names
    }

    pub async fn upload(&self, filename: &str, data: Vec<u8>) -> TestResponse {
        let form = MultipartForm::new().add_part("file", Part::bytes(data).file_name(filename));
        self.server
            .post("/ImageCrop/Api/Upload")
            .multipart(form)
            .await
    }

    /// Upload and return the new image id
    pub async fn upload_ok(&self, filename: &str, data: Vec<u8>) -> String {
        let response = self.upload(filename, data).await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        body["imageInfo"]["imageId"]
            .as_str()
            .expect("imageId")
            .to_string()
    }

    pub async fn process(&self, body: serde_json::Value) -> TestResponse {
        self.server.post("/ImageCrop/Api/Process").json(&body).await
    }
}

pub fn create_test_config(upload_dir: &Path) -> Config {
    Config(Box::new(ImageCropConfig {
        base: BaseConfig {
            server_port: 0,
            cors_origins: vec!["*".to_string()],
            environment: "test".to_string(),
            http_concurrency_limit: 64,
            log_json: false,
        },
        upload_dir: upload_dir.to_string_lossy().to_string(),
        uploads_base_url: "/uploads".to_string(),
        max_file_size_bytes: TEST_MAX_FILE_SIZE,
        allowed_extensions: ["jpg", "jpeg", "png", "webp", "bmp", "gif"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        default_quality: 90,
    }))
}

/// Setup test app with local storage in a temporary directory.
pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(|_| {}).await
}

/// Setup test app after adjusting the default test configuration.
pub async fn setup_test_app_with(customize: impl FnOnce(&mut ImageCropConfig)) -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let mut config = create_test_config(temp_dir.path());
    customize(config.0.as_mut());

    let storage: Arc<dyn Storage> = Arc::new(
        LocalStorage::new(temp_dir.path(), config.uploads_base_url().to_string())
            .await
            .expect("Failed to create local storage"),
    );

    let state = Arc::new(AppState::new(config.clone(), storage));
    let router = routes::setup_routes(&config, state).expect("Failed to build routes");
    let server = TestServer::new(router.into_make_service()).expect("Failed to create test server");

    TestApp { server, temp_dir }
}
