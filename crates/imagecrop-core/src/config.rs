//! Configuration module
//!
//! Environment-driven configuration for the ImageCrop service: server settings, the
//! uploads directory, and the ingest and encoding limits.

use std::env;

const SERVER_PORT: u16 = 5000;
const MAX_FILE_SIZE_MB: usize = 10;
const DEFAULT_QUALITY: u8 = 90;
const HTTP_CONCURRENCY_LIMIT: usize = 1024;
const DEFAULT_ALLOWED_EXTENSIONS: &str = "jpg,jpeg,png,webp,bmp,gif";

/// Server-level settings shared by every route
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    pub http_concurrency_limit: usize,
    pub log_json: bool,
}

/// Image ingest and transformation settings
#[derive(Clone, Debug)]
pub struct ImageCropConfig {
    pub base: BaseConfig,
    /// Directory holding `{identifier}.{extension}` files
    pub upload_dir: String,
    /// Prefix of every `previewUrl`. A local path (`/media`) is also where the preview
    /// route is mounted; an absolute URL points previews at another host.
    pub uploads_base_url: String,
    pub max_file_size_bytes: usize,
    pub allowed_extensions: Vec<String>,
    pub default_quality: u8,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<ImageCropConfig>);

impl Config {
    fn as_inner(&self) -> &ImageCropConfig {
        &self.0
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        is_production_name(&self.as_inner().base.environment)
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = ImageCropConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.as_inner().validate()
    }

    pub fn server_port(&self) -> u16 {
        self.as_inner().base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.as_inner().base.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.as_inner().base.environment
    }

    pub fn http_concurrency_limit(&self) -> usize {
        self.as_inner().base.http_concurrency_limit
    }

    pub fn log_json(&self) -> bool {
        self.as_inner().base.log_json
    }

    pub fn upload_dir(&self) -> &str {
        &self.as_inner().upload_dir
    }

    pub fn uploads_base_url(&self) -> &str {
        &self.as_inner().uploads_base_url
    }

    pub fn max_file_size_bytes(&self) -> usize {
        self.as_inner().max_file_size_bytes
    }

    pub fn allowed_extensions(&self) -> &[String] {
        &self.as_inner().allowed_extensions
    }

    pub fn default_quality(&self) -> u8 {
        self.as_inner().default_quality
    }
}

fn is_production_name(environment: &str) -> bool {
    let environment = environment.to_lowercase();
    environment == "production" || environment == "prod"
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

impl ImageCropConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins: Vec<String> = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_file_size_mb = env::var("MAX_FILE_SIZE_MB")
            .unwrap_or_else(|_| MAX_FILE_SIZE_MB.to_string())
            .parse::<usize>()
            .unwrap_or(MAX_FILE_SIZE_MB);

        let allowed_extensions = split_list(
            &env::var("ALLOWED_EXTENSIONS")
                .unwrap_or_else(|_| DEFAULT_ALLOWED_EXTENSIONS.to_string()),
        );

        let base = BaseConfig {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins,
            environment,
            http_concurrency_limit: env::var("HTTP_CONCURRENCY_LIMIT")
                .ok()
                .and_then(|s| s.parse::<usize>().ok())
                .unwrap_or(HTTP_CONCURRENCY_LIMIT)
                .max(1),
            log_json: env::var("LOG_FORMAT")
                .map(|f| f.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
        };

        let config = ImageCropConfig {
            base,
            upload_dir: env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string()),
            uploads_base_url: env::var("UPLOADS_BASE_URL")
                .unwrap_or_else(|_| "/uploads".to_string()),
            max_file_size_bytes: max_file_size_mb * 1024 * 1024,
            allowed_extensions,
            default_quality: env::var("DEFAULT_QUALITY")
                .ok()
                .and_then(|s| s.parse::<u8>().ok())
                .unwrap_or(DEFAULT_QUALITY),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.max_file_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_FILE_SIZE_MB must be greater than 0"));
        }

        if self.allowed_extensions.is_empty() {
            return Err(anyhow::anyhow!(
                "ALLOWED_EXTENSIONS must name at least one extension"
            ));
        }

        if self.default_quality > 100 {
            return Err(anyhow::anyhow!("DEFAULT_QUALITY must be between 0 and 100"));
        }

        if self.upload_dir.trim().is_empty() {
            return Err(anyhow::anyhow!("UPLOAD_DIR cannot be empty"));
        }

        if is_production_name(&self.base.environment)
            && self.base.cors_origins.iter().any(|o| o == "*")
        {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        Ok(())
    }
}
