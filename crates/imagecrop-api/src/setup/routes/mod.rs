//! Route configuration and setup.

mod health;

pub use health::HealthCheckResponse;

use crate::constants::{
    MULTIPART_OVERHEAD_BYTES, OPENAPI_PATH, PROCESS_PATH, UPLOADS_PATH, UPLOAD_PATH,
};
use crate::error::{error_details_middleware, ErrorDetails};
use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
    Json, Router,
};
use imagecrop_core::Config;
use imagecrop_infra::{request_id_middleware, security_headers_middleware, SecurityHeaders};
use std::sync::Arc;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;
    let preview_prefix = preview_prefix(config)?;

    let http_concurrency_limit = config.http_concurrency_limit();
    let body_limit = config
        .max_file_size_bytes()
        .saturating_add(MULTIPART_OVERHEAD_BYTES);
    tracing::info!(
        http_concurrency_limit,
        body_limit_bytes = body_limit,
        "HTTP limits configured"
    );

    let app = Router::new()
        .merge(public_routes())
        .merge(image_routes(preview_prefix))
        .layer(axum::middleware::from_fn_with_state(
            ErrorDetails::new(config.is_production()),
            error_details_middleware,
        ))
        .layer(ConcurrencyLimitLayer::new(http_concurrency_limit))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(DefaultBodyLimit::disable())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(axum::middleware::from_fn_with_state(
            SecurityHeaders::new(config.is_production()),
            security_headers_middleware,
        ))
        .with_state(state);

    Ok(app)
}

fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let methods = [Method::GET, Method::POST, Method::OPTIONS];

    let cors = if config.cors_origins().iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins()
            .iter()
            .map(|o| {
                o.parse::<HeaderValue>()
                    .map_err(|_| anyhow::anyhow!("Invalid CORS origin: {}", o))
            })
            .collect::<Result<Vec<_>, _>>()?;
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(methods)
            .allow_headers(Any)
    };
    Ok(cors)
}

fn public_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/live", get(health::liveness_check))
        .route(
            OPENAPI_PATH,
            get(|| async { Json(crate::api_doc::get_openapi_spec()) }),
        )
}

/// Mount point for stored files: `UPLOADS_BASE_URL` when it is a local path, otherwise
/// `/uploads` (the files are then expected to be served from that other host).
fn preview_prefix(config: &Config) -> Result<&str, anyhow::Error> {
    let base = config.uploads_base_url();
    if !base.starts_with('/') {
        return Ok(UPLOADS_PATH);
    }
    let base = base.trim_end_matches('/');
    if base.contains(['{', '}', '*']) {
        return Err(anyhow::anyhow!(
            "UPLOADS_BASE_URL cannot contain route wildcards: {}",
            base
        ));
    }
    Ok(base)
}

fn image_routes(preview_prefix: &str) -> Router<Arc<AppState>> {
    Router::new()
        .route(UPLOAD_PATH, post(handlers::upload::upload_image))
        .route(PROCESS_PATH, post(handlers::process::process_image))
        .route(
            &format!("{}/{{filename}}", preview_prefix),
            get(handlers::preview::get_upload),
        )
}
