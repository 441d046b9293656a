//! ImageCrop Infrastructure Library
//!
//! Shared plumbing for the HTTP service:
//! - Middleware (request ID, security headers)
//! - Tracing initialization
//! - The JSON error envelope

pub mod error;
pub mod middleware;
pub mod telemetry;

pub use error::ErrorResponse;
pub use middleware::{
    request_id_middleware, security_headers_middleware, RequestId, SecurityHeaders,
};
pub use telemetry::{init_telemetry, shutdown_telemetry};
