//! ImageCrop API Library
//!
//! This crate provides the HTTP handlers, services, and application setup for the
//! upload / process / preview service.

mod api_doc;
pub mod constants;
mod handlers;
pub mod services;
pub mod setup;
mod utils;

// Public modules
pub mod error;
pub mod state;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use state::AppState;
