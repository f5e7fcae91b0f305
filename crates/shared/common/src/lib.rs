//! Common utilities shared across the workspace crates.
//!
//! This crate provides:
//! - Unified error handling rendered as a JSON error payload
//! - The catalog of account failures
//! - The access-denial responder
//! - Configuration structures

pub mod catalog;
pub mod config;
pub mod denied;
pub mod error;
pub mod response;

pub use catalog::UserValidError;
pub use config::{DatabaseConfig, JwtConfig};
pub use denied::{AccessDenied, AccessDeniedHandler, JsonAccessDeniedHandler, ACCESS_DENIED_MESSAGE};
pub use error::{AppError, AppResult, OptionExt};
pub use response::{status_name, ErrorResponse, JSON_UTF8};
