//! HTTP middleware.

mod auth;
mod authorize;
mod error_path;

pub use auth::{auth_middleware, CurrentUser};
pub use authorize::require_admin;
pub use error_path::attach_request_path;
