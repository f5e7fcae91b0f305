//! Access-denial responder.
//!
//! Invoked once per request the authorization layer rejects for an already
//! authenticated principal. The reply uses status 401 even though the
//! condition is a denial of access rather than missing authentication.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::response::ErrorResponse;

/// Message reported for every denied request.
pub const ACCESS_DENIED_MESSAGE: &str = "접근 권한이 없습니다.";

/// Authorization failure on an authenticated principal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("access denied: {reason}")]
pub struct AccessDenied {
    pub reason: String,
}

impl AccessDenied {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// Denial caused by a missing authority.
    pub fn missing_authority(authority: &str) -> Self {
        Self::new(format!("missing authority {}", authority))
    }
}

/// Turns an authorization rejection into the client-visible response.
pub trait AccessDeniedHandler: Send + Sync {
    fn handle(&self, path: &str, denied: &AccessDenied) -> Response;
}

/// Writes the fixed JSON denial body.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonAccessDeniedHandler;

impl JsonAccessDeniedHandler {
    /// Body sent for a denied request on `path`.
    pub fn payload(path: impl Into<String>) -> ErrorResponse {
        ErrorResponse::new(
            StatusCode::UNAUTHORIZED,
            vec![ACCESS_DENIED_MESSAGE.to_string()],
            path,
        )
    }
}

impl AccessDeniedHandler for JsonAccessDeniedHandler {
    fn handle(&self, path: &str, denied: &AccessDenied) -> Response {
        tracing::warn!(path, reason = %denied.reason, "Access denied");
        Self::payload(path).into_response()
    }
}
