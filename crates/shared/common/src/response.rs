//! JSON error payload returned for every failure at the HTTP boundary.

use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

/// Content type of every error body.
pub const JSON_UTF8: &str = "application/json; charset=UTF-8";

/// Error body: `{"status", "errorType", "messages", "path"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub status: u16,
    pub error_type: String,
    pub messages: Vec<String>,
    pub path: String,
}

impl ErrorResponse {
    pub fn new(status: StatusCode, messages: Vec<String>, path: impl Into<String>) -> Self {
        Self {
            status: status.as_u16(),
            error_type: status_name(status),
            messages,
            path: path.into(),
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

/// Upper snake case name of a status, e.g. `NOT_FOUND`.
pub fn status_name(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map(|reason| reason.to_uppercase().replace([' ', '-'], "_"))
        .unwrap_or_else(|| status.as_u16().to_string())
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let mut response = match serde_json::to_vec(&self) {
            Ok(body) => (
                status,
                [(CONTENT_TYPE, HeaderValue::from_static(JSON_UTF8))],
                body,
            )
                .into_response(),
            Err(e) => {
                tracing::error!("Failed to serialize error body: {}", e);
                status.into_response()
            }
        };
        // Marks the body as ours so outer layers can fill in the path
        response.extensions_mut().insert(self);
        response
    }
}
