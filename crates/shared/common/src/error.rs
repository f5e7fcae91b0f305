//! Unified error handling for the HTTP boundary.
//!
//! Every variant renders as an [`ErrorResponse`]. The request path is not
//! known here; the gateway fills it in on the way out.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use domain::{DomainError, FieldViolation};
use thiserror::Error;

use crate::catalog::UserValidError;
use crate::denied::{AccessDenied, JsonAccessDeniedHandler};
use crate::response::ErrorResponse;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication & Authorization
    #[error("Authentication required")]
    Unauthorized,

    #[error(transparent)]
    AccessDenied(#[from] AccessDenied),

    // Catalogued account failures
    #[error("{}", .0.message())]
    Account(UserValidError),

    // Resource errors
    #[error("Resource not found")]
    NotFound,

    // Validation
    #[error("Validation failed")]
    Validation(Vec<FieldViolation>),

    #[error("Invalid input: {0}")]
    BadRequest(String),

    // External service errors
    #[cfg(feature = "database")]
    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    #[cfg(feature = "jwt")]
    #[error("Authentication error")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

impl AppError {
    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized | AppError::AccessDenied(_) => StatusCode::UNAUTHORIZED,
            #[cfg(feature = "jwt")]
            AppError::Jwt(_) => StatusCode::UNAUTHORIZED,
            AppError::Account(entry) => entry.status(),
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-facing messages (hides internal details)
    pub fn user_messages(&self) -> Vec<String> {
        match self {
            AppError::Validation(violations) => {
                violations.iter().map(|v| v.message.clone()).collect()
            }
            AppError::BadRequest(msg) => vec![msg.clone()],
            AppError::Account(entry) => vec![entry.message().to_string()],

            // Hide details for internal/security errors
            #[cfg(feature = "database")]
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                vec!["A database error occurred".to_string()]
            }
            #[cfg(feature = "jwt")]
            AppError::Jwt(e) => {
                tracing::debug!("JWT error: {:?}", e);
                vec!["Invalid or expired token".to_string()]
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                vec!["An internal error occurred".to_string()]
            }

            // Use default message for others
            _ => vec![self.to_string()],
        }
    }

    /// Error body without a request path.
    pub fn to_error_response(&self) -> ErrorResponse {
        match self {
            AppError::AccessDenied(_) => JsonAccessDeniedHandler::payload(""),
            _ => ErrorResponse::new(self.status(), self.user_messages(), ""),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.to_error_response().into_response()
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<UserValidError> for AppError {
    fn from(entry: UserValidError) -> Self {
        AppError::Account(entry)
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(violations) => AppError::Validation(violations),
            DomainError::Password(msg) | DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::NotFound)
    }
}

/// Convenience constructors
impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        AppError::BadRequest(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
