//! Catalog of account failures with fixed status and message.
//!
//! Services pick a variant when they detect the condition; the HTTP layer
//! renders it through [`crate::AppError`].

use std::fmt;

use axum::http::StatusCode;

/// Closed set of account-related failure conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserValidError {
    DuplicateUsername,
    InvalidUsernamePassword,
    UsernameNotFound,
}

impl UserValidError {
    pub const ALL: [UserValidError; 3] = [
        UserValidError::DuplicateUsername,
        UserValidError::InvalidUsernamePassword,
        UserValidError::UsernameNotFound,
    ];

    pub const fn status(&self) -> StatusCode {
        match self {
            UserValidError::DuplicateUsername => StatusCode::CONFLICT,
            UserValidError::InvalidUsernamePassword => StatusCode::UNAUTHORIZED,
            UserValidError::UsernameNotFound => StatusCode::NOT_FOUND,
        }
    }

    pub const fn message(&self) -> &'static str {
        match self {
            UserValidError::DuplicateUsername => "중복된 username입니다. 다른 username을 사용하세요.",
            UserValidError::InvalidUsernamePassword => "아아디 또는 비밀번호가 일치하지 않습니다.",
            UserValidError::UsernameNotFound => "해당 username의 회원이 존재하지 않습니다.",
        }
    }

    /// Stable variant name, e.g. `DUPLICATE_USERNAME`.
    pub const fn name(&self) -> &'static str {
        match self {
            UserValidError::DuplicateUsername => "DUPLICATE_USERNAME",
            UserValidError::InvalidUsernamePassword => "INVALID_USERNAME_PASSWORD",
            UserValidError::UsernameNotFound => "USERNAME_NOT_FOUND",
        }
    }
}

impl fmt::Display for UserValidError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
