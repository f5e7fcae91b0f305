//! Authentication middleware.

use std::ops::Deref;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};

use common::AppError;
use domain::{User, UserDetails};

use crate::state::AppState;

/// Authenticated principal, loaded from the store on every request.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl Deref for CurrentUser {
    type Target = User;

    fn deref(&self) -> &User {
        &self.0
    }
}

/// Resolve the bearer token to a stored user and expose it as [`CurrentUser`].
pub async fn auth_middleware(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let TypedHeader(Authorization(bearer)) = bearer.ok_or(AppError::Unauthorized)?;

    let user = state.auth.authenticate(bearer.token()).await?;
    if !user.account_status().is_usable() {
        tracing::warn!(username = %user.username, "Rejected unusable account");
        return Err(AppError::Unauthorized);
    }

    request.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(request).await)
}
