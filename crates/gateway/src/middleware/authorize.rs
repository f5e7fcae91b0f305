//! Role checks for protected route groups.

use axum::{
    extract::{OriginalUri, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use common::{AccessDenied, AppError};
use domain::{UserDetails, ROLE_ADMIN};

use crate::middleware::CurrentUser;
use crate::state::AppState;

/// Let the request through only when the current user holds `ROLE_ADMIN`.
///
/// Must run after [`auth_middleware`](super::auth_middleware).
pub async fn require_admin(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let granted = match request.extensions().get::<CurrentUser>() {
        Some(user) => user.has_authority(ROLE_ADMIN),
        None => return AppError::Unauthorized.into_response(),
    };

    if granted {
        return next.run(request).await;
    }

    let path = request_path(&request);
    state
        .access_denied
        .handle(&path, &AccessDenied::missing_authority(ROLE_ADMIN))
}

/// Full request path, including any prefix stripped by nesting.
fn request_path(request: &Request) -> String {
    request
        .extensions()
        .get::<OriginalUri>()
        .map(|uri| uri.path().to_owned())
        .unwrap_or_else(|| request.uri().path().to_owned())
}
