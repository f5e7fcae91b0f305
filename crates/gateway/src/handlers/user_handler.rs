//! Handlers for the caller's own account.

use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::Json,
    routing::{get, put},
    Router,
};

use common::AppResult;
use domain::{ChangePasswordRequest, ProfileUpdate, ProfileView};

use crate::extractors::ValidatedJson;
use crate::middleware::CurrentUser;
use crate::state::AppState;

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(get_profile).put(update_profile).delete(delete_account))
        .route("/me/password", put(change_password))
}

/// Profile of the authenticated user
#[utoipa::path(
    get,
    path = "/users/me",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user profile", body = ProfileView),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_profile(Extension(current): Extension<CurrentUser>) -> Json<ProfileView> {
    Json(current.to_profile_view())
}

/// Edit the authenticated user's profile
#[utoipa::path(
    put,
    path = "/users/me",
    tag = "Users",
    security(("bearer_auth" = [])),
    request_body = ProfileUpdate,
    responses(
        (status = 200, description = "Profile updated", body = ProfileView),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    ValidatedJson(update): ValidatedJson<ProfileUpdate>,
) -> AppResult<Json<ProfileView>> {
    let user = state.users.update_profile(&current.username, update).await?;
    Ok(Json(user.to_profile_view()))
}

/// Delete the authenticated user's account
#[utoipa::path(
    delete,
    path = "/users/me",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Account deleted"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn delete_account(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> AppResult<StatusCode> {
    state.users.delete_account(&current.username).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Change the authenticated user's password
#[utoipa::path(
    put,
    path = "/users/me/password",
    tag = "Users",
    security(("bearer_auth" = [])),
    request_body = ChangePasswordRequest,
    responses(
        (status = 204, description = "Password changed"),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized or wrong current password")
    )
)]
pub async fn change_password(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    ValidatedJson(request): ValidatedJson<ChangePasswordRequest>,
) -> AppResult<StatusCode> {
    state.users.change_password(&current.username, request).await?;
    Ok(StatusCode::NO_CONTENT)
}
