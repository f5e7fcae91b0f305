//! Account administration handlers (`ROLE_ADMIN` only).

use std::collections::BTreeSet;

use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, put},
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use common::{AppError, AppResult};
use domain::{Membership, User};

use crate::extractors::{ValidatedJson, ValidatedPath};
use crate::middleware::CurrentUser;
use crate::state::AppState;

/// Account summary shown to administrators
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserSummary {
    pub id: i64,
    #[schema(example = "alice")]
    pub username: String,
    pub membership: Membership,
    #[schema(example = json!(["ROLE_USER"]))]
    pub roles: BTreeSet<String>,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id.unwrap_or_default(),
            username: user.username,
            membership: user.membership,
            roles: user.roles,
        }
    }
}

/// Replacement role set
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RolesRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    #[schema(example = json!(["ROLE_USER", "ROLE_ADMIN"]))]
    pub roles: BTreeSet<String>,
}

/// New membership tier
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct MembershipRequest {
    pub membership: Membership,
}

/// Create admin routes
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/:id", delete(delete_user))
        .route("/users/:id/roles", put(update_roles))
        .route("/users/:id/membership", put(update_membership))
}

/// List every account
#[utoipa::path(
    get,
    path = "/admin/users",
    tag = "Admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All accounts", body = Vec<UserSummary>),
        (status = 401, description = "Not authenticated or not an administrator")
    )
)]
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<UserSummary>>> {
    let users = state.users.list_users().await?;
    Ok(Json(users.into_iter().map(UserSummary::from).collect()))
}

/// Replace an account's roles
#[utoipa::path(
    put,
    path = "/admin/users/{id}/roles",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "User ID")),
    request_body = RolesRequest,
    responses(
        (status = 200, description = "Roles replaced", body = UserSummary),
        (status = 400, description = "Empty or malformed role set"),
        (status = 401, description = "Not authenticated or not an administrator"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_roles(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<i64>,
    ValidatedJson(request): ValidatedJson<RolesRequest>,
) -> AppResult<Json<UserSummary>> {
    let user = state.users.update_roles(id, request.roles).await?;
    Ok(Json(UserSummary::from(user)))
}

/// Move an account to another membership tier
#[utoipa::path(
    put,
    path = "/admin/users/{id}/membership",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "User ID")),
    request_body = MembershipRequest,
    responses(
        (status = 200, description = "Membership changed", body = UserSummary),
        (status = 400, description = "Unknown tier or malformed id"),
        (status = 401, description = "Not authenticated or not an administrator"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_membership(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<i64>,
    ValidatedJson(request): ValidatedJson<MembershipRequest>,
) -> AppResult<Json<UserSummary>> {
    let user = state.users.update_membership(id, request.membership).await?;
    Ok(Json(UserSummary::from(user)))
}

/// Delete an account
#[utoipa::path(
    delete,
    path = "/admin/users/{id}",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 204, description = "Account deleted"),
        (status = 400, description = "Cannot delete own account"),
        (status = 401, description = "Not authenticated or not an administrator"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    ValidatedPath(id): ValidatedPath<i64>,
) -> AppResult<StatusCode> {
    if current.id == Some(id) {
        return Err(AppError::bad_request("Cannot delete your own account"));
    }

    state.users.delete_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
