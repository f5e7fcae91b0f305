//! OpenAPI documentation.

use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use crate::handlers::admin_handler::{MembershipRequest, RolesRequest, UserSummary};
use crate::handlers::auth_handler::LoginRequest;
use domain::{ChangePasswordRequest, Membership, ProfileUpdate, ProfileView, SignUpRequest};
use user_service_lib::service::TokenResponse;

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::auth_handler::sign_up,
        crate::handlers::auth_handler::login,
        crate::handlers::user_handler::get_profile,
        crate::handlers::user_handler::update_profile,
        crate::handlers::user_handler::delete_account,
        crate::handlers::user_handler::change_password,
        crate::handlers::admin_handler::list_users,
        crate::handlers::admin_handler::update_roles,
        crate::handlers::admin_handler::update_membership,
        crate::handlers::admin_handler::delete_user,
    ),
    components(
        schemas(
            SignUpRequest,
            LoginRequest,
            TokenResponse,
            ProfileView,
            ProfileUpdate,
            ChangePasswordRequest,
            Membership,
            MembershipRequest,
            UserSummary,
            RolesRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration and login"),
        (name = "Users", description = "Own account endpoints"),
        (name = "Admin", description = "Account administration"),
    )
)]
pub struct ApiDoc;

/// Security scheme modifier.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
