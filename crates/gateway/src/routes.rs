//! Route configuration.

use axum::{middleware, Router};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::{AppError, AppResult};

use crate::handlers::{admin_routes, auth_routes, health_routes, user_routes};
use crate::middleware::{attach_request_path, auth_middleware, require_admin};
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check (no auth)
        .nest("/health", health_routes())
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Signup and login (no auth)
        .nest("/auth", auth_routes())
        // Own account (auth required)
        .nest(
            "/users",
            user_routes().route_layer(middleware::from_fn_with_state(
                state.clone(),
                auth_middleware,
            )),
        )
        // Administration (auth, then ROLE_ADMIN)
        .nest(
            "/admin",
            admin_routes()
                .route_layer(middleware::from_fn_with_state(
                    state.clone(),
                    require_admin,
                ))
                .route_layer(middleware::from_fn_with_state(
                    state.clone(),
                    auth_middleware,
                )),
        )
        .fallback(not_found)
        .layer(middleware::from_fn(attach_request_path))
        .with_state(state)
}

async fn not_found() -> AppResult<()> {
    Err(AppError::NotFound)
}
