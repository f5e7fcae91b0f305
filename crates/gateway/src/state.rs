//! Application state for dependency injection.

use std::sync::Arc;

use common::{AccessDeniedHandler, JsonAccessDeniedHandler};
use user_service_lib::infra::Database;
use user_service_lib::service::{AuthService, UserService};
use user_service_lib::Services;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserService>,
    pub auth: Arc<dyn AuthService>,
    pub access_denied: Arc<dyn AccessDeniedHandler>,
    pub database: Option<Database>,
}

impl AppState {
    /// Create state with the default JSON denial responder.
    pub fn new(services: Services) -> Self {
        Self::with_denied_handler(services, Arc::new(JsonAccessDeniedHandler))
    }

    pub fn with_denied_handler(
        services: Services,
        access_denied: Arc<dyn AccessDeniedHandler>,
    ) -> Self {
        Self {
            users: services.users,
            auth: services.auth,
            access_denied,
            database: services.database,
        }
    }
}
