//! Health check handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;

use crate::state::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub store: ServiceHealth,
}

/// Store health with optional error message.
#[derive(Debug, Serialize)]
pub struct ServiceHealth {
    pub kind: &'static str,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Create health routes.
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(health_check))
}

/// Health check endpoint - pings the database when one is configured.
pub async fn health_check(State(state): State<AppState>) -> Response {
    let store = match &state.database {
        Some(db) => match db.ping().await {
            Ok(()) => ServiceHealth {
                kind: "database",
                status: "healthy".to_string(),
                error: None,
            },
            Err(e) => ServiceHealth {
                kind: "database",
                status: "unhealthy".to_string(),
                error: Some(e.to_string()),
            },
        },
        None => ServiceHealth {
            kind: "memory",
            status: "healthy".to_string(),
            error: None,
        },
    };

    let healthy = store.status == "healthy";
    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        store,
    };

    if healthy {
        (StatusCode::OK, Json(response)).into_response()
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, Json(response)).into_response()
    }
}
