//! Account API gateway.
//!
//! Serves the HTTP API over the user service: signup and login, the caller's
//! own profile, and role-gated account administration.

pub mod cli;
pub mod config;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use std::net::SocketAddr;

use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use common::{AppError, AppResult};
use user_service_lib::Services;

use crate::config::GatewayConfig;
use crate::routes::create_router;
use crate::state::AppState;

/// Build the full application router, including request tracing.
pub fn build_app(state: AppState) -> Router {
    create_router(state).layer(TraceLayer::new_for_http())
}

/// Run the HTTP server with the given configuration.
pub async fn run_server(config: GatewayConfig) -> AppResult<()> {
    let services = Services::from_config(&config.service).await?;
    let app = build_app(AppState::new(services));

    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .map_err(|e| AppError::internal(format!("Invalid listen address: {}", e)))?;
    info!(store = ?config.service.store, "Gateway listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;
    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    Ok(())
}
