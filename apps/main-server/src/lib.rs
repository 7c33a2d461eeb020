//! Todos Server
//!
//! Serves per-user todo lists over a JSON API, kept either in per-session
//! memory or in PostgreSQL.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod state;

use std::sync::Arc;

use auth::{JwtConfig, JwtManager, UserDirectory};
use axum::Router;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::Config;
use crate::state::{AppState, SharedState, StoreBackend};

/// Creates the application router with all routes configured.
pub fn create_app(state: SharedState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    api::create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Creates the application state.
///
/// Without a configured JWT secret a random one is generated, so tokens do
/// not survive a restart.
pub fn create_state(config: Config, backend: StoreBackend, users: UserDirectory) -> SharedState {
    let secret = config.jwt_secret.clone().unwrap_or_else(|| {
        tracing::warn!("TODOS_JWT_SECRET not set; using a per-process secret");
        format!(
            "{}{}",
            uuid::Uuid::new_v4().simple(),
            uuid::Uuid::new_v4().simple()
        )
    });
    let jwt_manager =
        JwtManager::new(JwtConfig::new(secret).with_expiration_hours(config.session_hours));

    Arc::new(AppState::new(config, backend, users, jwt_manager))
}

/// Initializes tracing with the given log level.
pub fn init_tracing(log_level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
