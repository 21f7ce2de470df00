//! Janus Auth API
//!
//! Authentication microservice: login, refresh token rotation with reuse
//! detection, logout, and access-token identity checks.

mod config;
mod error;
mod extractors;
mod handlers;
mod state;

use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use janus_auth_core::AuthService;
use janus_db::{create_pool, Repositories};

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting Janus Auth API");

    let config = Config::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    let repos = Repositories::new(pool.clone());

    let auth = AuthService::new(
        config.auth.clone(),
        Arc::new(repos.users),
        Arc::new(repos.refresh_tokens),
    );

    let state = AppState::new(auth, pool);

    let app = Router::new()
        .route("/health", get(handlers::health))
        .route("/ready", get(handlers::ready))
        .route("/api/v1/auth/login", post(handlers::login))
        .route("/api/v1/auth/refresh", post(handlers::refresh))
        .route("/api/v1/auth/logout", post(handlers::logout))
        .route("/api/v1/auth/me", get(handlers::me))
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
