//! API Key Service - Main Application Entry Point
//!
//! # Startup Flow
//!
//! 1. Load and validate configuration from environment variables
//! 2. Confirm the OS random source works
//! 3. Create database connection pool
//! 4. Apply the `api_keys` schema
//! 5. Build HTTP router and start server on configured port
//!
//! Any failure before step 5 exits the process without serving traffic.

use std::sync::Arc;

use api_key_service::{
    app::{self, AppState},
    config::Config,
    db,
    services::{credential_service::CredentialService, hasher::KeyHasher, key_generator},
    store::PgKeyStore,
};
use tracing_subscriber::EnvFilter;

/// Secrets shorter than this still start the service, with a warning.
const RECOMMENDED_SECRET_LEN: usize = 32;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Reads RUST_LOG environment variable (defaults to "info" level)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;
    tracing::info!(?config, "Configuration loaded");

    let secret = config.signing_secret()?;
    if secret.len() < RECOMMENDED_SECRET_LEN {
        tracing::warn!(
            "HMAC_SECRET is shorter than {} bytes; use a longer random value",
            RECOMMENDED_SECRET_LEN
        );
    }
    let hasher = KeyHasher::new(secret)?;

    key_generator::check_random_source()?;

    let pool = db::create_pool(&config.database_url, config.database_max_connections).await?;
    tracing::info!("Database pool created");

    db::run_migrations(&pool).await?;
    tracing::info!("Database schema ready");

    let store = Arc::new(PgKeyStore::new(pool));
    let state = AppState::new(CredentialService::new(store, hasher));
    let app = app::router(state, &config.static_dir);

    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
