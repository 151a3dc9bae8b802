//! Router assembly and shared handler state.

use std::path::Path;
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{handlers, services::credential_service::CredentialService};

/// State shared with every handler.
///
/// The store handle lives inside the credential service; nothing here is global.
#[derive(Debug, Clone)]
pub struct AppState {
    pub credentials: Arc<CredentialService>,
}

impl AppState {
    pub fn new(credentials: CredentialService) -> Self {
        Self {
            credentials: Arc::new(credentials),
        }
    }
}

/// Build the HTTP router.
///
/// Key endpoints are matched first; any other path is served from `static_dir`.
pub fn router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/generate", post(handlers::keys::generate_key))
        .route("/validate", post(handlers::keys::validate_key))
        .route("/keys", get(handlers::keys::list_keys))
        .route("/revoke", post(handlers::keys::revoke_key))
        .fallback_service(ServeDir::new(static_dir.as_ref()))
        // Request spans carry method and URI only; bodies are never recorded
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
