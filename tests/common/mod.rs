//! Test application setup utilities.
//!
//! Builds the real router over an in-memory key store and drives it with
//! `tower::ServiceExt::oneshot`, so no database or socket is needed.

use std::sync::Arc;

use api_key_service::{
    app::{self, AppState},
    services::{credential_service::CredentialService, hasher::KeyHasher},
    store::InMemoryKeyStore,
};
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use tower::ServiceExt;

pub const TEST_SECRET: &str = "integration-test-signing-secret";

/// Test application wrapper.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemoryKeyStore>,
    pub hasher: KeyHasher,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryKeyStore::new());
        let hasher = KeyHasher::new(TEST_SECRET).expect("valid test secret");
        let state = AppState::new(CredentialService::new(store.clone(), hasher.clone()));
        let router = app::router(state, "tests/no-static-dir");

        Self {
            router,
            store,
            hasher,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(
            Request::builder()
                .method("GET")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    pub async fn post_json(&self, uri: &str, body: serde_json::Value) -> TestResponse {
        self.post_raw(uri, &body.to_string()).await
    }

    pub async fn post_raw(&self, uri: &str, body: &str) -> TestResponse {
        self.request(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    pub async fn post_empty(&self, uri: &str) -> TestResponse {
        self.request(
            Request::builder()
                .method("POST")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    /// Generate a key through the API and return `(kid, apiKey)`.
    pub async fn generate(&self, body: serde_json::Value) -> (String, String) {
        let response = self.post_json("/generate", body).await;
        response.assert_status(StatusCode::OK);

        let json = response.json();
        (
            json["kid"].as_str().unwrap().to_string(),
            json["apiKey"].as_str().unwrap().to_string(),
        )
    }

    pub async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");

        TestResponse {
            status,
            body: body.to_vec(),
        }
    }
}

/// Response from a test request.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("Failed to parse response as JSON")
    }

    pub fn assert_status(&self, expected: StatusCode) -> &Self {
        assert_eq!(
            self.status,
            expected,
            "Expected status {}, got {}. Body: {}",
            expected,
            self.status,
            self.text()
        );
        self
    }
}
