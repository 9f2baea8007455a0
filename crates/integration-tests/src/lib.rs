//! Integration tests for Sugarbook.
//!
//! Tests drive the assembled router in-process with
//! `tower::ServiceExt::oneshot` against the in-memory document store, so no
//! database or running server is needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p sugarbook-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `auth` - signup, login, bearer token handling, profile
//! - `tenancy` - records are invisible across accounts
//! - `recipes` - full replace and cost calculation
//! - `orders` - client snapshot, partial patch, ordering
//! - `dashboard` - statistics
//! - `uploads` - avatar and recipe images
//! - `health` - probes and request IDs

#![allow(clippy::missing_panics_doc)]

use std::path::Path;
use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use sugarbook_server::config::ServerConfig;
use sugarbook_server::db::MemoryDocumentStore;
use sugarbook_server::state::AppState;

/// High-entropy signing secret accepted by configuration validation.
pub const TEST_JWT_SECRET: &str = "aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6%";

/// Password used by [`TestApp::signup`].
pub const TEST_PASSWORD: &str = "correct horse battery staple";

const MULTIPART_BOUNDARY: &str = "sugarbook-test-boundary";

/// A fresh application with an empty memory store and its own uploads
/// directory.
pub struct TestApp {
    router: Router,
    uploads: TempDir,
}

/// Status, headers and decoded body of one response.
///
/// Bodies that are not JSON are kept as a JSON string.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

/// A signed-up account.
#[derive(Debug, Clone)]
pub struct Account {
    pub token: String,
    pub user: Value,
}

impl Account {
    #[must_use]
    pub fn id(&self) -> &str {
        self.user["id"].as_str().unwrap_or_default()
    }
}

impl TestApp {
    #[must_use]
    pub fn new() -> Self {
        let uploads = TempDir::new().expect("Failed to create uploads dir");
        let uploads_dir = uploads.path().to_string_lossy().into_owned();

        let config = ServerConfig::from_lookup(&|key: &str| match key {
            "SUGARBOOK_STORE" => Some("memory".to_owned()),
            "SUGARBOOK_JWT_SECRET" => Some(TEST_JWT_SECRET.to_owned()),
            "SUGARBOOK_UPLOADS_DIR" => Some(uploads_dir.clone()),
            "SUGARBOOK_MAX_UPLOAD_BYTES" => Some("65536".to_owned()),
            _ => None,
        })
        .expect("Failed to build test configuration");

        let state = AppState::new(config, Arc::new(MemoryDocumentStore::new()));
        Self {
            router: sugarbook_server::app(state),
            uploads,
        }
    }

    /// Directory uploaded files are written to.
    #[must_use]
    pub fn uploads_dir(&self) -> &Path {
        self.uploads.path()
    }

    /// Send one request. `body`, when given, is sent as JSON.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<&Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        self.send(request).await
    }

    pub async fn get(&self, uri: &str, token: &str) -> TestResponse {
        self.request(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: &str, body: &Value) -> TestResponse {
        self.request(Method::POST, uri, Some(token), Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: &str, body: &Value) -> TestResponse {
        self.request(Method::PUT, uri, Some(token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> TestResponse {
        self.request(Method::DELETE, uri, Some(token), None).await
    }

    /// Send a multipart request with a single part named `field`.
    pub async fn upload(
        &self,
        uri: &str,
        token: &str,
        field: &str,
        filename: &str,
        bytes: &[u8],
    ) -> TestResponse {
        let mut body = format!(
            "--{MULTIPART_BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(bytes);
        body.extend_from_slice(format!("\r\n--{MULTIPART_BOUNDARY}--\r\n").as_bytes());

        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
            )
            .body(Body::from(body))
            .expect("Failed to build request");

        self.send(request).await
    }

    /// Register `name` <`email`> with [`TEST_PASSWORD`].
    pub async fn signup(&self, name: &str, email: &str) -> Account {
        let response = self
            .request(
                Method::POST,
                "/api/auth/signup",
                None,
                Some(&serde_json::json!({
                    "name": name,
                    "email": email,
                    "password": TEST_PASSWORD,
                })),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "signup failed: {:?}", response.body);

        Account {
            token: response.body["access_token"]
                .as_str()
                .expect("signup returned no token")
                .to_owned(),
            user: response.body["user"].clone(),
        }
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");
        let body = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}
