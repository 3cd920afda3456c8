//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use docbase_api::{AppState, build_app};
use docbase_core::config::AppConfig;
use docbase_core::traits::DocumentStore;
use docbase_database::MemoryDocumentStore;

/// Continuation header as clients send it.
pub const CONTINUATION: &str = "X-RequestContinuationToken";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Create a test application over a fresh in-memory store
    pub fn new() -> Self {
        Self::with_store(Arc::new(MemoryDocumentStore::new()))
    }

    /// Create a test application over the given store
    pub fn with_store(store: Arc<dyn DocumentStore>) -> Self {
        let mut config = AppConfig::default();
        config.store.max_item_count = 10;
        let router = build_app(AppState::new(config.clone(), store));
        Self { router, config }
    }

    /// Send a request with JSON body and extra headers
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        headers: &[(&str, &str)],
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        for (name, value) in headers {
            req = req.header(*name, *value);
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Create a user and return the response body
    pub async fn create_user(&self, name: &str, email: &str) -> Value {
        let response = self
            .request(
                "POST",
                "/api/users",
                Some(serde_json::json!({ "name": name, "email": email })),
                &[],
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.body
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body as JSON (Null when empty)
    pub body: Value,
}

impl TestResponse {
    /// Header value as a string
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}
