//! Integration tests for the health endpoint.

mod helpers;

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use serde_json::Value;

use docbase_core::error::AppError;
use docbase_core::result::AppResult;
use docbase_core::traits::DocumentStore;
use docbase_core::types::{DocumentQuery, ETag, FeedOptions, FeedPage, StoredDocument};

use helpers::TestApp;

/// Store whose every call reports the backend as down.
#[derive(Debug)]
struct UnreachableStore;

fn down() -> AppError {
    AppError::service_unavailable("store unreachable")
}

#[async_trait]
impl DocumentStore for UnreachableStore {
    async fn insert(&self, _: &str, _: &str, _: &str, _: Value) -> AppResult<StoredDocument> {
        Err(down())
    }

    async fn read(&self, _: &str, _: &str, _: &str) -> AppResult<Option<StoredDocument>> {
        Err(down())
    }

    async fn query(&self, _: &str, _: &DocumentQuery, _: &FeedOptions) -> AppResult<FeedPage> {
        Err(down())
    }

    async fn replace(
        &self,
        _: &str,
        _: &str,
        _: &str,
        _: Value,
        _: &ETag,
    ) -> AppResult<StoredDocument> {
        Err(down())
    }

    async fn delete(&self, _: &str, _: &str, _: &str) -> AppResult<bool> {
        Err(down())
    }

    async fn health_check(&self) -> AppResult<bool> {
        Err(down())
    }

    fn backend_name(&self) -> &'static str {
        "unreachable"
    }
}

#[tokio::test]
async fn test_health_reports_backend() {
    let app = TestApp::new();
    let response = app.request("GET", "/api/health", None, &[]).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["store"], "memory");
    assert!(response.body["version"].is_string());
}

#[tokio::test]
async fn test_health_unavailable_when_store_down() {
    let app = TestApp::with_store(Arc::new(UnreachableStore));
    let response = app.request("GET", "/api/health", None, &[]).await;

    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.body["status"], "unavailable");
}

#[tokio::test]
async fn test_store_outage_maps_to_503() {
    let app = TestApp::with_store(Arc::new(UnreachableStore));
    let response = app.request("GET", "/api/users/any", None, &[]).await;

    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.body["error"], "SERVICE_UNAVAILABLE");
}
