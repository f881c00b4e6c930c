#![allow(dead_code)]

use axum::{
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode},
    Router,
};
use comment_service::config::DeepSeekConfig;
use comment_service::services::providers::deepseek::DeepSeekProvider;
use comment_service::services::providers::mock::MockChatProvider;
use comment_service::startup::{build_router, AppState};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub const TEST_API_KEY: &str = "test-api-key";

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("Response body is not JSON")
    }
}

/// Router backed by the mock provider; keep the `Arc` to inspect calls.
pub fn mock_router(provider: Arc<MockChatProvider>) -> Router {
    build_router(AppState::new(provider))
}

/// Router backed by the real provider, pointed at a wiremock server.
pub fn upstream_router(server_uri: &str, api_key: Option<&str>) -> Router {
    let mut config = DeepSeekConfig {
        api_url: format!("{}/chat/completions", server_uri),
        timeout_secs: 5,
        ..DeepSeekConfig::default()
    };
    if let Some(key) = api_key {
        config = config.with_api_key(key);
    }

    let provider = DeepSeekProvider::new(config).expect("Failed to build provider");
    build_router(AppState::new(Arc::new(provider)))
}

pub async fn send(router: Router, method: Method, uri: &str, body: Body) -> TestResponse {
    let response = router
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(body)
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();

    TestResponse {
        status,
        headers,
        body,
    }
}

pub async fn post_json(router: Router, uri: &str, body: &Value) -> TestResponse {
    send(router, Method::POST, uri, Body::from(body.to_string())).await
}

/// Header value as a string, panicking when absent.
pub fn header<'a>(response: &'a TestResponse, name: &str) -> &'a str {
    response
        .headers
        .get(name)
        .unwrap_or_else(|| panic!("missing header {}", name))
        .to_str()
        .unwrap()
}
