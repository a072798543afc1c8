/// Common test utilities for integration tests
///
/// This module provides shared infrastructure for integration tests:
/// - A mock Jira site (httpmock) per test
/// - Configuration pointing the app at that site
/// - Request helpers returning status and parsed JSON

use axum::body::Body;
use axum::http::{Request, StatusCode};
use httpmock::MockServer;
use trackboard_api::app::{build_router, AppState};
use trackboard_api::config::Config;
use tower::Service as _;

/// Test context containing all necessary resources
pub struct TestContext {
    pub jira: MockServer,
    pub app: axum::Router,
    pub config: Config,
}

impl TestContext {
    /// Creates a context with default settings
    pub async fn new() -> anyhow::Result<Self> {
        Self::with_env(&[]).await
    }

    /// Creates a context with extra environment-style settings
    ///
    /// The mock site URL and Basic credentials are always provided.
    pub async fn with_env(vars: &[(&str, &str)]) -> anyhow::Result<Self> {
        let jira = MockServer::start_async().await;
        let base_url = jira.base_url();

        let config = Config::from_lookup(|key| {
            if let Some((_, value)) = vars.iter().find(|(k, _)| *k == key) {
                return Some(value.to_string());
            }
            match key {
                "JIRA_BASE_URL" => Some(base_url.clone()),
                "JIRA_EMAIL" => Some("dev@example.com".to_string()),
                "JIRA_API_TOKEN" => Some("token".to_string()),
                _ => None,
            }
        })?;

        let state = AppState::new(config.clone())?;
        let app = build_router(state);

        Ok(TestContext { jira, app, config })
    }

    /// Sends a GET request and returns the status and JSON body
    pub async fn get(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap();

        let response = self.app.clone().call(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if body.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&body).unwrap_or_else(|_| {
                panic!("non-JSON body: {}", String::from_utf8_lossy(&body))
            })
        };

        (status, json)
    }
}
