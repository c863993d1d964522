//! Common test utilities for API testing with mocks.
//!
//! The fixture builds the full router in-process with a mock movie API and a
//! mock library injected, so tests need no TMDB key or library backend.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use cinelog_core::testing::{MockLibrary, MockMovieApi};
use cinelog_core::{create_authenticator, load_config_from_str};
use cinelog_server::api::create_router;
use cinelog_server::state::AppState;

/// Re-export fixtures for test convenience
pub use cinelog_core::testing::fixtures;

/// Token accepted by the bearer fixture.
pub const TEST_TOKEN: &str = "test-session-token";

/// In-process server with controllable movie API and library mocks.
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock movie API - register movies, inject failures
    pub movies: MockMovieApi,
    /// Mock library - seed bookmarks and watched entries, inject failures
    pub library: MockLibrary,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Value,
}

impl TestFixture {
    /// Fixture using bearer authentication.
    pub fn new() -> Self {
        Self::with_auth("bearer")
    }

    /// Fixture with the given auth method ("none" or "bearer").
    pub fn with_auth(method: &str) -> Self {
        let config = load_config_from_str(&format!(
            r#"
            [auth]
            method = "{method}"

            [server]
            port = 8080
            public_base_url = "http://cinelog.test"

            [tmdb]
            api_key = "test-key"

            [library]
            base_url = "http://library.invalid"
            "#
        ))
        .expect("Failed to parse test config");

        let movies = MockMovieApi::new();
        let library = MockLibrary::new();

        let state = Arc::new(AppState::new(
            config.clone(),
            Arc::from(create_authenticator(&config.auth)),
            Arc::new(movies.clone()),
            Arc::new(library.clone()),
        ));

        Self {
            router: create_router(state),
            movies,
            library,
        }
    }

    /// GET as the anonymous viewer.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None, None).await
    }

    /// GET as the signed-in test viewer.
    pub async fn get_signed_in(&self, path: &str) -> TestResponse {
        self.request("GET", path, None, Some(TEST_TOKEN)).await
    }

    /// POST as the anonymous viewer.
    pub async fn post(&self, path: &str, body: Option<Value>) -> TestResponse {
        self.request("POST", path, body, None).await
    }

    /// POST as the signed-in test viewer.
    pub async fn post_signed_in(&self, path: &str, body: Option<Value>) -> TestResponse {
        self.request("POST", path, body, Some(TEST_TOKEN)).await
    }

    /// Send a request to the test server.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);

        if let Some(token) = token {
            request_builder = request_builder.header("Authorization", format!("Bearer {token}"));
        }

        let body = if let Some(json_body) = body {
            request_builder = request_builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json_body).unwrap())
        } else {
            Body::empty()
        };

        let request = request_builder.body(body).unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

impl TestResponse {
    /// Messages of all notices in the response.
    pub fn notice_messages(&self) -> Vec<String> {
        self.body["notices"]
            .as_array()
            .map(|notices| {
                notices
                    .iter()
                    .filter_map(|n| n["message"].as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }
}
