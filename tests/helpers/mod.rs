//! Shared test helpers for integration tests.
//!
//! Every test app runs against the in-memory store with a static
//! identity table, so the full login → gate → refresh → logout loop is
//! exercised without external services.

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use carelink_api::{AppState, build_router};
use carelink_core::config::AppConfig;
use carelink_core::config::auth::StaticUserConfig;
use carelink_core::config::session::ConcurrencyPolicy;
use carelink_core::types::Role;

/// Fixed identity for the test guardian user.
pub const GUARDIAN_ID: Uuid = Uuid::from_u128(0x11);
/// Fixed identity for the test admin user.
pub const ADMIN_ID: Uuid = Uuid::from_u128(0x22);
/// Fixed identity for the test elderly user.
pub const ELDER_ID: Uuid = Uuid::from_u128(0x33);

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Application state for direct assertions
    pub state: AppState,
}

/// A collected response: status, parsed JSON body, Set-Cookie values.
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
    pub cookies: Vec<String>,
}

impl TestApp {
    /// Create a test application with the default (kick-old) policy.
    pub async fn new() -> Self {
        Self::with_policy(ConcurrencyPolicy::KickOld).await
    }

    /// Create a test application with an explicit concurrency policy.
    pub async fn with_policy(policy: ConcurrencyPolicy) -> Self {
        let mut config = AppConfig::default();
        config.store.provider = "memory".to_string();
        config.auth.token_secret = "integration-test-secret".to_string();
        config.session.concurrency_policy = policy;
        config.auth.static_users = vec![
            StaticUserConfig {
                username: "guardian1".to_string(),
                password: "password123".to_string(),
                role: Role::Guardian,
                user_id: Some(GUARDIAN_ID),
            },
            StaticUserConfig {
                username: "admin1".to_string(),
                password: "password123".to_string(),
                role: Role::Admin,
                user_id: Some(ADMIN_ID),
            },
            StaticUserConfig {
                username: "elder1".to_string(),
                password: "password123".to_string(),
                role: Role::Elderly,
                user_id: Some(ELDER_ID),
            },
        ];

        let state = AppState::from_config(config)
            .await
            .expect("failed to build test state");

        Self {
            router: build_router(state.clone()),
            state,
        }
    }

    /// Issue a request against the router.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
        cookie: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .expect("request build"),
            None => builder.body(Body::empty()).expect("request build"),
        };

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("request should not fail at the transport level");

        let status = response.status();
        let cookies = response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok().map(String::from))
            .collect();

        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body collect")
            .to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse {
            status,
            body,
            cookies,
        }
    }

    /// Log a static user in, returning the access token and the refresh
    /// cookie in `name=value` form.
    pub async fn login(&self, username: &str, password: &str) -> (String, String) {
        let response = self
            .request(
                "POST",
                "/api/auth/login",
                Some(serde_json::json!({
                    "username": username,
                    "password": password,
                })),
                None,
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "login should succeed");

        let token = response.body["data"]["access_token"]
            .as_str()
            .expect("access token in login response")
            .to_string();
        let cookie = refresh_cookie_pair(&response.cookies).expect("refresh cookie in login response");
        (token, cookie)
    }
}

/// Pull the `carelink_refresh=...` pair out of Set-Cookie headers.
pub fn refresh_cookie_pair(cookies: &[String]) -> Option<String> {
    cookies
        .iter()
        .find(|c| c.starts_with("carelink_refresh="))
        .and_then(|c| c.split(';').next())
        .map(String::from)
}

/// Whether any Set-Cookie header discards the refresh artifact.
pub fn clears_refresh_cookie(cookies: &[String]) -> bool {
    cookies
        .iter()
        .any(|c| c.starts_with("carelink_refresh=") && c.contains("Max-Age=0"))
}
