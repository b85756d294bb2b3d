//! Integration tests for the login/refresh/logout collaborators and the
//! refresh artifact lifecycle.

mod helpers;

use http::StatusCode;

use carelink_core::config::session::ConcurrencyPolicy;

#[tokio::test]
async fn test_login_sets_refresh_artifact() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "username": "guardian1",
                "password": "password123",
            })),
            None,
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert!(response.body["data"]["access_token"].is_string());

    let raw_cookie = response
        .cookies
        .iter()
        .find(|c| c.starts_with("carelink_refresh="))
        .expect("refresh cookie set");
    assert!(raw_cookie.contains("HttpOnly"));
    assert!(raw_cookie.contains("Secure"));
    assert!(raw_cookie.contains("SameSite=Strict"));
}

#[tokio::test]
async fn test_invalid_credentials_rejected() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "username": "guardian1",
                "password": "wrong",
            })),
            None,
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_rotates_artifact() {
    let app = helpers::TestApp::new().await;
    let (_, cookie) = app.login("guardian1", "password123").await;

    let response = app
        .request("POST", "/api/auth/refresh", None, None, Some(&cookie))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let new_token = response.body["data"]["access_token"]
        .as_str()
        .expect("fresh access token");
    let new_cookie = helpers::refresh_cookie_pair(&response.cookies).expect("rotated cookie");
    assert_ne!(new_cookie, cookie, "refresh secret must rotate");

    // The fresh credential authenticates.
    let me = app
        .request("GET", "/api/auth/me", None, Some(new_token), None)
        .await;
    assert_eq!(me.status, StatusCode::OK);
}

#[tokio::test]
async fn test_refresh_reuse_burns_session() {
    let app = helpers::TestApp::new().await;
    let (_, original_cookie) = app.login("guardian1", "password123").await;

    // First rotation succeeds and yields a fresh credential.
    let first = app
        .request(
            "POST",
            "/api/auth/refresh",
            None,
            None,
            Some(&original_cookie),
        )
        .await;
    assert_eq!(first.status, StatusCode::OK);
    let live_token = first.body["data"]["access_token"].as_str().unwrap().to_string();

    // Replaying the pre-rotation artifact is reuse: 401 with the
    // distinct security code, artifact cleared, session destroyed.
    let replay = app
        .request(
            "POST",
            "/api/auth/refresh",
            None,
            None,
            Some(&original_cookie),
        )
        .await;
    assert_eq!(replay.status, StatusCode::UNAUTHORIZED);
    assert_eq!(replay.body["error"], "REFRESH_REUSED");
    assert!(helpers::clears_refresh_cookie(&replay.cookies));

    // The legitimate session burned with it.
    let me = app
        .request("GET", "/api/auth/me", None, Some(&live_token), None)
        .await;
    assert_eq!(me.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_without_artifact_rejected() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request("POST", "/api/auth/refresh", None, None, None)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_after_logout_is_expired() {
    let app = helpers::TestApp::new().await;
    let (_, cookie) = app.login("guardian1", "password123").await;

    app.request("POST", "/api/auth/logout", None, None, Some(&cookie))
        .await;

    let response = app
        .request("POST", "/api/auth/refresh", None, None, Some(&cookie))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "SESSION_EXPIRED");
}

#[tokio::test]
async fn test_logout_clears_artifact_and_is_idempotent() {
    let app = helpers::TestApp::new().await;
    let (_, cookie) = app.login("guardian1", "password123").await;

    let first = app
        .request("POST", "/api/auth/logout", None, None, Some(&cookie))
        .await;
    assert_eq!(first.status, StatusCode::OK);
    assert!(helpers::clears_refresh_cookie(&first.cookies));

    // Logging out again with the same dead artifact is still a 200.
    let second = app
        .request("POST", "/api/auth/logout", None, None, Some(&cookie))
        .await;
    assert_eq!(second.status, StatusCode::OK);
}

#[tokio::test]
async fn test_block_new_policy_rejects_second_login() {
    let app = helpers::TestApp::with_policy(ConcurrencyPolicy::BlockNew).await;
    let (first_token, _) = app.login("guardian1", "password123").await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "username": "guardian1",
                "password": "password123",
            })),
            None,
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["error"], "ALREADY_LOGGED_IN");

    // The existing session is untouched.
    let me = app
        .request("GET", "/api/auth/me", None, Some(&first_token), None)
        .await;
    assert_eq!(me.status, StatusCode::OK);
}

#[tokio::test]
async fn test_sessions_are_per_user() {
    let app = helpers::TestApp::new().await;

    let (guardian_token, _) = app.login("guardian1", "password123").await;
    let (elder_token, _) = app.login("elder1", "password123").await;

    // One user's login never displaces another's session.
    let guardian_me = app
        .request("GET", "/api/auth/me", None, Some(&guardian_token), None)
        .await;
    assert_eq!(guardian_me.status, StatusCode::OK);

    let elder_me = app
        .request("GET", "/api/auth/me", None, Some(&elder_token), None)
        .await;
    assert_eq!(elder_me.status, StatusCode::OK);
    assert_eq!(elder_me.body["data"]["role"], "elderly");
}
