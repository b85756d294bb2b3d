//! Route definitions for the CareLink HTTP API.
//!
//! All routes are mounted under `/api`. The session gate wraps the
//! entire API surface so every handler sees a populated `CurrentUser`
//! extension whenever the caller presented a live credential.

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{delete, get, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(admin_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::session_gate,
        ))
        .with_state(state)
}

/// Auth endpoints: login, refresh, logout, me
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/refresh", post(handlers::auth::refresh))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/me", get(handlers::auth::me))
}

/// Admin session management endpoints
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/admin/sessions/{user_id}",
            get(handlers::admin::get_user_session),
        )
        .route(
            "/admin/sessions/{user_id}",
            delete(handlers::admin::evict_user_session),
        )
}

/// Health endpoints
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
