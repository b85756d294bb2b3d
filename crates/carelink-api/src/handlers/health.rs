//! Health check handler.

use axum::Json;
use axum::extract::State;

use carelink_core::traits::store::SessionStore;

use crate::dto::response::HealthResponse;
use crate::state::AppState;

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let store_ok = state.store.health_check().await.unwrap_or(false);
    Json(HealthResponse {
        status: if store_ok { "ok" } else { "degraded" }.to_string(),
        store: store_ok,
    })
}
