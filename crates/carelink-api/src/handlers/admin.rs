//! Admin session management handlers.

use axum::Json;
use axum::extract::{Path, State};
use tracing::info;
use uuid::Uuid;

use carelink_core::types::UserId;

use crate::dto::response::{ApiResponse, MessageResponse, UserSessionResponse};
use crate::error::ApiError;
use crate::extractors::CurrentUser;
use crate::state::AppState;

/// GET /api/admin/sessions/{user_id}
pub async fn get_user_session(
    State(state): State<AppState>,
    auth: CurrentUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ApiResponse<UserSessionResponse>>, ApiError> {
    auth.require_admin()?;

    let session_id = state.authority.probe(UserId::from_uuid(user_id)).await?;
    Ok(Json(ApiResponse::ok(UserSessionResponse {
        active: session_id.is_some(),
        session_id: session_id.map(|sid| sid.to_string()),
    })))
}

/// DELETE /api/admin/sessions/{user_id}
pub async fn evict_user_session(
    State(state): State<AppState>,
    auth: CurrentUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    auth.require_admin()?;

    let target = UserId::from_uuid(user_id);
    state.authority.evict(target).await?;
    info!(admin = %auth.user_id, target = %target, "session evicted by administrator");

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "session evicted".to_string(),
    })))
}
