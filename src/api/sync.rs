//! Sync counter and ping endpoints.

use axum::{extract::State, Json};

use super::ApiResult;
use crate::models::{PingResponse, SyncVersion};
use crate::AppState;

/// GET /api/sync/version - Current room mutation counter.
pub async fn get_sync_version(State(state): State<AppState>) -> ApiResult<SyncVersion> {
    let version = state.repo.sync_version().await?;
    Ok(Json(SyncVersion { version }))
}

/// GET /api/ping - Configured liveness message.
pub async fn ping(State(state): State<AppState>) -> Json<PingResponse> {
    Json(PingResponse {
        message: state.config.ping_message.clone(),
    })
}
