//! States Routes
//!
//! - GET /api/v1/states - The whole feed
//! - GET /api/v1/states/:id - One state
//! - POST /api/v1/states/reload - Re-read the states file

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{ReloadResponse, StatesResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::dashboard::{StateRecord, StatesMapping, StatesSource};

fn current_feed(state: &AppState) -> ApiResult<Arc<StatesMapping>> {
    state
        .feed
        .current()
        .ok_or_else(|| ApiError::ServiceUnavailable("States feed not loaded".to_string()))
}

/// GET /api/v1/states
pub async fn list_states(State(state): State<Arc<AppState>>) -> ApiResult<Json<StatesResponse>> {
    let states = current_feed(&state)?;
    Ok(Json(StatesResponse {
        total: states.len(),
        states,
    }))
}

/// GET /api/v1/states/:id
pub async fn get_state(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<StateRecord>> {
    let states = current_feed(&state)?;
    states
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("State '{}'", id)))
}

/// POST /api/v1/states/reload
///
/// Parses the file off the async runtime, then publishes the result as a new
/// feed value. A failed reload leaves the current feed untouched.
pub async fn reload_states(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ReloadResponse>> {
    let loader = state
        .loader
        .clone()
        .ok_or_else(|| ApiError::ServiceUnavailable("No states file configured".to_string()))?;

    let _guard = state.reload_lock.lock().await;

    let path = loader.path().to_path_buf();
    let loaded = tokio::task::spawn_blocking(move || loader.load())
        .await
        .map_err(|e| ApiError::Internal(format!("Reload task failed: {}", e)))??;

    state.feed.publish(loaded.mapping);
    tracing::info!(
        path = %path.display(),
        states = loaded.report.total,
        rejected = loaded.report.rows_failed,
        "States feed reloaded"
    );

    Ok(Json(loaded.report.into()))
}
