//! Layout routes

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::LayoutQuery;
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::dashboard::{compute_layout_envelope, LayoutEnvelope, Viewport};

fn dimension(name: &str, value: Option<f64>) -> ApiResult<f64> {
    match value {
        Some(v) if v.is_finite() && v >= 0.0 => Ok(v),
        Some(v) => Err(ApiError::Validation(format!(
            "{} must be a non-negative number, got {}",
            name, v
        ))),
        None => Err(ApiError::Validation(format!("missing {}", name))),
    }
}

/// GET /api/v1/layout?width=&height=
///
/// Envelope for the given viewport using the server's layout config.
pub async fn get_layout(
    State(state): State<Arc<AppState>>,
    query: Result<Query<LayoutQuery>, QueryRejection>,
) -> ApiResult<Json<LayoutEnvelope>> {
    let Query(query) = query.map_err(|e| ApiError::Validation(e.body_text()))?;

    let viewport = Viewport::new(
        dimension("width", query.width)?,
        dimension("height", query.height)?,
    );

    Ok(Json(compute_layout_envelope(viewport, &state.layout)))
}
