//! Chart parameter routes

use axum::Json;

use crate::api::dto::ParamsResponse;
use crate::dashboard::{list_params, ChartParams};

/// GET /api/v1/params
pub async fn get_params() -> Json<ParamsResponse> {
    Json(ParamsResponse {
        params: list_params(),
        default: ChartParams::default().current_id(),
    })
}
