//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::dashboard::{ChartParam, ParamId, StatesMapping};
use crate::data::LoadReport;

// ============================================
// STATES DTOs
// ============================================

/// Full states feed
#[derive(Debug, Serialize)]
pub struct StatesResponse {
    /// Number of states
    pub total: usize,
    /// Mapping from state id to record
    pub states: Arc<StatesMapping>,
}

/// Result of `POST /states/reload`
#[derive(Debug, Serialize, Deserialize)]
pub struct ReloadResponse {
    /// "ok" or "partial" when some rows were rejected
    pub status: String,
    /// Number of states now published
    pub total: usize,
    pub rows_failed: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl From<LoadReport> for ReloadResponse {
    fn from(report: LoadReport) -> Self {
        let status = if report.rows_failed == 0 { "ok" } else { "partial" };
        Self {
            status: status.to_string(),
            total: report.total,
            rows_failed: report.rows_failed,
            errors: report.errors,
        }
    }
}

// ============================================
// PARAM DTOs
// ============================================

/// Chart parameters in display order
#[derive(Debug, Serialize)]
pub struct ParamsResponse {
    pub params: &'static [ChartParam],
    /// Parameter selected on page load
    pub default: ParamId,
}

// ============================================
// LAYOUT DTOs
// ============================================

/// Viewport size for `GET /layout`
#[derive(Debug, Deserialize)]
pub struct LayoutQuery {
    pub width: Option<f64>,
    pub height: Option<f64>,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health status
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "healthy" or "degraded"
    pub status: String,
    /// "loaded" or "absent"
    pub feed: String,
    pub states: usize,
    pub uptime_seconds: u64,
    pub version: String,
}
