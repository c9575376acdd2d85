//! HTTP API Client
//!
//! Functions for communicating with the covid-compare REST API.

use covid_compare::dashboard::StatesMapping;
use gloo_net::http::{Request, Response};

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:8090/api/v1";

const API_URL_KEY: &str = "covid_compare_api_url";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_URL_KEY).ok().flatten())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    // Normalize: remove trailing slash
    url.trim_end_matches('/').to_string()
}

// ============ Response Types ============

#[derive(Debug, serde::Deserialize)]
pub struct StatesResponse {
    pub total: usize,
    pub states: StatesMapping,
}

#[derive(Debug, serde::Deserialize)]
pub struct ReloadResponse {
    pub status: String,
    pub total: usize,
    pub rows_failed: usize,
    #[serde(default)]
    pub errors: Vec<String>,
}

#[derive(Debug, serde::Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    message: String,
}

async fn error_message(response: Response) -> String {
    let status = response.status();
    response
        .json::<ErrorResponse>()
        .await
        .map(|e| e.error.message)
        .unwrap_or_else(|_| format!("Request failed ({})", status))
}

// ============ API Functions ============

/// Fetch the full states feed
pub async fn fetch_states() -> Result<StatesMapping, String> {
    let api_base = get_api_base();

    let response = Request::get(&format!("{}/states", api_base))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(error_message(response).await);
    }

    let result: StatesResponse = response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))?;

    web_sys::console::log_1(&format!("Fetched {} states", result.total).into());
    Ok(result.states)
}

/// Ask the server to re-read its states file
pub async fn reload_states() -> Result<ReloadResponse, String> {
    let api_base = get_api_base();

    let response = Request::post(&format!("{}/states/reload", api_base))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(error_message(response).await);
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}
