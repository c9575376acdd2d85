//! covid-compare REST API
//!
//! HTTP API layer publishing the states feed to the browser, built with Axum.
//!
//! # Endpoints
//!
//! ## States
//! - `GET /api/v1/states` - Full states feed (503 until loaded)
//! - `GET /api/v1/states/:id` - A single state
//! - `POST /api/v1/states/reload` - Re-read the states file and republish
//!
//! ## Chart
//! - `GET /api/v1/params` - Chart parameters in display order
//! - `GET /api/v1/layout?width=&height=` - Layout envelope for a viewport
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! When `api.ui_dir` is set, the built browser UI is served for every other
//! path.
//!
//! # Example
//!
//! ```rust,ignore
//! use covid_compare::api::{serve, AppState};
//! use covid_compare::config::Config;
//! use covid_compare::dashboard::StatesFeed;
//! use covid_compare::data::StatesLoader;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let feed = StatesFeed::new();
//!     let loader = StatesLoader::new(&config.data.states_file);
//!     loader.load_into(&feed)?;
//!
//!     let state = AppState::new(feed, config.api.clone(), config.layout.clone())
//!         .with_loader(loader);
//!     serve(state).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    services::{ServeDir, ServeFile},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ApiConfig;

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/states", get(routes::states::list_states))
        .route("/states/reload", post(routes::states::reload_states))
        .route("/states/:id", get(routes::states::get_state))
        .route("/params", get(routes::params::get_params))
        .route("/layout", get(routes::layout::get_layout));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let config = Arc::clone(&state.config);
    let shared_state = Arc::new(state);

    let mut router = Router::new()
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes);

    if let Some(ui_dir) = &config.ui_dir {
        tracing::info!("Serving UI from {:?}", ui_dir);
        let index = ServeFile::new(ui_dir.join("index.html"));
        router = router.fallback_service(ServeDir::new(ui_dir).fallback(index));
    }

    router
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.request_timeout_secs,
        )))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config))
        .with_state(shared_state)
}

/// CORS for the configured origins; no origins means any origin
fn cors_layer(config: &ApiConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    if config.cors_origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(origins))
}

/// Start the API server
pub async fn serve(state: AppState) -> Result<(), ApiError> {
    let addr = state.config.addr();
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("covid-compare API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("covid-compare API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::dto::ReloadResponse;
    use crate::dashboard::{LayoutConfig, StatesFeed, StatesSource};
    use crate::data::StatesLoader;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        response::Response,
    };
    use std::io::Write;
    use tempfile::NamedTempFile;
    use tower::util::ServiceExt;

    const STATES_CSV: &str = "\
state,name,population,date,day,cases,new_cases,cases_per_1000
NY,New York,19453561,2020-03-01,1,1,1,0.000051
NY,New York,19453561,2020-03-02,2,1,0,0.000051
CA,California,39512223,2020-01-26,1,1,1,0.000025
";

    fn states_file() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(STATES_CSV.as_bytes()).unwrap();
        file
    }

    /// Router plus a handle on its feed; the temp file must outlive the test
    fn create_test_app(loaded: bool) -> (Router, StatesFeed, NamedTempFile) {
        let file = states_file();
        let loader = StatesLoader::new(file.path());
        let feed = StatesFeed::new();
        if loaded {
            loader.load_into(&feed).unwrap();
        }

        let state = AppState::new(feed.clone(), ApiConfig::default(), LayoutConfig::default())
            .with_loader(loader);

        (build_router(state), feed, file)
    }

    async fn get_uri(app: Router, uri: &str) -> Response {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_live() {
        let (app, _feed, _file) = create_test_app(false);
        let response = get_uri(app, "/health/live").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_ready_follows_feed() {
        let (app, _feed, _file) = create_test_app(false);
        let response = get_uri(app, "/health/ready").await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let (app, _feed, _file) = create_test_app(true);
        let response = get_uri(app, "/health/ready").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_full() {
        let (app, _feed, _file) = create_test_app(true);
        let response = get_uri(app, "/health").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json(response).await;
        assert_eq!(body["feed"], "loaded");
        assert_eq!(body["states"], 2);
    }

    #[tokio::test]
    async fn test_states_unavailable_before_load() {
        let (app, _feed, _file) = create_test_app(false);
        let response = get_uri(app, "/api/v1/states").await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let body = json(response).await;
        assert_eq!(body["error"]["code"], "SERVICE_UNAVAILABLE");
        assert!(body["request_id"].is_string());
    }

    #[tokio::test]
    async fn test_list_states() {
        let (app, _feed, _file) = create_test_app(true);
        let response = get_uri(app, "/api/v1/states").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json(response).await;
        assert_eq!(body["total"], 2);
        assert_eq!(body["states"]["NY"]["observations"][1]["day"], 2);
        assert_eq!(body["states"]["CA"]["selected"], false);
    }

    #[tokio::test]
    async fn test_get_state() {
        let (app, _feed, _file) = create_test_app(true);
        let response = get_uri(app.clone(), "/api/v1/states/CA").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json(response).await["name"], "California");

        let response = get_uri(app, "/api/v1/states/TX").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_reload_publishes_new_identity() {
        let (app, feed, _file) = create_test_app(true);
        let before = feed.current().unwrap();

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/states/reload")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body: ReloadResponse = serde_json::from_value(json(response).await).unwrap();
        assert_eq!(body.status, "ok");
        assert_eq!(body.total, 2);

        let after = feed.current().unwrap();
        assert_eq!(before, after);
        assert!(!Arc::ptr_eq(&before, &after));
    }

    #[tokio::test]
    async fn test_params_order() {
        let (app, _feed, _file) = create_test_app(false);
        let response = get_uri(app, "/api/v1/params").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json(response).await;
        let ids: Vec<&str> = body["params"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["cases-per-1000", "total-cases-log", "new-cases"]);
        assert_eq!(body["default"], "cases-per-1000");
    }

    #[tokio::test]
    async fn test_layout() {
        let (app, _feed, _file) = create_test_app(false);
        let response = get_uri(app, "/api/v1/layout?width=1000&height=1000").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json(response).await;
        assert_eq!(body["wrapper"]["wrapper_width"], 900.0);
        assert_eq!(body["bounds"]["width"], 700.0);
        assert_eq!(body["bounds"]["height"], 620.0);
    }

    #[tokio::test]
    async fn test_layout_validation() {
        for uri in [
            "/api/v1/layout",
            "/api/v1/layout?width=1000",
            "/api/v1/layout?width=wide&height=10",
            "/api/v1/layout?width=-5&height=10",
        ] {
            let (app, _feed, _file) = create_test_app(false);
            let response = get_uri(app, uri).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", uri);
        }
    }
}
