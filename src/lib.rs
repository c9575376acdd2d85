//! # covid-compare
//!
//! COVID-19 state comparison dashboard: outbreak trajectories of U.S. states
//! aligned by day of outbreak rather than calendar date.
//!
//! ## Modules
//!
//! - [`dashboard`]: UI state core (selection, chart parameters, layout, page
//!   composition). Pure and synchronous; builds for wasm.
//! - [`data`]: CSV loader for the states feed *(server)*
//! - [`config`]: TOML + environment configuration *(server)*
//! - [`logging`]: `tracing` subscriber setup *(server)*
//! - [`api`]: REST API server with Axum *(server)*
//!
//! Everything except [`dashboard`] sits behind the default `server` feature.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use covid_compare::dashboard::*;
//! use covid_compare::data::StatesLoader;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let feed = StatesFeed::new();
//!     StatesLoader::new("data/states.csv").load_into(&feed)?;
//!
//!     let mut page = Page::new(feed, LayoutConfig::default(), Viewport::new(1280.0, 800.0));
//!     page.select_all();
//!     page.set_param("total-cases-log");
//!
//!     if let Some(chart) = page.chart_props() {
//!         for series in chart.series() {
//!             println!("{}: {} days", series.name, series.points.len());
//!         }
//!     }
//!     Ok(())
//! }
//! ```

pub mod dashboard;

#[cfg(feature = "server")]
pub mod api;
#[cfg(feature = "server")]
pub mod config;
#[cfg(feature = "server")]
pub mod data;
#[cfg(feature = "server")]
pub mod logging;

// Re-export top-level types for convenience
pub use dashboard::{
    ChartParam, ChartProps, DashboardError, DashboardResult, LayoutConfig, LayoutEnvelope, Page,
    PageEvent, PageState, ParamId, StateRecord, StatesFeed, StatesMapping, StatesSource, Viewport,
};

#[cfg(feature = "server")]
pub use api::{build_router, serve, ApiError, AppState};

#[cfg(feature = "server")]
pub use config::{ApiConfig, Config, ConfigError, DataConfig, LogFormat, LoggingConfig};

#[cfg(feature = "server")]
pub use data::{DataError, LoadReport, StatesLoader};
