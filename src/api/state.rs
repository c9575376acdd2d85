//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;

use crate::config::ApiConfig;
use crate::dashboard::{LayoutConfig, StatesFeed};
use crate::data::StatesLoader;

/// Shared application state for all handlers
pub struct AppState {
    /// States feed published to clients
    pub feed: StatesFeed,
    /// Source of reloads; `None` when the feed is fed some other way
    pub loader: Option<StatesLoader>,
    /// Proportions used by `GET /layout`
    pub layout: LayoutConfig,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
    /// Serializes reloads
    pub(crate) reload_lock: Mutex<()>,
}

impl AppState {
    pub fn new(feed: StatesFeed, config: ApiConfig, layout: LayoutConfig) -> Self {
        Self {
            feed,
            loader: None,
            layout,
            config: Arc::new(config),
            start_time: Instant::now(),
            reload_lock: Mutex::new(()),
        }
    }

    /// Attach the loader used by `POST /states/reload`
    pub fn with_loader(mut self, loader: StatesLoader) -> Self {
        self.loader = Some(loader);
        self
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
