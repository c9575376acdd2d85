//! Global Application State
//!
//! Reactive state management using Leptos signals.

use covid_compare::dashboard::{StatesMapping, StatesSource};
use leptos::*;
use std::sync::Arc;

/// Global application state provided to all components
#[derive(Clone, Copy)]
pub struct GlobalState {
    /// States feed as last fetched from the API; `None` until the first fetch
    pub feed: RwSignal<Option<Arc<StatesMapping>>>,
    /// When the feed was last replaced (ms since epoch)
    pub last_loaded: RwSignal<Option<i64>>,
    /// Requests in flight; see [`GlobalState::begin_request`]
    pub pending: RwSignal<u32>,
    /// Feed failure to display
    pub error: RwSignal<Option<String>>,
    /// Reload that skipped rows
    pub warning: RwSignal<Option<String>>,
    /// Feed update confirmation
    pub success: RwSignal<Option<String>>,
}

/// Marks one request in flight until dropped
#[must_use = "the request counts as finished once the guard is dropped"]
pub struct RequestGuard {
    pending: RwSignal<u32>,
}

impl Drop for RequestGuard {
    fn drop(&mut self) {
        self.pending.update(|n| *n = n.saturating_sub(1));
    }
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let state = GlobalState {
        feed: create_rw_signal(None),
        last_loaded: create_rw_signal(None),
        pending: create_rw_signal(0),
        error: create_rw_signal(None),
        warning: create_rw_signal(None),
        success: create_rw_signal(None),
    };

    provide_context(state);
}

impl GlobalState {
    /// Deliver a freshly fetched mapping. Always a new identity, so the page
    /// re-seeds its selection from it.
    pub fn deliver(&self, mapping: StatesMapping) {
        self.feed.set(Some(Arc::new(mapping)));
        self.last_loaded
            .set(Some(chrono::Utc::now().timestamp_millis()));
    }

    /// Count a request as in flight for as long as the guard lives
    pub fn begin_request(&self) -> RequestGuard {
        self.pending.update(|n| *n += 1);
        RequestGuard {
            pending: self.pending,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.pending.get() > 0
    }

    /// Number of states in the feed, if loaded
    pub fn state_count(&self) -> Option<usize> {
        self.feed.with(|feed| feed.as_ref().map(|m| m.len()))
    }

    /// Show a success message (auto-clears after timeout)
    pub fn show_success(&self, message: &str) {
        self.success.set(Some(message.to_string()));

        let success_signal = self.success;
        gloo_timers::callback::Timeout::new(3000, move || {
            success_signal.set(None);
        })
        .forget();
    }

    /// Show a partial-reload warning (auto-clears after timeout)
    pub fn show_warning(&self, message: &str) {
        web_sys::console::warn_1(&message.into());
        self.warning.set(Some(message.to_string()));

        let warning_signal = self.warning;
        gloo_timers::callback::Timeout::new(5000, move || {
            warning_signal.set(None);
        })
        .forget();
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        web_sys::console::error_1(&message.into());
        self.error.set(Some(message.to_string()));

        let error_signal = self.error;
        gloo_timers::callback::Timeout::new(5000, move || {
            error_signal.set(None);
        })
        .forget();
    }
}

/// The feed signal seen as the page's states source.
///
/// Reads are untracked; whoever owns the page subscribes to the signal and
/// calls `Page::sync` on change.
#[derive(Clone, Copy)]
pub struct SignalSource {
    feed: RwSignal<Option<Arc<StatesMapping>>>,
}

impl SignalSource {
    pub fn new(feed: RwSignal<Option<Arc<StatesMapping>>>) -> Self {
        Self { feed }
    }
}

impl StatesSource for SignalSource {
    fn current(&self) -> Option<Arc<StatesMapping>> {
        self.feed.get_untracked()
    }
}
