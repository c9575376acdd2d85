//! States feed
//!
//! The inbound side of the dashboard: something that yields the current
//! [`StatesMapping`], or nothing while data is not ready. The `Arc` pointer
//! of a delivered mapping is its identity; publishing a new `Arc` counts as a
//! re-delivery even when the contents are equal.

use std::sync::{Arc, RwLock};

use super::types::StatesMapping;

/// Source of the states mapping observed by the page
pub trait StatesSource {
    /// The mapping currently on offer, or `None` while absent
    fn current(&self) -> Option<Arc<StatesMapping>>;
}

impl<T: StatesSource + ?Sized> StatesSource for Arc<T> {
    fn current(&self) -> Option<Arc<StatesMapping>> {
        (**self).current()
    }
}

impl<T: StatesSource + ?Sized> StatesSource for &T {
    fn current(&self) -> Option<Arc<StatesMapping>> {
        (**self).current()
    }
}

/// Shared, thread-safe feed. Clones observe the same slot.
#[derive(Debug, Clone, Default)]
pub struct StatesFeed {
    slot: Arc<RwLock<Option<Arc<StatesMapping>>>>,
}

impl StatesFeed {
    /// Create an empty feed
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a feed that already holds `mapping`
    pub fn with_mapping(mapping: StatesMapping) -> Self {
        let feed = Self::new();
        feed.publish(mapping);
        feed
    }

    /// Replace the current mapping and return the published handle
    pub fn publish(&self, mapping: StatesMapping) -> Arc<StatesMapping> {
        let mapping = Arc::new(mapping);
        let mut slot = self.slot.write().unwrap_or_else(|e| e.into_inner());
        *slot = Some(Arc::clone(&mapping));
        tracing::info!(states = mapping.len(), "States feed published");
        mapping
    }

    /// Withdraw the current mapping
    pub fn clear(&self) {
        let mut slot = self.slot.write().unwrap_or_else(|e| e.into_inner());
        if slot.take().is_some() {
            tracing::info!("States feed cleared");
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.slot
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }
}

impl StatesSource for StatesFeed {
    fn current(&self) -> Option<Arc<StatesMapping>> {
        self.slot.read().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::types::fixtures::ny_ca;

    #[test]
    fn test_empty_feed() {
        let feed = StatesFeed::new();
        assert!(!feed.is_loaded());
        assert!(feed.current().is_none());
    }

    #[test]
    fn test_publish_and_clear() {
        let feed = StatesFeed::new();
        let published = feed.publish(ny_ca());

        let current = feed.current().unwrap();
        assert!(Arc::ptr_eq(&published, &current));

        feed.clear();
        assert!(feed.current().is_none());
    }

    #[test]
    fn test_republish_changes_identity() {
        let feed = StatesFeed::with_mapping(ny_ca());
        let first = feed.current().unwrap();
        feed.publish(ny_ca());
        let second = feed.current().unwrap();

        assert_eq!(first, second);
        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_clones_share_slot() {
        let feed = StatesFeed::new();
        let observer = feed.clone();
        feed.publish(ny_ca());
        assert!(observer.is_loaded());
    }
}
