//! State Management
//!
//! Global application state and the page's view of the states feed.

pub mod global;

pub use global::{provide_global_state, GlobalState, SignalSource};
