//! States feed loading
//!
//! Turns the per-state CSV on disk into the in-memory feed the dashboard
//! observes.

pub mod error;
pub mod loader;

pub use error::{DataError, DataResult};
pub use loader::{load_str, LoadReport, LoadedStates, StatesLoader};
