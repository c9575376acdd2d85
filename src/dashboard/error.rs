//! Dashboard error types
//!
//! Both variants are caller-contract violations. The page composition guards
//! them so nothing here is ever shown to an end user.

use thiserror::Error;

use super::types::StateId;

/// Errors raised by the selection logic and the page composition
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DashboardError {
    /// A selection toggle referenced a state the mapping does not contain
    #[error("State not found: {0}")]
    KeyNotFound(StateId),

    /// The selection was accessed before the states feed was delivered
    #[error("Selection state accessed before the states feed was delivered")]
    UnseededStateAccess,
}

/// Result type alias for dashboard operations
pub type DashboardResult<T> = Result<T, DashboardError>;
