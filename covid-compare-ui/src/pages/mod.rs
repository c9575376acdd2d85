//! Page Components

pub mod compare;

pub use compare::{refresh_feed, Compare};
