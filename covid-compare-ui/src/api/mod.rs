//! API access

pub mod client;

pub use client::{fetch_states, get_api_base, reload_states};
