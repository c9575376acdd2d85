//! API Routes
//!
//! Route handlers organized by functionality.

pub mod health;
pub mod layout;
pub mod params;
pub mod states;
