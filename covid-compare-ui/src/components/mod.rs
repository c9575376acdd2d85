//! UI Components
//!
//! Leptos components composed by the compare page.

pub mod about;
pub mod chart;
pub mod loading;
pub mod navbar;
pub mod toast;

pub use about::About;
pub use chart::Chart;
pub use loading::{ChartSkeleton, InlineLoading};
pub use navbar::Navbar;
pub use toast::Toast;
