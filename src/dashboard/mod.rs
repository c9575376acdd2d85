//! Comparison dashboard core
//!
//! Pure, synchronous UI state for the state-comparison page. Compiles for
//! `wasm32-unknown-unknown` and is shared by the server, the CLI and the
//! browser crate.
//!
//! - [`types`]: states mapping and observations
//! - [`selection`]: immutable selection reducers
//! - [`params`]: chart display modes
//! - [`layout`]: viewport -> layout envelope
//! - [`chart`]: chart render props and geometry
//! - [`source`]: the inbound states feed
//! - [`page`]: the page composition state machine
//! - [`about`]: static About panel content

pub mod about;
pub mod chart;
pub mod error;
pub mod layout;
pub mod page;
pub mod params;
pub mod selection;
pub mod source;
pub mod types;

pub use about::{AboutEntry, AboutSection, ABOUT_SECTIONS, ABOUT_TITLE};
pub use chart::{ChartProps, Domain, Series};
pub use error::{DashboardError, DashboardResult};
pub use layout::{
    compute_layout_envelope, Bounds, LayoutConfig, LayoutEnvelope, Margin, Viewport, Wrapper,
};
pub use page::{NavbarProps, Page, PageEvent, PageState};
pub use params::{list_params, param, Accessor, ChartParam, ChartParams, Mark, ParamId, ScaleKind};
pub use selection::{deselect_all, select_all, selected_subset, toggle_one};
pub use source::{StatesFeed, StatesSource};
pub use types::{DailyObservation, StateId, StateRecord, StatesMapping};
