//! Page composition
//!
//! Owns the dashboard's UI state and wires it together:
//! source -> local selection -> chart parameter -> layout -> render props.
//!
//! The page is a two-state machine. It starts `Uninitialized` and becomes
//! `Ready` each time its source delivers a mapping with a new identity,
//! replacing whatever the user had selected before. When the source goes
//! absent the local selection is dropped and the page is `Uninitialized`
//! again. Selection edits while `Uninitialized` are ignored.

use std::sync::Arc;

use super::about::{AboutSection, ABOUT_SECTIONS};
use super::chart::ChartProps;
use super::error::{DashboardError, DashboardResult};
use super::layout::{compute_layout_envelope, LayoutConfig, LayoutEnvelope, Viewport};
use super::params::{ChartParam, ChartParams};
use super::selection;
use super::source::StatesSource;
use super::types::StatesMapping;

/// Lifecycle of the local selection state
#[derive(Debug, Clone, PartialEq)]
pub enum PageState {
    Uninitialized,
    Ready { selection: StatesMapping },
}

/// Every event the page reacts to
#[derive(Debug, Clone)]
pub enum PageEvent {
    /// The source emitted a new value (or went absent)
    SourceChanged(Option<Arc<StatesMapping>>),
    ToggleOne { state_id: String, checked: bool },
    SelectAll,
    DeselectAll,
    ParamChanged(String),
    Resized(Viewport),
}

/// Props for the navigation/selection panel.
///
/// The panel's callbacks map onto [`PageEvent`]s: `on_param_change` ->
/// `ParamChanged`, `on_toggle_one` -> `ToggleOne`, `on_select_all` ->
/// `SelectAll`, `on_deselect_all` -> `DeselectAll`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavbarProps<'a> {
    pub chart_params: &'static [ChartParam],
    pub current_param: &'static ChartParam,
    /// `None` while the feed has not been delivered
    pub selected_states: Option<&'a StatesMapping>,
}

/// The comparison page
#[derive(Debug)]
pub struct Page<S> {
    source: S,
    /// Last feed value applied, kept for identity comparison
    delivered: Option<Arc<StatesMapping>>,
    state: PageState,
    params: ChartParams,
    layout_config: LayoutConfig,
    envelope: LayoutEnvelope,
}

impl<S: StatesSource> Page<S> {
    /// Mount the page: compute the initial layout and pull the source once
    pub fn new(source: S, layout_config: LayoutConfig, viewport: Viewport) -> Self {
        let envelope = compute_layout_envelope(viewport, &layout_config);
        let mut page = Self {
            source,
            delivered: None,
            state: PageState::Uninitialized,
            params: ChartParams::new(),
            layout_config,
            envelope,
        };
        page.sync();
        page
    }

    /// Pull the source and apply any transition. Returns whether the page
    /// state changed.
    pub fn sync(&mut self) -> bool {
        let feed = self.source.current();
        self.receive(feed)
    }

    /// Apply a feed value. A new identity re-seeds the selection; `None`
    /// tears it down. Returns whether the page state changed.
    pub fn receive(&mut self, feed: Option<Arc<StatesMapping>>) -> bool {
        match (&self.delivered, feed) {
            (None, None) => false,
            (Some(prev), Some(next)) if Arc::ptr_eq(prev, &next) => false,
            (_, Some(next)) => {
                tracing::debug!(states = next.len(), "Seeding selection from states feed");
                self.state = PageState::Ready {
                    selection: (*next).clone(),
                };
                self.delivered = Some(next);
                true
            }
            (Some(_), None) => {
                tracing::debug!("States feed withdrawn, clearing selection");
                self.state = PageState::Uninitialized;
                self.delivered = None;
                true
            }
        }
    }

    /// Apply one event. Events must be dispatched in the order they occur.
    pub fn dispatch(&mut self, event: PageEvent) -> DashboardResult<()> {
        match event {
            PageEvent::SourceChanged(feed) => {
                self.receive(feed);
            }
            PageEvent::ToggleOne { state_id, checked } => {
                self.toggle_one(&state_id, checked)?;
            }
            PageEvent::SelectAll => self.select_all(),
            PageEvent::DeselectAll => self.deselect_all(),
            PageEvent::ParamChanged(id) => self.set_param(&id),
            PageEvent::Resized(viewport) => self.resize(viewport),
        }
        Ok(())
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

impl<S> Page<S> {
    pub fn state(&self) -> &PageState {
        &self.state
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, PageState::Ready { .. })
    }

    /// The local selection, if the feed has been delivered
    pub fn selection(&self) -> DashboardResult<&StatesMapping> {
        match &self.state {
            PageState::Ready { selection } => Ok(selection),
            PageState::Uninitialized => Err(DashboardError::UnseededStateAccess),
        }
    }

    /// Set one state's selection flag.
    ///
    /// Ignored while `Uninitialized`; an unknown state id is an error.
    pub fn toggle_one(&mut self, state_id: &str, checked: bool) -> DashboardResult<()> {
        self.update_selection(|m| selection::toggle_one(m, state_id, checked))
    }

    pub fn select_all(&mut self) {
        // Infallible reducer; only the unseeded guard can trip
        let _ = self.update_selection(|m| Ok(selection::select_all(m)));
    }

    pub fn deselect_all(&mut self) {
        let _ = self.update_selection(|m| Ok(selection::deselect_all(m)));
    }

    fn update_selection<F>(&mut self, reduce: F) -> DashboardResult<()>
    where
        F: FnOnce(&StatesMapping) -> DashboardResult<StatesMapping>,
    {
        let current = match self.selection() {
            Ok(selection) => selection,
            Err(DashboardError::UnseededStateAccess) => {
                tracing::debug!("Ignoring selection change before the states feed arrived");
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        let next = reduce(current)?;
        self.state = PageState::Ready { selection: next };
        Ok(())
    }

    pub fn params(&self) -> &ChartParams {
        &self.params
    }

    /// Change the chart parameter; unknown ids are ignored
    pub fn set_param(&mut self, param_id: &str) {
        self.params.set_current(param_id);
    }

    /// Recompute the layout for a new viewport size
    pub fn resize(&mut self, viewport: Viewport) {
        self.envelope = compute_layout_envelope(viewport, &self.layout_config);
        tracing::trace!(
            width = self.envelope.bounds.width,
            height = self.envelope.bounds.height,
            "Layout recomputed"
        );
    }

    pub fn envelope(&self) -> &LayoutEnvelope {
        &self.envelope
    }

    pub fn layout_config(&self) -> &LayoutConfig {
        &self.layout_config
    }

    pub fn navbar_props(&self) -> NavbarProps<'_> {
        NavbarProps {
            chart_params: self.params.list(),
            current_param: self.params.current(),
            selected_states: self.selection().ok(),
        }
    }

    /// Chart props, or `None` while the feed has not been delivered
    pub fn chart_props(&self) -> Option<ChartProps> {
        let selection = self.selection().ok()?;
        Some(ChartProps::new(
            self.params.current(),
            selection::selected_subset(selection),
            self.envelope,
        ))
    }

    pub fn about(&self) -> &'static [AboutSection] {
        ABOUT_SECTIONS
    }
}
