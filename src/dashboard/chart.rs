//! Chart render props
//!
//! Everything the chart renderer consumes, plus the geometry helpers that turn
//! a state's observations into points inside the drawing bounds. Drawing
//! itself happens in the browser crate.

use serde::Serialize;

use super::layout::{Bounds, LayoutEnvelope, Wrapper};
use super::params::{ChartParam, ScaleKind};
use super::types::{StateId, StatesMapping};

/// Props handed to the chart renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartProps {
    pub current_param: &'static ChartParam,
    /// Only the states with `selected == true`
    pub selected_states: StatesMapping,
    pub wrapper: Wrapper,
    pub bounds: Bounds,
}

/// One plotted line: (day of outbreak, value) pairs for a state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub state_id: StateId,
    pub name: String,
    pub points: Vec<(u32, f64)>,
}

impl Series {
    pub fn last(&self) -> Option<(u32, f64)> {
        self.points.last().copied()
    }
}

/// Data extent across all series
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Domain {
    pub max_day: u32,
    pub min_value: f64,
    pub max_value: f64,
}

impl ChartProps {
    pub fn new(
        current_param: &'static ChartParam,
        selected_states: StatesMapping,
        envelope: LayoutEnvelope,
    ) -> Self {
        Self {
            current_param,
            selected_states,
            wrapper: envelope.wrapper,
            bounds: envelope.bounds,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.selected_states.is_empty()
    }

    /// One series per selected state, in id order
    pub fn series(&self) -> Vec<Series> {
        self.selected_states
            .iter()
            .map(|record| Series {
                state_id: record.id.clone(),
                name: record.name.clone(),
                points: record
                    .observations
                    .iter()
                    .filter_map(|obs| {
                        self.current_param
                            .plot_value(obs)
                            .map(|value| (obs.day, value))
                    })
                    .collect(),
            })
            .collect()
    }

    /// Extent of `series`, or `None` when there is nothing to plot
    pub fn domain(series: &[Series]) -> Option<Domain> {
        let mut points = series.iter().flat_map(|s| s.points.iter()).peekable();
        points.peek()?;

        let mut domain = Domain {
            max_day: 0,
            min_value: f64::INFINITY,
            max_value: f64::NEG_INFINITY,
        };
        for &(day, value) in points {
            domain.max_day = domain.max_day.max(day);
            domain.min_value = domain.min_value.min(value);
            domain.max_value = domain.max_value.max(value);
        }
        Some(domain)
    }

    /// Map a data point into drawing-bound coordinates (origin top-left of
    /// the bounds, y growing downward).
    pub fn project(&self, domain: &Domain, day: u32, value: f64) -> Option<(f64, f64)> {
        if !self.bounds.is_drawable() {
            return None;
        }

        let x = if domain.max_day <= 1 {
            0.0
        } else {
            (day.saturating_sub(1)) as f64 / (domain.max_day - 1) as f64 * self.bounds.width
        };

        let fraction = match self.current_param.scale {
            ScaleKind::Linear => {
                let (lo, hi) = linear_extent(domain);
                (value - lo) / (hi - lo)
            }
            ScaleKind::Log => {
                if value <= 0.0 {
                    return None;
                }
                let (lo, hi) = log_extent(domain);
                (value.log10() - lo) / (hi - lo)
            }
        };

        Some((x, self.bounds.height * (1.0 - fraction)))
    }

    /// Tick values for the y axis
    pub fn y_ticks(&self, domain: &Domain, count: usize) -> Vec<f64> {
        match self.current_param.scale {
            ScaleKind::Linear => {
                let (lo, hi) = linear_extent(domain);
                let count = count.max(1);
                (0..=count)
                    .map(|i| lo + (hi - lo) * i as f64 / count as f64)
                    .collect()
            }
            ScaleKind::Log => {
                let (lo, hi) = log_extent(domain);
                (lo.floor() as i32..=hi.ceil() as i32)
                    .map(|exp| 10f64.powi(exp))
                    .collect()
            }
        }
    }
}

/// Linear extent always includes zero and never collapses to a point
fn linear_extent(domain: &Domain) -> (f64, f64) {
    let lo = domain.min_value.min(0.0);
    let hi = domain.max_value.max(0.0);
    if hi > lo {
        (lo, hi)
    } else {
        (lo, lo + 1.0)
    }
}

/// Log extent in decades, rounded out to whole powers of ten
fn log_extent(domain: &Domain) -> (f64, f64) {
    let lo = domain.min_value.max(1.0).log10().floor();
    let hi = domain.max_value.max(1.0).log10().ceil();
    if hi > lo {
        (lo, hi)
    } else {
        (lo, lo + 1.0)
    }
}
