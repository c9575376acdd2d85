//! Layout envelope
//!
//! Derives the chart's outer wrapper and inner drawing bounds from the
//! viewport size. Recomputed on mount and on every resize.

use serde::{Deserialize, Serialize};

/// Viewport size in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Proportions used to size the chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Wrapper width as a fraction of the viewport width
    pub width_fraction: f64,
    /// Wrapper height as a fraction of the viewport height
    pub height_fraction: f64,
    pub margin_top: f64,
    pub margin_bottom: f64,
    /// Left and right margins, each as a fraction of the viewport width
    pub side_margin_fraction: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width_fraction: 0.9,
            height_fraction: 0.9,
            margin_top: 80.0,
            margin_bottom: 200.0,
            side_margin_fraction: 0.1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// Outer drawing surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wrapper {
    pub wrapper_width: f64,
    pub wrapper_height: f64,
    pub margin: Margin,
}

/// Inner drawing area: wrapper minus margins
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    /// Whether there is any area left to draw in
    pub fn is_drawable(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutEnvelope {
    pub wrapper: Wrapper,
    pub bounds: Bounds,
}

/// Compute the envelope for a viewport.
///
/// Degenerate viewports are not rejected; they yield non-positive bounds.
pub fn compute_layout_envelope(viewport: Viewport, config: &LayoutConfig) -> LayoutEnvelope {
    let side = viewport.width * config.side_margin_fraction;
    let wrapper = Wrapper {
        wrapper_width: viewport.width * config.width_fraction,
        wrapper_height: viewport.height * config.height_fraction,
        margin: Margin {
            top: config.margin_top,
            right: side,
            bottom: config.margin_bottom,
            left: side,
        },
    };

    let bounds = Bounds {
        width: wrapper.wrapper_width - wrapper.margin.left - wrapper.margin.right,
        height: wrapper.wrapper_height - wrapper.margin.top - wrapper.margin.bottom,
    };

    LayoutEnvelope { wrapper, bounds }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_identities(env: &LayoutEnvelope) {
        let w = &env.wrapper;
        assert_eq!(
            env.bounds.width,
            w.wrapper_width - w.margin.left - w.margin.right
        );
        assert_eq!(
            env.bounds.height,
            w.wrapper_height - w.margin.top - w.margin.bottom
        );
    }

    #[test]
    fn test_default_proportions() {
        let env = compute_layout_envelope(Viewport::new(1000.0, 1000.0), &LayoutConfig::default());
        assert_eq!(env.wrapper.wrapper_width, 900.0);
        assert_eq!(env.wrapper.wrapper_height, 900.0);
        assert_eq!(env.wrapper.margin.left, 100.0);
        assert_eq!(env.wrapper.margin.right, 100.0);
        assert_eq!(env.bounds.width, 700.0);
        assert_eq!(env.bounds.height, 620.0);
        assert!(env.bounds.is_drawable());
    }

    #[test]
    fn test_identities_hold_across_sizes() {
        let config = LayoutConfig::default();
        for width in [0.0, 1.0, 320.0, 1366.0, 2560.0, 7680.0] {
            for height in [0.0, 1.0, 240.0, 768.0, 1440.0, 4320.0] {
                let env = compute_layout_envelope(Viewport::new(width, height), &config);
                assert_identities(&env);
            }
        }
    }

    #[test]
    fn test_small_viewport_not_drawable() {
        // Fixed vertical margins eat a short viewport
        let env = compute_layout_envelope(Viewport::new(800.0, 200.0), &LayoutConfig::default());
        assert!(env.bounds.height < 0.0);
        assert!(!env.bounds.is_drawable());

        let env = compute_layout_envelope(Viewport::new(0.0, 0.0), &LayoutConfig::default());
        assert_eq!(env.bounds.width, 0.0);
        assert!(!env.bounds.is_drawable());
    }

    #[test]
    fn test_custom_config() {
        let config = LayoutConfig {
            width_fraction: 1.0,
            height_fraction: 0.5,
            margin_top: 10.0,
            margin_bottom: 10.0,
            side_margin_fraction: 0.0,
        };
        let env = compute_layout_envelope(Viewport::new(640.0, 480.0), &config);
        assert_eq!(env.bounds.width, 640.0);
        assert_eq!(env.bounds.height, 220.0);
    }
}
