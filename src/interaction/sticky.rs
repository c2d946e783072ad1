use serde::{Deserialize, Serialize};
use tracing::debug;

/// Pixel thresholds for pinning the visualization frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StickyFrameConfig {
    /// Frame shows once the intro's bottom edge is at or above this offset.
    pub intro_bottom_max_px: f64,
    /// Frame hides once the outro's top edge reaches this offset.
    pub outro_top_min_px: f64,
}

impl Default for StickyFrameConfig {
    fn default() -> Self {
        Self {
            intro_bottom_max_px: 70.0,
            outro_top_min_px: 560.0,
        }
    }
}

/// Decides whether the pinned container hosting all chart panels is shown.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StickyFrame {
    config: StickyFrameConfig,
    visible: bool,
}

impl StickyFrame {
    #[must_use]
    pub fn new(config: StickyFrameConfig) -> Self {
        Self {
            config,
            visible: false,
        }
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Re-evaluates the gate from the intro/outro edges, relative to the
    /// viewport top, and returns the new visibility.
    pub fn evaluate(&mut self, intro_bottom_px: f64, outro_top_px: f64) -> bool {
        let visible = intro_bottom_px <= self.config.intro_bottom_max_px
            && outro_top_px > self.config.outro_top_min_px;
        if visible != self.visible {
            debug!(visible, intro_bottom_px, outro_top_px, "sticky frame toggled");
            self.visible = visible;
        }
        visible
    }
}
