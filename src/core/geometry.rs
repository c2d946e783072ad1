use serde::{Deserialize, Serialize};

use crate::error::{ScrollyError, ScrollyResult};

/// Height of the scrolling viewport in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollViewport {
    pub height: f64,
}

impl ScrollViewport {
    #[must_use]
    pub fn new(height: f64) -> Self {
        Self { height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.height.is_finite() && self.height > 0.0
    }
}

/// Measured box of one stage element, relative to the viewport top.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StageRegion {
    pub stage_index: usize,
    pub top: f64,
    pub height: f64,
}

impl StageRegion {
    #[must_use]
    pub fn new(stage_index: usize, top: f64, height: f64) -> Self {
        Self {
            stage_index,
            top,
            height,
        }
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.top + self.height
    }
}

/// Entry condition for stage regions.
///
/// A region counts as entered when at least `threshold` of its height lies
/// inside the viewport shrunk by `margin_ratio` of its height at the top and
/// at the bottom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisibilityWindow {
    pub threshold: f64,
    pub margin_ratio: f64,
}

impl Default for VisibilityWindow {
    fn default() -> Self {
        Self {
            threshold: 0.75,
            margin_ratio: 0.2,
        }
    }
}

impl VisibilityWindow {
    pub fn new(threshold: f64, margin_ratio: f64) -> ScrollyResult<Self> {
        let window = Self {
            threshold,
            margin_ratio,
        };
        window.validate()?;
        Ok(window)
    }

    pub fn validate(self) -> ScrollyResult<()> {
        if !self.threshold.is_finite() || self.threshold <= 0.0 || self.threshold > 1.0 {
            return Err(ScrollyError::InvalidConfig(
                "visibility threshold must be in (0, 1]".to_owned(),
            ));
        }
        if !self.margin_ratio.is_finite() || !(0.0..0.5).contains(&self.margin_ratio) {
            return Err(ScrollyError::InvalidConfig(
                "visibility margin ratio must be in [0, 0.5)".to_owned(),
            ));
        }
        Ok(())
    }

    /// Returns the `(top, bottom)` pixel band regions are measured against.
    #[must_use]
    pub fn band(self, viewport: ScrollViewport) -> (f64, f64) {
        let inset = viewport.height * self.margin_ratio;
        (inset, viewport.height - inset)
    }

    /// Fraction of the region's height that lies inside the band, in `[0, 1]`.
    #[must_use]
    pub fn intersection_ratio(self, region: StageRegion, viewport: ScrollViewport) -> f64 {
        let (band_top, band_bottom) = self.band(viewport);
        if region.height <= 0.0 {
            // Zero-height regions are either fully in or fully out.
            return if region.top >= band_top && region.top <= band_bottom {
                1.0
            } else {
                0.0
            };
        }

        let overlap = region.bottom().min(band_bottom) - region.top.max(band_top);
        (overlap.max(0.0) / region.height).clamp(0.0, 1.0)
    }

    #[must_use]
    pub fn is_entered(self, region: StageRegion, viewport: ScrollViewport) -> bool {
        viewport.is_valid()
            && region.top.is_finite()
            && region.height.is_finite()
            && self.intersection_ratio(region, viewport) >= self.threshold
    }
}
