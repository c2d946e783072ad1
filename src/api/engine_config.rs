use serde::{Deserialize, Serialize};

use crate::core::{TriggerPolicy, VisibilityWindow};
use crate::error::{ScrollyError, ScrollyResult};
use crate::interaction::StickyFrameConfig;

/// Public engine bootstrap configuration.
///
/// Serializable so a page can ship its scroll tuning next to its stage data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrollyConfig {
    #[serde(default)]
    pub visibility_window: VisibilityWindow,
    #[serde(default)]
    pub trigger_policy: TriggerPolicy,
    #[serde(default)]
    pub sticky_frame: StickyFrameConfig,
    /// Show and update the first stage's chart when the engine starts.
    #[serde(default = "default_prime_first_stage")]
    pub prime_first_stage: bool,
}

fn default_prime_first_stage() -> bool {
    true
}

impl Default for ScrollyConfig {
    fn default() -> Self {
        Self {
            visibility_window: VisibilityWindow::default(),
            trigger_policy: TriggerPolicy::default(),
            sticky_frame: StickyFrameConfig::default(),
            prime_first_stage: default_prime_first_stage(),
        }
    }
}

impl ScrollyConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_visibility_window(mut self, window: VisibilityWindow) -> Self {
        self.visibility_window = window;
        self
    }

    #[must_use]
    pub fn with_trigger_policy(mut self, policy: TriggerPolicy) -> Self {
        self.trigger_policy = policy;
        self
    }

    #[must_use]
    pub fn with_sticky_frame(mut self, sticky_frame: StickyFrameConfig) -> Self {
        self.sticky_frame = sticky_frame;
        self
    }

    #[must_use]
    pub fn with_prime_first_stage(mut self, prime: bool) -> Self {
        self.prime_first_stage = prime;
        self
    }

    pub fn from_json_str(json: &str) -> ScrollyResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ScrollyResult<()> {
        self.visibility_window.validate()?;
        let sticky = self.sticky_frame;
        if !sticky.intro_bottom_max_px.is_finite() || !sticky.outro_top_min_px.is_finite() {
            return Err(ScrollyError::InvalidConfig(
                "sticky frame thresholds must be finite".to_owned(),
            ));
        }
        Ok(())
    }
}
