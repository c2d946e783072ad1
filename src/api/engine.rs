use tracing::{debug, info};

use crate::core::{ScrollViewport, StageDescriptor, StageRegion, StageStore, StageTarget};
use crate::error::ScrollyResult;
use crate::extensions::Visualization;
use crate::interaction::{EntryStream, ScrollObserver, StickyFrame};
use crate::render::PanelSurface;

use super::{DispatchCore, DispatchOutcome, DispatchState, ScrollyConfig, StoryContext};

/// Main orchestration facade consumed by host pages.
///
/// `ScrollyEngine` owns one story: its stages, registered charts, the scroll
/// observer and the single consumer of the observer's event stream.
#[derive(Debug)]
pub struct ScrollyEngine {
    context: StoryContext,
    observer: ScrollObserver,
    stream: EntryStream,
    sticky: StickyFrame,
    config: ScrollyConfig,
}

impl ScrollyEngine {
    pub fn new(stages: StageStore, config: ScrollyConfig) -> ScrollyResult<Self> {
        config.validate()?;
        let (observer, stream) = ScrollObserver::channel(config.visibility_window);
        Ok(Self {
            context: StoryContext::new(stages),
            observer,
            stream,
            sticky: StickyFrame::new(config.sticky_frame),
            config,
        })
    }

    /// Validates descriptors with the config's trigger policy and builds the engine.
    pub fn from_descriptors(
        descriptors: Vec<StageDescriptor>,
        config: ScrollyConfig,
    ) -> ScrollyResult<Self> {
        let stages = StageStore::from_descriptors(descriptors, &config.trigger_policy)?;
        Self::new(stages, config)
    }

    pub fn register<V, P>(&mut self, id: impl Into<String>, chart: V, panel: P) -> ScrollyResult<()>
    where
        V: Visualization + 'static,
        P: PanelSurface + 'static,
    {
        self.context.register(id, chart, panel)
    }

    /// Starts watching every stage and, if configured, shows the first
    /// stage's chart. Calling it again replaces the previous watch set.
    ///
    /// Returns the number of watched stages.
    pub fn start(&mut self) -> usize {
        let watched = self.observer.observe(0..self.context.stages.len());
        if self.config.prime_first_stage {
            let first_shows_chart = self
                .context
                .stages
                .stages()
                .first()
                .is_some_and(|stage| matches!(stage.target(), StageTarget::Show(_)));
            if first_shows_chart {
                let outcome = DispatchCore::prime(&mut self.context, 0);
                debug!(?outcome, "primed first stage");
            }
        }
        info!(
            stages = self.context.stages.len(),
            visualizations = self.context.registry.len(),
            "scrollytelling started"
        );
        watched
    }

    /// Feeds one measured scroll frame and dispatches whatever it triggered.
    pub fn scroll(&mut self, viewport: ScrollViewport, regions: &[StageRegion]) -> Vec<DispatchOutcome> {
        self.observer.on_scroll(viewport, regions);
        self.pump()
    }

    /// Dispatches every pending entry event in delivery order.
    pub fn pump(&mut self) -> Vec<DispatchOutcome> {
        let mut outcomes = Vec::new();
        while let Some(event) = self.stream.try_next() {
            outcomes.push(DispatchCore::on_enter(&mut self.context, event));
        }
        outcomes
    }

    /// Re-evaluates the sticky frame from intro/outro edge offsets.
    pub fn update_sticky_frame(&mut self, intro_bottom_px: f64, outro_top_px: f64) -> bool {
        self.sticky.evaluate(intro_bottom_px, outro_top_px)
    }

    /// Stops observing. Safe to call repeatedly.
    pub fn stop(&mut self) {
        self.observer.teardown();
    }

    #[must_use]
    pub fn state(&self) -> &DispatchState {
        self.context.state()
    }

    #[must_use]
    pub fn context(&self) -> &StoryContext {
        &self.context
    }

    /// Mutable access for hosts that route or dispatch by hand.
    pub fn context_mut(&mut self) -> &mut StoryContext {
        &mut self.context
    }

    #[must_use]
    pub fn observer(&self) -> &ScrollObserver {
        &self.observer
    }

    #[must_use]
    pub fn sticky_frame(&self) -> &StickyFrame {
        &self.sticky
    }

    #[must_use]
    pub fn config(&self) -> &ScrollyConfig {
        &self.config
    }
}
