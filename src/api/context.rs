use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::{StageStore, TriggerValue};
use crate::error::ScrollyResult;
use crate::extensions::{Visualization, VisualizationHandle};
use crate::render::PanelSurface;

use super::VisualizationRegistry;

/// Where the dispatch state machine currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DispatchPhase {
    #[default]
    Idle,
    Active(usize),
}

/// Last committed narrative position.
///
/// Collaborators such as detail popups read it; only the dispatch path
/// writes it, so it never reflects transient hover state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchState {
    current_visualization: Option<String>,
    current_trigger_value: Option<TriggerValue>,
    active_stage: Option<usize>,
    committed_events: u64,
}

impl DispatchState {
    #[must_use]
    pub fn current_visualization(&self) -> Option<&str> {
        self.current_visualization.as_deref()
    }

    #[must_use]
    pub fn current_trigger_value(&self) -> Option<TriggerValue> {
        self.current_trigger_value
    }

    /// Date the narrative is "as of", when the last trigger was a date.
    #[must_use]
    pub fn as_of_date(&self) -> Option<NaiveDate> {
        self.current_trigger_value.and_then(TriggerValue::as_date)
    }

    /// Stage whose element carries the exclusive `active` marker.
    #[must_use]
    pub fn active_stage(&self) -> Option<usize> {
        self.active_stage
    }

    #[must_use]
    pub fn phase(&self) -> DispatchPhase {
        self.active_stage
            .map_or(DispatchPhase::Idle, DispatchPhase::Active)
    }

    #[must_use]
    pub fn committed_events(&self) -> u64 {
        self.committed_events
    }

    pub(crate) fn set_current_visualization(&mut self, id: Option<String>) {
        self.current_visualization = id;
    }

    pub(crate) fn set_current_trigger_value(&mut self, value: Option<TriggerValue>) {
        self.current_trigger_value = value;
    }

    pub(crate) fn mark_active(&mut self, stage_index: usize) {
        self.active_stage = Some(stage_index);
        self.committed_events += 1;
    }
}

/// Everything one scrollytelling instance dispatches against.
///
/// Passed by reference into the router and dispatch core, so several
/// independent stories can live side by side.
#[derive(Debug, Default)]
pub struct StoryContext {
    pub(crate) stages: StageStore,
    pub(crate) registry: VisualizationRegistry,
    pub(crate) state: DispatchState,
}

impl StoryContext {
    #[must_use]
    pub fn new(stages: StageStore) -> Self {
        Self {
            stages,
            registry: VisualizationRegistry::new(),
            state: DispatchState::default(),
        }
    }

    /// Registers a chart and its panel. Duplicate ids fail fast.
    pub fn register<V, P>(&mut self, id: impl Into<String>, chart: V, panel: P) -> ScrollyResult<()>
    where
        V: Visualization + 'static,
        P: PanelSurface + 'static,
    {
        self.registry
            .register(id, VisualizationHandle::new(Box::new(chart), Box::new(panel)))
    }

    #[must_use]
    pub fn stages(&self) -> &StageStore {
        &self.stages
    }

    #[must_use]
    pub fn registry(&self) -> &VisualizationRegistry {
        &self.registry
    }

    #[must_use]
    pub fn state(&self) -> &DispatchState {
        &self.state
    }
}
