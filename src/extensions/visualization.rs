use std::cell::RefCell;
use std::rc::Rc;

use crate::core::TriggerValue;
use crate::error::ScrollyResult;
use crate::render::{PanelState, PanelSurface};

/// Capability every registered chart exposes to the dispatch loop.
///
/// Implementations validate their own input: a value outside the chart's
/// contract (wrong kind, step out of range, `None`) should be a no-op rather
/// than an error. An `Err` is logged by the caller and never stops scrolling.
pub trait Visualization {
    fn update(&mut self, value: Option<TriggerValue>) -> ScrollyResult<()>;
}

/// Shared charts let the host keep reading model state after registration.
impl<T: Visualization + ?Sized> Visualization for Rc<RefCell<T>> {
    fn update(&mut self, value: Option<TriggerValue>) -> ScrollyResult<()> {
        self.borrow_mut().update(value)
    }
}

/// A chart paired with the surface that shows or hides it.
pub struct VisualizationHandle {
    chart: Box<dyn Visualization>,
    panel: Box<dyn PanelSurface>,
}

impl VisualizationHandle {
    #[must_use]
    pub fn new(chart: Box<dyn Visualization>, panel: Box<dyn PanelSurface>) -> Self {
        Self { chart, panel }
    }

    pub fn update(&mut self, value: Option<TriggerValue>) -> ScrollyResult<()> {
        self.chart.update(value)
    }

    #[must_use]
    pub fn panel_state(&self) -> PanelState {
        self.panel.state()
    }

    pub(crate) fn panel_mut(&mut self) -> &mut dyn PanelSurface {
        self.panel.as_mut()
    }
}

impl std::fmt::Debug for VisualizationHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisualizationHandle")
            .field("panel_state", &self.panel.state())
            .finish_non_exhaustive()
    }
}
