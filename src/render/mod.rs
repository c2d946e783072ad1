use std::cell::RefCell;
use std::rc::Rc;

mod memory_panel;

pub use memory_panel::MemoryPanel;

use serde::{Deserialize, Serialize};

/// Two mutually exclusive visual states of a chart container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelState {
    #[default]
    Hidden,
    Visible,
}

impl PanelState {
    /// Class tag toggled on the container element.
    #[must_use]
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Hidden => "hidden",
            Self::Visible => "visible",
        }
    }

    #[must_use]
    pub const fn is_visible(self) -> bool {
        matches!(self, Self::Visible)
    }
}

/// Contract implemented by any show/hide surface hosting a chart.
///
/// Hosts back this with a DOM container, a widget, or the headless
/// [`MemoryPanel`]. Routing code only ever calls `set_state` on an actual
/// transition.
pub trait PanelSurface {
    fn state(&self) -> PanelState;
    fn set_state(&mut self, state: PanelState);
}

impl<T: PanelSurface + ?Sized> PanelSurface for Rc<RefCell<T>> {
    fn state(&self) -> PanelState {
        self.borrow().state()
    }

    fn set_state(&mut self, state: PanelState) {
        self.borrow_mut().set_state(state);
    }
}
