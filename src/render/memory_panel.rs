use crate::render::{PanelState, PanelSurface};

/// Headless panel used by tests and non-DOM hosts.
///
/// Counts state writes so callers can verify that routing does not churn
/// visibility when nothing changed.
#[derive(Debug, Default)]
pub struct MemoryPanel {
    state: PanelState,
    pub mutation_count: usize,
}

impl MemoryPanel {
    #[must_use]
    pub fn new(state: PanelState) -> Self {
        Self {
            state,
            mutation_count: 0,
        }
    }
}

impl PanelSurface for MemoryPanel {
    fn state(&self) -> PanelState {
        self.state
    }

    fn set_state(&mut self, state: PanelState) {
        self.state = state;
        self.mutation_count += 1;
    }
}
