use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::StageTarget;
use crate::error::{ScrollyError, ScrollyResult};
use crate::render::{PanelState, PanelSurface};

use super::StoryContext;

/// Outcome of a routing request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisibilityChange {
    /// Target was already the visible panel, or the stage keeps visibility.
    Unchanged,
    Switched { from: Option<String>, to: String },
    /// Every panel was hidden.
    Cleared,
}

/// Keeps at most one chart panel visible.
pub struct VisibilityRouter;

impl VisibilityRouter {
    /// Makes `target` the only visible panel.
    ///
    /// `HideAll` hides every panel and clears the current visualization.
    /// An unregistered id fails with `UnknownVisualization` and leaves every
    /// panel untouched. Re-targeting the visible panel performs no panel
    /// writes at all.
    pub fn show_only(
        context: &mut StoryContext,
        target: &StageTarget,
    ) -> ScrollyResult<VisibilityChange> {
        match target {
            StageTarget::Keep => Ok(VisibilityChange::Unchanged),
            StageTarget::HideAll => {
                for (_, handle) in context.registry.handles_mut() {
                    set_panel(handle.panel_mut(), PanelState::Hidden);
                }
                context.state.set_current_visualization(None);
                debug!("all panels hidden");
                Ok(VisibilityChange::Cleared)
            }
            StageTarget::Show(id) => {
                if !context.registry.contains(id) {
                    warn!(visualization = %id, "unknown visualization; keeping current panel");
                    return Err(ScrollyError::UnknownVisualization(id.clone()));
                }
                if context.state.current_visualization() == Some(id.as_str()) {
                    return Ok(VisibilityChange::Unchanged);
                }

                for (panel_id, handle) in context.registry.handles_mut() {
                    let state = if panel_id == id.as_str() {
                        PanelState::Visible
                    } else {
                        PanelState::Hidden
                    };
                    set_panel(handle.panel_mut(), state);
                }
                let from = context.state.current_visualization().map(str::to_owned);
                context.state.set_current_visualization(Some(id.clone()));
                debug!(from = ?from, to = %id, "switched visible panel");
                Ok(VisibilityChange::Switched {
                    from,
                    to: id.clone(),
                })
            }
        }
    }
}

fn set_panel(panel: &mut dyn PanelSurface, state: PanelState) {
    if panel.state() != state {
        panel.set_state(state);
    }
}
