use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::core::StageTarget;
use crate::interaction::EntryEvent;

use super::{StoryContext, VisibilityChange, VisibilityRouter};

/// What happened to the target chart during one dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartUpdate {
    /// Stage hides everything, keeps the current panel, or targets an
    /// unknown visualization.
    Skipped,
    Applied { visualization: String },
    Failed { visualization: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DispatchOutcome {
    /// Event referenced no stored stage; state is untouched.
    Ignored { stage_index: usize },
    Committed {
        stage_index: usize,
        /// `None` when routing failed for an unknown visualization.
        visibility: Option<VisibilityChange>,
        update: ChartUpdate,
    },
}

/// Turns stage entry events into panel switches and chart updates.
///
/// Events are applied as they arrive: the latest one always wins and
/// nothing is queued or replayed.
pub struct DispatchCore;

impl DispatchCore {
    pub fn on_enter(context: &mut StoryContext, event: EntryEvent) -> DispatchOutcome {
        Self::commit(context, event.stage_index, true)
    }

    /// Shows and updates a stage's target without marking the stage active.
    ///
    /// Used to put the first chart on screen before any scrolling happens.
    pub fn prime(context: &mut StoryContext, stage_index: usize) -> DispatchOutcome {
        Self::commit(context, stage_index, false)
    }

    fn commit(context: &mut StoryContext, stage_index: usize, mark_active: bool) -> DispatchOutcome {
        let (trigger, target) = match context.stages.stage_at(stage_index) {
            Ok(stage) => (stage.trigger_value(), stage.target().clone()),
            Err(err) => {
                warn!(error = %err, "ignoring entry event");
                return DispatchOutcome::Ignored { stage_index };
            }
        };

        context.state.set_current_trigger_value(trigger);
        let visibility = VisibilityRouter::show_only(context, &target).ok();

        let update = match (&target, &visibility) {
            (StageTarget::Show(id), Some(_)) => Self::update_chart(context, stage_index, id),
            _ => ChartUpdate::Skipped,
        };

        if mark_active {
            context.state.mark_active(stage_index);
        }
        debug!(stage_index, ?trigger, ?visibility, ?update, "stage committed");

        DispatchOutcome::Committed {
            stage_index,
            visibility,
            update,
        }
    }

    fn update_chart(context: &mut StoryContext, stage_index: usize, id: &str) -> ChartUpdate {
        let trigger = context.state.current_trigger_value();
        let handle = match context.registry.get_mut(id) {
            Ok(handle) => handle,
            Err(err) => {
                warn!(stage_index, error = %err, "chart vanished before update");
                return ChartUpdate::Skipped;
            }
        };

        let reason = match panic::catch_unwind(AssertUnwindSafe(|| handle.update(trigger))) {
            Ok(Ok(())) => {
                return ChartUpdate::Applied {
                    visualization: id.to_owned(),
                };
            }
            Ok(Err(err)) => err.to_string(),
            Err(payload) => format!("chart panicked: {}", panic_message(payload.as_ref())),
        };

        error!(stage_index, visualization = %id, %reason, "chart update failed");
        ChartUpdate::Failed {
            visualization: id.to_owned(),
            reason,
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        *message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "non-string panic payload"
    }
}
