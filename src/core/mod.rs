pub mod geometry;
pub mod narrative;
pub mod stage_store;
pub mod types;

pub use geometry::{ScrollViewport, StageRegion, VisibilityWindow};
pub use narrative::covid_story;
pub use stage_store::{StageDescriptor, StageStore, TriggerPolicy};
pub use types::{MAX_STEP, NarrativeStage, StageTarget, TriggerKind, TriggerValue};
