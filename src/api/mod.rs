mod context;
mod dispatch;
mod engine;
mod engine_config;
mod registry;
mod visibility_router;

pub use context::{DispatchPhase, DispatchState, StoryContext};
pub use dispatch::{ChartUpdate, DispatchCore, DispatchOutcome};
pub use engine::ScrollyEngine;
pub use engine_config::ScrollyConfig;
pub use registry::{AllIds, VisualizationRegistry};
pub use visibility_router::{VisibilityChange, VisibilityRouter};
