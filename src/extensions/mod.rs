//! Chart capability interface and the headless chart models shipped with the crate.
//!
//! Models track what each chart would render for a trigger value; drawing
//! stays with the host.

pub mod charts;
mod visualization;

pub use charts::{
    BarSelection, BubbleChartModel, ChoroplethMapModel, StackedBarModel, StreamGraphModel,
};
pub use visualization::{Visualization, VisualizationHandle};
