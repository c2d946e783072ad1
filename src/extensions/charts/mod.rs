mod bubble_chart;
mod choropleth_map;
mod stacked_bar;
mod stream_graph;

pub use bubble_chart::BubbleChartModel;
pub use choropleth_map::ChoroplethMapModel;
pub use stacked_bar::{BarSelection, StackedBarModel};
pub use stream_graph::StreamGraphModel;
