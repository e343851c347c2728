pub mod bridge;
pub mod model;

pub use bridge::VizBridge;
pub use model::{SpatialSeries, TemporalSeries, VisualizationModel};
