use serde::{Deserialize, Serialize};

/// Per-array 3-D track with a derived color scalar per point.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpatialSeries {
    pub name: String,
    pub points: Vec<[f64; 3]>,
    pub color: Vec<f64>,
}

/// Per-array time/distance series with its smoothed channel.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemporalSeries {
    pub name: String,
    pub times: Vec<String>,
    pub distances: Vec<f64>,
    pub smoothed: Vec<f64>,
}

/// Everything an external renderer needs for one session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VisualizationModel {
    pub session: String,
    pub record_count: usize,
    pub spatial: Vec<SpatialSeries>,
    pub temporal: Vec<TemporalSeries>,
}
