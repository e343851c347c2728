use crate::viz_bridge::model::{SpatialSeries, TemporalSeries, VisualizationModel};
use anyhow::Context;
use std::path::Path;
use swathcore::processing::Reconstructor;
use swathcore::session::SessionStore;
use swathcore::ArrayConfig;

/// Reads a finished session log and reconstructs the visualization model.
/// A corrupt row stops the run; the error names the stage that failed.
pub fn run(session_dir: &Path, config: &ArrayConfig) -> anyhow::Result<VisualizationModel> {
    let records = SessionStore::read_records(session_dir)
        .with_context(|| format!("reading session log in {}", session_dir.display()))?;
    let output = Reconstructor::new(config.clone())
        .reconstruct(&records)
        .context("reconstructing session series")?;

    let spatial = output
        .arrays
        .iter()
        .map(|track| SpatialSeries {
            name: format!("Array {}", track.index),
            points: track.points.clone(),
            color: track.color.clone(),
        })
        .collect();
    let temporal = output
        .arrays
        .iter()
        .map(|track| TemporalSeries {
            name: format!("Array {}", track.index),
            times: track.times.clone(),
            distances: track.distances.clone(),
            smoothed: track.smoothed.clone(),
        })
        .collect();

    Ok(VisualizationModel {
        session: session_dir.display().to_string(),
        record_count: records.len(),
        spatial,
        temporal,
    })
}
