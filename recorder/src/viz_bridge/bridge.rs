use crate::viz_bridge::model::VisualizationModel;
use anyhow::{Context, Result};
use std::fs::File;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::{Arc, RwLock};
use std::thread;
use tokio::runtime::Builder;
use warp::Filter;

fn dataset_bind_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 9000))
}

/// Holds the latest visualization model and hands it to an external
/// renderer as JSON artifacts or over a local HTTP endpoint.
pub struct VizBridge {
    state: Arc<RwLock<VisualizationModel>>,
}

impl VizBridge {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(VisualizationModel::default())),
        }
    }

    pub fn publish(&self, model: &VisualizationModel) -> Result<()> {
        let mut guard = self.state.write().unwrap();
        *guard = model.clone();
        println!(
            "[viz] {} records across {} arrays",
            guard.record_count,
            guard.spatial.len()
        );
        Ok(())
    }

    pub fn publish_status(&self, message: &str) {
        println!("[viz] {}", message);
    }

    /// Writes `map.json` (spatial dataset) and `graph.json` (temporal
    /// dataset) next to the session log.
    pub fn write_artifacts(&self, dir: &Path) -> Result<()> {
        let guard = self.state.read().unwrap();
        let map = File::create(dir.join("map.json")).context("creating map.json")?;
        serde_json::to_writer_pretty(map, &guard.spatial).context("writing spatial dataset")?;
        let graph = File::create(dir.join("graph.json")).context("creating graph.json")?;
        serde_json::to_writer_pretty(graph, &guard.temporal).context("writing temporal dataset")?;
        Ok(())
    }

    /// Hosts GET `/datasets`, `/spatial` and `/temporal` on localhost from
    /// a background thread with its own runtime.
    pub fn serve(&self) {
        let state = self.state.clone();
        thread::spawn(move || {
            let datasets_state = state.clone();
            let spatial_state = state.clone();
            let temporal_state = state;

            let datasets = warp::path("datasets")
                .and(warp::get())
                .map(move || warp::reply::json(&*datasets_state.read().unwrap()));
            let spatial = warp::path("spatial")
                .and(warp::get())
                .map(move || warp::reply::json(&spatial_state.read().unwrap().spatial));
            let temporal = warp::path("temporal")
                .and(warp::get())
                .map(move || warp::reply::json(&temporal_state.read().unwrap().temporal));
            let routes = datasets.or(spatial).or(temporal);

            let runtime = Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("failed to build runtime");
            runtime.block_on(async move {
                warp::serve(routes).run(dataset_bind_address()).await;
            });
        });
    }

    #[cfg(test)]
    pub fn snapshot(&self) -> VisualizationModel {
        self.state.read().unwrap().clone()
    }
}

impl Default for VizBridge {
    fn default() -> Self {
        Self::new()
    }
}
