use crate::geo::{project_array, to_utm, PlanarPoint};
use crate::math::{clamp_ceiling, moving_average};
use crate::prelude::{ArrayConfig, CoreResult};
use crate::session::{SessionRecord, ARRAY_COUNT};
use crate::telemetry::LogManager;
use serde::{Deserialize, Serialize};

/// Ordered per-array series reconstructed from a session log.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArrayTrack {
    /// 1-based array index across the swath.
    pub index: usize,
    /// Relative planar coordinates with the clamped reading as height.
    pub points: Vec<[f64; 3]>,
    /// Negated clamped readings; nearer obstacles sit at the extreme.
    pub color: Vec<f64>,
    pub times: Vec<String>,
    pub distances: Vec<f64>,
    /// Moving average of `distances`; shorter by `window - 1` samples.
    pub smoothed: Vec<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReconstructionOutput {
    pub arrays: Vec<ArrayTrack>,
}

/// Offline pipeline turning persisted session records into plottable,
/// array-indexed series. The first record's planar position becomes the
/// session origin; all coordinates are relative to it.
pub struct Reconstructor {
    config: ArrayConfig,
    logger: LogManager,
}

impl Reconstructor {
    pub fn new(config: ArrayConfig) -> Self {
        Self {
            config,
            logger: LogManager::new("reconstruct"),
        }
    }

    pub fn reconstruct(&self, records: &[SessionRecord]) -> CoreResult<ReconstructionOutput> {
        let mut arrays: Vec<ArrayTrack> = (1..=ARRAY_COUNT)
            .map(|index| ArrayTrack {
                index,
                ..Default::default()
            })
            .collect();

        let mut origin: Option<PlanarPoint> = None;
        for record in records {
            let position = to_utm(record.latitude, record.longitude);
            let anchor = *origin.get_or_insert(position);
            let relative = PlanarPoint::new(position.x - anchor.x, position.y - anchor.y);
            let swath = project_array(relative, record.heading_deg, self.config.spacing_m);

            for (track, (point, raw)) in arrays
                .iter_mut()
                .zip(swath.iter().zip(record.distances_cm.iter()))
            {
                let reading = clamp_ceiling(*raw, self.config.clamp_ceiling_cm);
                track.points.push([point.x, point.y, reading]);
                track.color.push(-reading);
                track.times.push(record.time_utc.clone());
                track.distances.push(reading);
            }
        }

        for track in &mut arrays {
            track.smoothed = moving_average(&track.distances, self.config.smoothing_window);
        }

        self.logger.record(&format!(
            "reconstructed {} records into {} array tracks",
            records.len(),
            arrays.len()
        ));
        Ok(ReconstructionOutput { arrays })
    }
}
