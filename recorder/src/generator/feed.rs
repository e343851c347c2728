use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use swathcore::session::ARRAY_COUNT;

/// Configuration for the deterministic synthetic survey feeds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub fixes: usize,
    pub seed: u64,
    pub origin_lat: f64,
    pub origin_lon: f64,
    pub heading_deg: f64,
    pub base_distance_cm: f64,
    pub noise_cm: f64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            fixes: 30,
            seed: 0,
            origin_lat: 48.1173,
            origin_lon: 11.5167,
            heading_deg: 90.0,
            base_distance_cm: 80.0,
            noise_cm: 6.0,
        }
    }
}

/// Encodes decimal degrees as an NMEA `ddmm.mmmm` latitude field with its
/// hemisphere letter.
pub fn encode_latitude(lat_deg: f64) -> (String, char) {
    let hemisphere = if lat_deg < 0.0 { 'S' } else { 'N' };
    let value = lat_deg.abs();
    let degrees = value.floor();
    let minutes = (value - degrees) * 60.0;
    (format!("{:02}{:07.4}", degrees as u32, minutes), hemisphere)
}

/// Encodes decimal degrees as an NMEA `dddmm.mmmm` longitude field with
/// its hemisphere letter.
pub fn encode_longitude(lon_deg: f64) -> (String, char) {
    let hemisphere = if lon_deg < 0.0 { 'W' } else { 'E' };
    let value = lon_deg.abs();
    let degrees = value.floor();
    let minutes = (value - degrees) * 60.0;
    (format!("{:03}{:07.4}", degrees as u32, minutes), hemisphere)
}

/// Builds matched GNSS and ranging line scripts for one synthetic pass: a
/// date reference, then a fix and heading sentence per step with a slow
/// northward drift, paired with jittered ranging lines. Identical configs
/// yield identical feeds.
pub fn build_survey_feeds(config: &FeedConfig) -> (Vec<String>, Vec<String>) {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut gnss = Vec::with_capacity(1 + 2 * config.fixes);
    let mut ranging = Vec::with_capacity(config.fixes);

    gnss.push("$GNZDA,120000,15,06,2024,00,00".to_string());

    for step in 0..config.fixes {
        let tick = step + 1;
        let time = format!("12{:02}{:02}", tick / 60, tick % 60);
        // Roughly half a meter of northing per fix.
        let lat = config.origin_lat + step as f64 * 4.5e-6;
        let (lat_field, ns) = encode_latitude(lat);
        let (lon_field, ew) = encode_longitude(config.origin_lon);

        gnss.push(format!(
            "$GNGGA,{},{},{},{},{},1,08,0.9,545.4,M,46.9,M,,",
            time, lat_field, ns, lon_field, ew
        ));
        gnss.push(format!(
            "$GNRMC,{},A,{},{},{},{},0.5,{},150624,,,A",
            time, lat_field, ns, lon_field, ew, config.heading_deg
        ));

        let readings: Vec<String> = (0..ARRAY_COUNT)
            .map(|_| {
                let jitter = if config.noise_cm > 0.0 {
                    rng.gen_range(-config.noise_cm..config.noise_cm)
                } else {
                    0.0
                };
                format!("{:.1}", (config.base_distance_cm + jitter).max(1.0))
            })
            .collect();
        ranging.push(readings.join(", "));
    }

    (gnss, ranging)
}
