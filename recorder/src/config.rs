use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use swathcore::ArrayConfig;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RecorderConfig {
    /// Root under which per-session directories are created.
    pub data_dir: PathBuf,
    pub spacing_m: f64,
    pub clamp_ceiling_cm: f64,
    pub smoothing_window: usize,
    /// When set, fixes are skipped instead of fused with a ranging sample
    /// older than this. Unset preserves latest-sample reuse.
    pub ranging_staleness_ms: Option<u64>,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        let array = ArrayConfig::default();
        Self {
            data_dir: PathBuf::from("data"),
            spacing_m: array.spacing_m,
            clamp_ceiling_cm: array.clamp_ceiling_cm,
            smoothing_window: array.smoothing_window,
            ranging_staleness_ms: None,
        }
    }
}

impl RecorderConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading recorder config {}", path_ref.display()))?;
        let config: RecorderConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing recorder config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(data_dir: PathBuf, spacing_m: f64, ranging_staleness_ms: Option<u64>) -> Self {
        Self {
            data_dir,
            spacing_m,
            ranging_staleness_ms,
            ..Default::default()
        }
    }

    pub fn to_array_config(&self) -> ArrayConfig {
        ArrayConfig {
            spacing_m: self.spacing_m,
            clamp_ceiling_cm: self.clamp_ceiling_cm,
            smoothing_window: self.smoothing_window,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn config_from_args_produces_array_config() {
        let cfg = RecorderConfig::from_args(PathBuf::from("data"), 2.5, Some(500));
        assert_eq!(cfg.to_array_config().spacing_m, 2.5);
        assert_eq!(cfg.ranging_staleness_ms, Some(500));
    }

    #[test]
    fn config_load_reads_yaml() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"data_dir: surveys\nspacing_m: 2.0\nsmoothing_window: 3\n")
            .unwrap();
        let path = temp.into_temp_path();
        let cfg = RecorderConfig::load(&path).unwrap();
        assert_eq!(cfg.data_dir, PathBuf::from("surveys"));
        assert_eq!(cfg.spacing_m, 2.0);
        assert_eq!(cfg.smoothing_window, 3);
        // Unlisted fields fall back to defaults.
        assert_eq!(cfg.clamp_ceiling_cm, 200.0);
        assert_eq!(cfg.ranging_staleness_ms, None);
    }
}
