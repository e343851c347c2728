use serde::{Deserialize, Serialize};

/// Shared geometry and reconstruction settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArrayConfig {
    /// Distance between neighbouring swath positions, in meters.
    pub spacing_m: f64,
    /// Readings above this ceiling are truncated during reconstruction.
    pub clamp_ceiling_cm: f64,
    /// Moving-average window applied to each distance channel.
    pub smoothing_window: usize,
}

impl Default for ArrayConfig {
    fn default() -> Self {
        Self {
            spacing_m: 1.7,
            clamp_ceiling_cm: 200.0,
            smoothing_window: 2,
        }
    }
}

/// Common error type for acquisition and reconstruction.
#[derive(thiserror::Error, Debug)]
pub enum CoreError {
    #[error("malformed sentence: {0}")]
    MalformedSentence(String),
    #[error("malformed ranging line: {0}")]
    MalformedRanging(String),
    #[error("corrupt log row {line}: {reason}")]
    CorruptLogRow { line: usize, reason: String },
    #[error("storage failure: {0}")]
    Storage(#[from] std::io::Error),
}

pub type CoreResult<T> = Result<T, CoreError>;
