use serde::Serialize;
use std::sync::Mutex;

/// Counters accumulated over one acquisition session.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct MetricsSnapshot {
    pub records_written: usize,
    pub malformed_sentences: usize,
    pub ignored_sentences: usize,
    pub ranging_lines: usize,
    pub stale_skips: usize,
}

pub struct MetricsRecorder {
    inner: Mutex<MetricsSnapshot>,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(MetricsSnapshot::default()),
        }
    }

    pub fn record_written(&self) {
        self.bump(|metrics| metrics.records_written += 1);
    }

    pub fn record_malformed(&self) {
        self.bump(|metrics| metrics.malformed_sentences += 1);
    }

    pub fn record_ignored(&self) {
        self.bump(|metrics| metrics.ignored_sentences += 1);
    }

    pub fn record_ranging_line(&self) {
        self.bump(|metrics| metrics.ranging_lines += 1);
    }

    pub fn record_stale_skip(&self) {
        self.bump(|metrics| metrics.stale_skips += 1);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        self.inner.lock().map(|metrics| *metrics).unwrap_or_default()
    }

    fn bump(&self, apply: impl FnOnce(&mut MetricsSnapshot)) {
        if let Ok(mut metrics) = self.inner.lock() {
            apply(&mut metrics);
        }
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate_independently() {
        let recorder = MetricsRecorder::new();
        recorder.record_written();
        recorder.record_written();
        recorder.record_malformed();
        recorder.record_ranging_line();

        let snapshot = recorder.snapshot();
        assert_eq!(snapshot.records_written, 2);
        assert_eq!(snapshot.malformed_sentences, 1);
        assert_eq!(snapshot.ranging_lines, 1);
        assert_eq!(snapshot.stale_skips, 0);
    }
}
