use crate::acquisition::source::LineSource;
use crate::config::RecorderConfig;
use anyhow::Context;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};
use swathcore::nmea::{NmeaParser, SentenceEvent};
use swathcore::session::{GnssFix, RangingSample, SessionRecord, SessionStore};
use swathcore::telemetry::{LogManager, MetricsRecorder, MetricsSnapshot};

const IDLE_SLEEP: Duration = Duration::from_millis(10);

/// Acquisition phases, in the order a session moves through them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingStart,
    AwaitingFirstRanging,
    Streaming,
    Closed,
}

/// Result of one completed (or cancelled) acquisition run.
#[derive(Debug)]
pub struct SessionSummary {
    pub session_dir: PathBuf,
    pub start_time: String,
    pub metrics: MetricsSnapshot,
}

struct TimedRanging {
    sample: RangingSample,
    received: Instant,
}

/// Fusion loop pairing accepted GNSS fixes with the newest ranging sample
/// and appending the result to the session log, one durable write per fix.
pub struct SessionRecorder<G, R> {
    config: RecorderConfig,
    gnss: G,
    ranging: R,
    parser: NmeaParser,
    phase: Phase,
    store: Option<SessionStore>,
    start_time: Option<String>,
    pending_fix: Option<GnssFix>,
    latest_ranging: Option<TimedRanging>,
    metrics: MetricsRecorder,
    logger: LogManager,
}

impl<G: LineSource, R: LineSource> SessionRecorder<G, R> {
    pub fn new(config: RecorderConfig, gnss: G, ranging: R) -> Self {
        Self {
            config,
            gnss,
            ranging,
            parser: NmeaParser::new(),
            phase: Phase::AwaitingStart,
            store: None,
            start_time: None,
            pending_fix: None,
            latest_ranging: None,
            metrics: MetricsRecorder::new(),
            logger: LogManager::new("acquisition"),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Runs until cancelled, or until bounded replay sources drain, then
    /// closes the log and reports the finished session. The cancel flag is
    /// observed between poll cycles, so the log never holds a partial row.
    pub fn run(&mut self, cancel: &AtomicBool) -> anyhow::Result<SessionSummary> {
        while !cancel.load(Ordering::SeqCst) {
            let progressed = self.poll_cycle()?;
            let gnss_done = self.gnss.exhausted();
            let ranging_done = self.ranging.exhausted() || self.phase == Phase::AwaitingStart;
            if gnss_done && ranging_done {
                break;
            }
            if !progressed {
                thread::sleep(IDLE_SLEEP);
            }
        }
        self.close()
    }

    /// One scheduler cycle: at most one line from each channel, so an idle
    /// channel never blocks the other. Returns whether any line arrived.
    pub fn poll_cycle(&mut self) -> anyhow::Result<bool> {
        let mut progressed = false;
        if let Some(line) = self.gnss.poll_line()? {
            progressed = true;
            self.handle_gnss_line(&line)?;
        }
        if self.phase != Phase::AwaitingStart {
            if let Some(line) = self.ranging.poll_line()? {
                progressed = true;
                self.handle_ranging_line(&line)?;
            }
        }
        Ok(progressed)
    }

    fn handle_gnss_line(&mut self, line: &str) -> anyhow::Result<()> {
        match self.parser.parse(line) {
            Ok(SentenceEvent::TimeReference { time_utc }) => {
                if self.start_time.is_none() {
                    let store = SessionStore::create(&self.config.data_dir, &time_utc)
                        .context("creating session storage")?;
                    self.logger.record(&format!(
                        "session {} -> {}",
                        time_utc,
                        store.dir().display()
                    ));
                    self.store = Some(store);
                    self.start_time = Some(time_utc);
                    self.phase = Phase::AwaitingFirstRanging;
                }
            }
            Ok(SentenceEvent::PositionFix(fix)) => self.handle_fix(fix)?,
            Ok(SentenceEvent::HeadingUpdated { .. }) => {}
            Ok(SentenceEvent::Ignored) => self.metrics.record_ignored(),
            Err(err) => {
                self.metrics.record_malformed();
                self.logger.report(&format!("dropped sentence: {}", err));
            }
        }
        Ok(())
    }

    fn handle_fix(&mut self, fix: GnssFix) -> anyhow::Result<()> {
        match self.phase {
            Phase::AwaitingStart | Phase::Closed => {}
            Phase::AwaitingFirstRanging => {
                if self.latest_ranging.is_some() {
                    self.emit_record(fix)?;
                    self.phase = Phase::Streaming;
                } else {
                    self.pending_fix = Some(fix);
                }
            }
            Phase::Streaming => self.emit_record(fix)?,
        }
        Ok(())
    }

    fn handle_ranging_line(&mut self, line: &str) -> anyhow::Result<()> {
        match RangingSample::parse_line(line) {
            Ok(sample) => {
                self.metrics.record_ranging_line();
                self.latest_ranging = Some(TimedRanging {
                    sample,
                    received: Instant::now(),
                });
                if self.phase == Phase::AwaitingFirstRanging {
                    if let Some(fix) = self.pending_fix.take() {
                        self.emit_record(fix)?;
                        self.phase = Phase::Streaming;
                    }
                }
            }
            Err(err) => {
                self.metrics.record_malformed();
                self.logger.report(&format!("dropped ranging line: {}", err));
            }
        }
        Ok(())
    }

    /// Fuses one accepted fix with the newest ranging sample. The sample is
    /// reused across fixes when no newer line has arrived, unless the
    /// optional staleness limit says otherwise.
    fn emit_record(&mut self, fix: GnssFix) -> anyhow::Result<()> {
        let Some(ranging) = &self.latest_ranging else {
            return Ok(());
        };
        if let Some(limit_ms) = self.config.ranging_staleness_ms {
            if ranging.received.elapsed() > Duration::from_millis(limit_ms) {
                self.metrics.record_stale_skip();
                self.logger.report(&format!(
                    "skipping fix {}: ranging sample older than {}ms",
                    fix.time_utc, limit_ms
                ));
                return Ok(());
            }
        }
        let record = SessionRecord {
            time_utc: fix.time_utc,
            latitude: fix.latitude,
            longitude: fix.longitude,
            heading_deg: self.parser.last_heading(),
            distances_cm: ranging.sample.distances_cm,
        };
        let store = self
            .store
            .as_mut()
            .context("session storage not yet created")?;
        store.append(&record).context("appending session record")?;
        self.metrics.record_written();
        Ok(())
    }

    fn close(&mut self) -> anyhow::Result<SessionSummary> {
        self.phase = Phase::Closed;
        let metrics = self.metrics.snapshot();
        let store = self
            .store
            .take()
            .context("run ended before any session was started")?;
        let session_dir = store.finish().context("closing session log")?;
        let start_time = self.start_time.take().unwrap_or_default();
        self.logger.record(&format!(
            "session closed with {} records",
            metrics.records_written
        ));
        Ok(SessionSummary {
            session_dir,
            start_time,
            metrics,
        })
    }
}
