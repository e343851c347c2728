use acquisition::{FileSource, LineSource, ScriptedSource, SessionRecorder};
use anyhow::Context;
use clap::Parser;
use config::RecorderConfig;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use viz_bridge::VizBridge;

mod acquisition;
mod config;
mod generator;
mod postprocess;
mod viz_bridge;

#[derive(Parser)]
#[command(author, version, about = "Swath survey field recorder and reconstruction driver")]
struct Args {
    /// Load recorder settings from YAML
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,
    #[arg(long, default_value_t = 1.7)]
    spacing: f64,
    /// Skip fixes whose newest ranging sample is older than this
    #[arg(long)]
    staleness_ms: Option<u64>,
    /// Drive the loop from deterministic synthetic feeds
    #[arg(long, default_value_t = false)]
    simulate: bool,
    /// Replay a captured GNSS line log
    #[arg(long)]
    gnss_file: Option<PathBuf>,
    /// Replay a captured ranging line log
    #[arg(long)]
    ranging_file: Option<PathBuf>,
    /// Reconstruct an existing session directory and exit
    #[arg(long)]
    reconstruct: Option<PathBuf>,
    /// Keep the dataset endpoint alive after publishing
    #[arg(long, default_value_t = false)]
    serve: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let recorder_config = if let Some(path) = &args.config {
        RecorderConfig::load(path)?
    } else {
        RecorderConfig::from_args(args.data_dir.clone(), args.spacing, args.staleness_ms)
    };

    let session_dir = if let Some(dir) = args.reconstruct.clone() {
        dir
    } else {
        let (gnss, ranging) = build_sources(&args)?;
        let cancel = install_interrupt_flag();
        let mut recorder = SessionRecorder::new(recorder_config.clone(), gnss, ranging);
        let summary = recorder.run(&cancel)?;
        println!(
            "Session {} -> {} records ({} ranging lines, {} malformed, {} stale skips)",
            summary.start_time,
            summary.metrics.records_written,
            summary.metrics.ranging_lines,
            summary.metrics.malformed_sentences,
            summary.metrics.stale_skips
        );
        summary.session_dir
    };

    let model = postprocess::run(&session_dir, &recorder_config.to_array_config())?;
    let bridge = VizBridge::new();
    bridge.publish(&model)?;
    bridge.write_artifacts(&session_dir)?;
    bridge.publish_status(&format!("Datasets written to {}", session_dir.display()));

    if args.serve {
        bridge.serve();
        bridge.publish_status("Dataset endpoint running (Ctrl+C to stop)...");
        let runtime = TokioBuilder::new_current_thread()
            .enable_all()
            .build()
            .context("creating runtime for signal handling")?;
        runtime.block_on(async {
            signal::ctrl_c().await.context("awaiting Ctrl+C to exit")?;
            Ok::<(), anyhow::Error>(())
        })?;
    }

    Ok(())
}

fn build_sources(args: &Args) -> anyhow::Result<(Box<dyn LineSource>, Box<dyn LineSource>)> {
    if args.simulate {
        let (gnss_lines, ranging_lines) = generator::build_survey_feeds(&generator::FeedConfig::default());
        return Ok((
            Box::new(ScriptedSource::new(gnss_lines)),
            Box::new(ScriptedSource::new(ranging_lines)),
        ));
    }
    match (&args.gnss_file, &args.ranging_file) {
        (Some(gnss), Some(ranging)) => Ok((
            Box::new(FileSource::open(gnss)?),
            Box::new(FileSource::open(ranging)?),
        )),
        _ => anyhow::bail!("no input: pass --simulate, or both --gnss-file and --ranging-file"),
    }
}

/// Watches for Ctrl+C on a background thread and raises the shared flag;
/// the fusion loop observes it between poll cycles.
fn install_interrupt_flag() -> Arc<AtomicBool> {
    let flag = Arc::new(AtomicBool::new(false));
    let watcher = flag.clone();
    thread::spawn(move || {
        let runtime = match TokioBuilder::new_current_thread().enable_all().build() {
            Ok(runtime) => runtime,
            Err(err) => {
                log::warn!("interrupt watcher unavailable: {}", err);
                return;
            }
        };
        runtime.block_on(async {
            if signal::ctrl_c().await.is_ok() {
                watcher.store(true, Ordering::SeqCst);
            }
        });
    });
    flag
}
