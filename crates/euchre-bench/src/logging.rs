use std::fs::{self, File};
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{Level, Span, event, info_span};
use tracing_appender::non_blocking::{self, WorkerGuard};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::{LoggingConfig, ResolvedOutputs};

const TELEMETRY_FILE: &str = "telemetry.jsonl";

/// Keeps the background writer alive; dropping it flushes the telemetry file.
pub struct LoggingGuard {
    _guard: WorkerGuard,
    pub telemetry_path: PathBuf,
}

/// Installs the JSON telemetry subscriber for `run_id` when structured logging
/// is enabled. Every event is written with its span list, so events raised
/// under [`run_span`] and its game spans carry the run and game identifiers.
pub fn init_logging(
    logging: &LoggingConfig,
    outputs: &ResolvedOutputs,
    run_id: &str,
) -> Result<Option<LoggingGuard>> {
    if !logging.enable_structured {
        return Ok(None);
    }

    let telemetry_dir = outputs.telemetry_dir();
    fs::create_dir_all(&telemetry_dir).with_context(|| {
        format!(
            "creating telemetry directory at {}",
            telemetry_dir.display()
        )
    })?;

    let telemetry_path = telemetry_dir.join(TELEMETRY_FILE);
    let file = File::create(&telemetry_path)
        .with_context(|| format!("creating telemetry file at {}", telemetry_path.display()))?;

    let (writer, guard) = non_blocking::NonBlockingBuilder::default()
        .lossy(false)
        .finish(file);

    let level = logging.level().unwrap_or(Level::INFO);
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .json()
        .with_current_span(false)
        .with_span_list(true)
        .with_span_events(FmtSpan::NONE)
        .with_writer(writer)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .with_context(|| format!("installing telemetry subscriber for run '{run_id}'"))?;

    event!(
        target: "euchre_bench::logging",
        Level::INFO,
        run_id,
        level = %level,
        path = %telemetry_path.display(),
        "telemetry started"
    );

    Ok(Some(LoggingGuard {
        _guard: guard,
        telemetry_path,
    }))
}

/// Root span of one simulation run.
pub fn run_span(run_id: &str) -> Span {
    info_span!(target: "euchre_bench::runner", "run", run_id)
}

/// Span for one game, parented to the run span so it survives the hop onto a
/// worker thread.
pub fn game_span(run: &Span, index: usize, seed: u64) -> Span {
    info_span!(target: "euchre_bench::game", parent: run, "game", game = index, seed)
}
