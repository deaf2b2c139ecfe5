use std::path::PathBuf;

use clap::Parser;

use euchre_bench::config::SimulationConfig;
use euchre_bench::logging::init_logging;
use euchre_bench::simulation::SimulationRunner;

/// Self-play simulation harness for the euchre bots.
#[derive(Debug, Parser)]
#[command(
    name = "euchre-bench",
    author,
    version,
    about = "Deterministic euchre self-play simulator"
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "bench/bench.yaml")]
    config: PathBuf,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Override the number of games to play.
    #[arg(long, value_name = "GAMES")]
    games: Option<usize>,

    /// Override the base RNG seed.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Override the worker thread count.
    #[arg(long, value_name = "COUNT")]
    threads: Option<usize>,

    /// Show a progress bar while games run.
    #[arg(long)]
    progress: bool,

    /// Exit after validating the configuration (no games are played).
    #[arg(long)]
    validate_only: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = SimulationConfig::from_path(&cli.config)?;

    if let Some(run_id) = cli.run_id {
        config.run_id = run_id;
    }
    if let Some(games) = cli.games {
        config.simulation.games = games;
    }
    if let Some(seed) = cli.seed {
        config.simulation.seed = Some(seed);
    }
    if let Some(threads) = cli.threads {
        config.simulation.threads = Some(threads);
    }

    config.validate()?;

    let outputs = config.resolved_outputs();
    let run_id = config.run_id.clone();
    println!(
        "Loaded configuration '{run_id}' ({} games to {} points)",
        config.simulation.games, config.simulation.target_score
    );

    if cli.validate_only {
        println!("Validation-only mode: simulation skipped.");
        return Ok(());
    }

    let logging_guard = init_logging(&config.logging, &outputs, &run_id)?;
    let summary = SimulationRunner::new(config, outputs)
        .with_progress(cli.progress)
        .run()?;

    println!(
        "Simulation complete for '{run_id}': {} games, {} rounds at {}",
        summary.games_played,
        summary.rows_written,
        summary.jsonl_path.display()
    );
    println!("distribution_of_points: {:?}", summary.analytics.distribution);
    let average = &summary.analytics.average;
    println!(
        "average_points_per_hand: {:.4} (95% CI [{:.4}, {:.4}])",
        average.mean, average.ci95.0, average.ci95.1
    );
    println!("Summary table: {}", summary.summary_path.display());
    if let Some(guard) = logging_guard.as_ref() {
        println!("Telemetry log: {}", guard.telemetry_path.display());
    }

    Ok(())
}
