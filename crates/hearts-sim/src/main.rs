use std::path::PathBuf;

use clap::Parser;

use hearts_sim::config::SimConfig;
use hearts_sim::logging::init_logging;
use hearts_sim::runner::SimRunner;

/// Plays seeded Hearts games end to end and records the results.
#[derive(Debug, Parser)]
#[command(
    name = "hearts-sim",
    author,
    version,
    about = "Deterministic Hearts game simulator"
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "sim/sim.yaml")]
    config: PathBuf,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Override the number of games to play.
    #[arg(long, value_name = "GAMES")]
    games: Option<usize>,

    /// Override the master RNG seed.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Load the game rules from a separate YAML file instead of the `game` block.
    #[arg(long, value_name = "FILE")]
    rules: Option<PathBuf>,

    /// Exit after validating the configuration (no games are played).
    #[arg(long)]
    validate_only: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = SimConfig::from_path(&cli.config)?;

    if let Some(run_id) = cli.run_id {
        config.run_id = run_id;
    }

    if let Some(rules) = cli.rules.as_ref() {
        config.load_rules(rules)?;
    }

    if let Some(games) = cli.games {
        config.games = games;
    }

    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }

    config.validate()?;

    let outputs = config.resolved_outputs();
    let run_id = config.run_id.clone();
    let games = config.games;

    println!(
        "Loaded configuration '{run_id}': {games} game{} to {} points",
        if games == 1 { "" } else { "s" },
        config.game.target_score
    );

    let logging_guard = init_logging(&config.logging, &outputs)?;
    let runner = SimRunner::new(config, outputs)?;

    if cli.validate_only {
        println!("Validation-only mode: simulation skipped.");
        return Ok(());
    }

    let summary = runner.run()?;
    println!(
        "Simulation complete for '{run_id}': {} games, {} rounds, {} moon shots → {} rows at {}",
        summary.games_played,
        summary.rounds_played,
        summary.moon_shots,
        summary.rows_written,
        summary.jsonl_path.display()
    );
    if let Some(guard) = logging_guard.as_ref() {
        println!("Telemetry log: {}", guard.telemetry_path.display());
    }

    Ok(())
}
