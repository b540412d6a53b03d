//! Command line entry point for the Podium ranking engine
//!
//! Reads a ranking request from a JSON file, runs it through a
//! [`RankingEngine`] built from the loaded configuration, and prints the
//! resulting ranking as JSON on stdout. Logs go to stderr.

use anyhow::{Context, Result};
use clap::Parser;
use podium::config::{validate_config, AppConfig};
use podium::{
    HumanPlayer, InMemoryHistoryProvider, InMemoryPersonalizationProvider, MatchRecord,
    PersonalizationProfile, PlayerId, RankingEngine,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info};

/// Podium - rank recommendation and AI opponent calibration
#[derive(Parser)]
#[command(
    name = "podium",
    version,
    about = "Recommend match ranks for human players and generate calibrated AI opponents",
    long_about = "Podium reads a ranking request (human players, their current scores, optional \
                 match history and personalization profiles), selects a ranking strategy per \
                 player, synthesizes AI opponents and prints one reconciled ranking as JSON."
)]
struct Args {
    /// Ranking request file
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to the ranking request (JSON)"
    )]
    input: Option<PathBuf>,

    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Seed for opponent score generation
    #[arg(long, value_name = "SEED", help = "Fix the random seed for reproducible output")]
    seed: Option<u64>,

    /// Enable win-rate control mode
    #[arg(long, help = "Rank every player with win-rate control")]
    win_rate_control: bool,

    /// Enable personalized rankings
    #[arg(long, help = "Use personalization profiles for eligible veterans")]
    personalization: bool,

    /// Print engine metrics after ranking
    #[arg(long, help = "Print Prometheus metrics to stderr after ranking")]
    print_metrics: bool,

    /// Dry run mode (validate config and exit)
    #[arg(long, help = "Validate configuration and exit without ranking")]
    dry_run: bool,
}

/// Ranking request read from the input file
#[derive(Debug, Deserialize)]
struct RankingRequest {
    humans: Vec<HumanPlayer>,
    #[serde(default)]
    ai_count: usize,
    /// Match history per player, newest first
    #[serde(default)]
    history: HashMap<PlayerId, Vec<MatchRecord>>,
    #[serde(default)]
    personalization: HashMap<PlayerId, PersonalizationProfile>,
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load and merge configuration from environment, file and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    // Apply CLI overrides
    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    if let Some(seed) = args.seed {
        config.ranking.random_seed = Some(seed);
    }

    if args.win_rate_control {
        config.ranking.enable_win_rate_control = true;
    }

    if args.personalization {
        config.ranking.enable_personalization = true;
    }

    validate_config(&config)?;
    Ok(config)
}

fn read_request(path: &Path) -> Result<RankingRequest> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read request file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse request file {}", path.display()))
}

async fn run(args: &Args, config: AppConfig) -> Result<()> {
    let input = args
        .input
        .as_ref()
        .context("--input is required unless --dry-run is set")?;
    let request = read_request(input)?;

    info!(
        "Ranking {} humans with {} AI opponents",
        request.humans.len(),
        request.ai_count
    );

    let history = Arc::new(InMemoryHistoryProvider::with_history(request.history));
    let mut engine = RankingEngine::new(config.ranking, history)?;
    if !request.personalization.is_empty() {
        let profiles = InMemoryPersonalizationProvider::with_profiles(request.personalization);
        engine = engine.with_personalization_provider(Arc::new(profiles));
    }

    let result = engine
        .generate_match_rankings(&request.humans, request.ai_count)
        .await?;
    println!("{}", serde_json::to_string_pretty(&result)?);

    if args.print_metrics {
        eprintln!("{}", engine.metrics().render()?);
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    if args.dry_run {
        info!("Configuration validation successful");
        info!("   Service: {}", config.service.name);
        info!("   Max AI opponents: {}", config.ranking.max_ai_count);
        info!("   Max participants: {}", config.ranking.max_participants);
        info!(
            "   Personalization: {}, win-rate control: {}",
            config.ranking.enable_personalization, config.ranking.enable_win_rate_control
        );
        info!("Dry run completed - exiting without ranking");
        return Ok(());
    }

    if let Err(e) = run(&args, config).await {
        error!("Ranking request failed: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
