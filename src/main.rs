//! Command-line entry point for Elo Changes
//!
//! Reads players, K-factors, baseline ratings and games, runs the rating
//! engine, and writes rating changes, new ratings and the leaderboard page.
//! Nothing is written unless the whole run succeeds.

use anyhow::Result;
use clap::Parser;
use elo_changes::config::AppConfig;
use elo_changes::leaderboard::{render, LabelBundle, OutputFormat};
use elo_changes::storage::{InputPaths, OutputPaths, RunInputs};
use elo_changes::ReportService;
use std::path::PathBuf;
use tracing::{error, info};

/// Elo Changes - batch Elo rating updates and leaderboard generation
#[derive(Parser)]
#[command(
    name = "elo-changes",
    version,
    about = "Compute Elo rating changes from a batch of games and publish a leaderboard",
    long_about = "Elo Changes applies a batch of rapid/blitz/classical games to baseline \
                 ratings using per-player K-factors, writes the rating changes and new \
                 ratings as JSON, and renders a sorted, localized leaderboard."
)]
struct Args {
    /// Players file (JSON array)
    #[arg(long, value_name = "FILE")]
    players: PathBuf,

    /// K-factor sets file (JSON array)
    #[arg(long, value_name = "FILE")]
    k_values: PathBuf,

    /// Baseline ratings file (JSON array)
    #[arg(long, value_name = "FILE")]
    baseline: PathBuf,

    /// Games file (JSON array, in the order they were played)
    #[arg(long, value_name = "FILE")]
    games: PathBuf,

    /// Where to write the new ratings
    #[arg(long, value_name = "FILE")]
    new_ratings: PathBuf,

    /// Where to write the rating changes
    #[arg(long, value_name = "FILE")]
    rating_changes: PathBuf,

    /// Directory for the rendered leaderboard
    #[arg(long, value_name = "DIR")]
    output_dir: PathBuf,

    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Locale override, e.g. en_US or ru_RU
    #[arg(long, value_name = "LOCALE")]
    locale: Option<String>,

    /// Extra labels (TOML), layered over the locale's built-in labels
    #[arg(long, value_name = "FILE")]
    labels: Option<PathBuf>,

    /// Leaderboard output format
    #[arg(long, value_enum, default_value = "html")]
    format: OutputFormat,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Dry run mode (compute and print, write nothing)
    #[arg(long, help = "Compute the run and print the leaderboard without writing files")]
    dry_run: bool,
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load configuration from file or environment, then apply CLI overrides
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = match &args.config {
        Some(config_path) => AppConfig::from_file(config_path)?,
        None => AppConfig::from_env()?,
    };

    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }
    if let Some(locale) = &args.locale {
        config.locale = locale.clone();
    }

    elo_changes::config::validate_config(&config)?;
    Ok(config)
}

fn load_labels(args: &Args, config: &AppConfig) -> Result<LabelBundle> {
    let bundle = LabelBundle::for_locale(&config.locale);
    match &args.labels {
        Some(path) => {
            info!("Loading labels from: {}", path.display());
            Ok(bundle.merged_with(LabelBundle::from_file(path)?))
        }
        None => Ok(bundle),
    }
}

fn display_startup_banner(config: &AppConfig) {
    info!("Elo Changes v{}", elo_changes::VERSION);
    info!("   Service: {}", config.service.name);
    info!("   Locale: {}", config.locale);
    info!("   Default rating: {}", config.rating.default_rating);
    info!(
        "   Columns: {} then {}",
        config.leaderboard.primary, config.leaderboard.secondary
    );
}

fn run(args: &Args, config: AppConfig) -> Result<()> {
    let labels = load_labels(args, &config)?;
    let inputs = InputPaths {
        players: args.players.clone(),
        k_values: args.k_values.clone(),
        baseline: args.baseline.clone(),
        games: args.games.clone(),
    };
    let service = ReportService::new(config);

    if args.dry_run {
        let report = service.run(&RunInputs::load(&inputs)?, &labels)?;
        let precision = service.config().leaderboard.rating_precision;
        print!("{}", render(&report.view, OutputFormat::Text, precision));
        info!("Dry run completed - no files written");
        return Ok(());
    }

    let outputs = OutputPaths {
        new_ratings: args.new_ratings.clone(),
        rating_changes: args.rating_changes.clone(),
        output_dir: args.output_dir.clone(),
    };
    service.run_and_publish(&inputs, &outputs, &labels, args.format)?;
    Ok(())
}

fn main() {
    let args = Args::parse();

    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {:#}", e);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    display_startup_banner(&config);

    if let Err(e) = run(&args, config) {
        error!("Rating run aborted: {:#}", e);
        std::process::exit(1);
    }
}
