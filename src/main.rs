//! pixelmark - invisible image watermarks
//!
//! A CLI for embedding, extracting and stress-testing LSB watermarks.

mod commands;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{
    AttackCommand, CapacityCommand, CommandExecutor, DetectCommand, EmbedCommand,
    EvaluateCommand, ExtractCommand,
};
use pixelmark::config::{Config, ConfigError};

/// pixelmark - invisible image watermarks
///
/// Hides a short message in the least significant bits of an image, reads it
/// back, and simulates crop/noise attacks to see what survives.
#[derive(Parser)]
#[command(name = "pixelmark")]
#[command(version)]
#[command(about = "Invisible LSB watermarks with crop/noise resilience testing")]
#[command(long_about = None)]
struct Cli {
    /// Show debug logs on stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file to use instead of ~/.pixelmark/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Hide a message in an image
    Embed(EmbedCommand),

    /// Read a hidden message from an image
    Extract(ExtractCommand),

    /// Guess whether an image is watermarked (heuristic)
    Detect(DetectCommand),

    /// Show how many bytes an image can hold
    Capacity(CapacityCommand),

    /// Apply a simulated crop or noise attack
    Attack(AttackCommand),

    /// Embed, attack and extract in one go, and report the result
    Evaluate(EvaluateCommand),
}

impl Commands {
    fn executor(&self) -> &dyn CommandExecutor {
        match self {
            Commands::Embed(cmd) => cmd,
            Commands::Extract(cmd) => cmd,
            Commands::Detect(cmd) => cmd,
            Commands::Capacity(cmd) => cmd,
            Commands::Attack(cmd) => cmd,
            Commands::Evaluate(cmd) => cmd,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(cli.config.as_ref())?;
    cli.command.executor().execute(&config)
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "pixelmark=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    if let Some(path) = path {
        return Config::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()));
    }

    match Config::load() {
        // No home directory: run on built-in defaults
        Err(ConfigError::NoConfigDir) => Ok(Config::default()),
        result => result.context("Failed to load config"),
    }
}
