//! Evaluate command - run one resilience trial on an image.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use pixelmark::config::Config;
use pixelmark::{evaluate, image_io, Attack, Strength};

use super::{noise_rng, CommandExecutor};

/// Embed a message, attack the result and check whether it survives.
///
/// Attacks run in the order crop, then noise. The input file is not modified.
#[derive(Args, Debug)]
pub struct EvaluateCommand {
    /// Cover image
    #[arg(short, long)]
    pub input: PathBuf,

    /// Message to embed
    #[arg(short, long)]
    pub message: String,

    /// Channels per pixel: low, medium or high
    #[arg(short, long)]
    pub strength: Option<Strength>,

    /// Center-crop keeping this percentage of each dimension
    #[arg(long)]
    pub crop: Option<f64>,

    /// Add noise hitting this share of pixels
    #[arg(long)]
    pub noise: Option<f64>,

    /// RNG seed for the noise attack
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

impl CommandExecutor for EvaluateCommand {
    fn execute(&self, config: &Config) -> Result<()> {
        let strength = self.strength.unwrap_or(config.strength);

        let mut attacks = Vec::new();
        if let Some(retain_pct) = self.crop {
            attacks.push(Attack::Crop { retain_pct });
        }
        if let Some(intensity) = self.noise {
            attacks.push(Attack::Noise { intensity });
        }

        let cover = image_io::load(&self.input)
            .with_context(|| format!("Failed to load image from {}", self.input.display()))?;

        let mut rng = noise_rng(self.seed.or(config.noise_seed));
        let report = evaluate(&cover, &self.message, strength, &attacks, &mut rng)
            .context("Resilience trial failed")?;

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&report).context("Failed to serialize report")?
            );
        } else {
            println!("{}", report);
        }

        Ok(())
    }
}
