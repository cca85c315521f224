//! Attack command - degrade an image the way the resilience harness does.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use pixelmark::config::Config;
use pixelmark::{image_io, simulate_crop, simulate_noise_with_rng, PixelBuffer};

use super::{noise_rng, CommandExecutor};

/// Apply a simulated crop or noise attack to an image.
#[derive(Args, Debug)]
pub struct AttackCommand {
    #[command(subcommand)]
    pub kind: AttackKind,
}

#[derive(Subcommand, Debug)]
pub enum AttackKind {
    /// Keep the center of the image
    Crop {
        /// Image to attack
        #[arg(short, long)]
        input: PathBuf,

        /// Where to write the cropped image
        #[arg(short, long)]
        output: PathBuf,

        /// Percentage of each dimension to keep, in (0, 100]
        #[arg(short, long)]
        retain: Option<f64>,
    },

    /// Add random RGB noise to a share of the pixels
    Noise {
        /// Image to attack
        #[arg(short, long)]
        input: PathBuf,

        /// Where to write the noisy image
        #[arg(short, long)]
        output: PathBuf,

        /// Probability that a pixel is hit, in [0, 1]
        #[arg(long)]
        intensity: Option<f64>,

        /// RNG seed for a reproducible result
        #[arg(long)]
        seed: Option<u64>,
    },
}

impl CommandExecutor for AttackCommand {
    fn execute(&self, config: &Config) -> Result<()> {
        match &self.kind {
            AttackKind::Crop {
                input,
                output,
                retain,
            } => {
                let retain = retain.unwrap_or(config.crop_retain_pct);
                let buffer = load(input)?;
                let cropped = simulate_crop(&buffer, retain)?;
                save(&cropped, output)?;

                let (w, h) = buffer.dimensions();
                let (cw, ch) = cropped.dimensions();
                println!("Cropped {}x{} -> {}x{}: {}", w, h, cw, ch, output.display());
            }
            AttackKind::Noise {
                input,
                output,
                intensity,
                seed,
            } => {
                let intensity = intensity.unwrap_or(config.noise_intensity);
                let mut rng = noise_rng(seed.or(config.noise_seed));
                let buffer = load(input)?;
                let noisy = simulate_noise_with_rng(&buffer, intensity, &mut rng)?;
                save(&noisy, output)?;

                println!("Added noise (intensity {}): {}", intensity, output.display());
            }
        }

        Ok(())
    }
}

fn load(path: &Path) -> Result<PixelBuffer> {
    image_io::load(path).with_context(|| format!("Failed to load image from {}", path.display()))
}

fn save(buffer: &PixelBuffer, path: &Path) -> Result<()> {
    image_io::save(buffer, path).with_context(|| format!("Failed to save image to {}", path.display()))
}
