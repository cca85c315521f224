//! Capacity command - how much fits in an image.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use pixelmark::config::Config;
use pixelmark::{capacity_bits, capacity_bytes, image_io, Strength};

use super::CommandExecutor;

/// Show the largest message an image can hold at each strength.
#[derive(Args, Debug)]
pub struct CapacityCommand {
    /// Cover image
    #[arg(short, long)]
    pub input: PathBuf,

    /// Only show this strength
    #[arg(short, long)]
    pub strength: Option<Strength>,
}

impl CommandExecutor for CapacityCommand {
    fn execute(&self, _config: &Config) -> Result<()> {
        let buffer = image_io::load(&self.input)
            .with_context(|| format!("Failed to load image from {}", self.input.display()))?;

        let strengths = match self.strength {
            Some(strength) => vec![strength],
            None => Strength::ALL.to_vec(),
        };

        let (width, height) = buffer.dimensions();
        println!("{} ({}x{})", self.input.display(), width, height);
        for strength in strengths {
            println!(
                "  {:<6} {:>6} bytes ({} bit slots)",
                strength.as_str(),
                capacity_bytes(&buffer, strength),
                capacity_bits(&buffer, strength)
            );
        }

        Ok(())
    }
}
