//! Extract command - read a hidden message back out of an image.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use pixelmark::config::Config;
use pixelmark::{extract, image_io, DecodingError, Strength};

use super::CommandExecutor;

/// Recover a watermark embedded with `pixelmark embed`.
///
/// Use the same strength that was used for embedding.
#[derive(Args, Debug)]
pub struct ExtractCommand {
    /// Watermarked image
    #[arg(short, long)]
    pub input: PathBuf,

    /// Strength used at embed time
    #[arg(short, long)]
    pub strength: Option<Strength>,

    /// Write the message to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl CommandExecutor for ExtractCommand {
    fn execute(&self, config: &Config) -> Result<()> {
        let strength = self.strength.unwrap_or(config.strength);

        let buffer = image_io::load(&self.input)
            .with_context(|| format!("Failed to load image from {}", self.input.display()))?;

        let extraction = match extract(&buffer, strength) {
            Ok(extraction) => extraction,
            Err(DecodingError::ImplausibleLength { .. }) => {
                anyhow::bail!(
                    "No watermark found in {} at {} strength",
                    self.input.display(),
                    strength
                );
            }
            Err(e @ DecodingError::InvalidPayload(_)) => {
                return Err(e).context("Watermark found but could not be read");
            }
        };

        if let Some(path) = &self.output {
            std::fs::write(path, &extraction.message)
                .with_context(|| format!("Failed to write to {}", path.display()))?;
            eprintln!(
                "Message written to: {} ({} bytes, confidence {:.2})",
                path.display(),
                extraction.message.len(),
                extraction.confidence
            );
        } else {
            println!("{}", extraction.message);
            eprintln!("(confidence {:.2})", extraction.confidence);
        }

        Ok(())
    }
}
