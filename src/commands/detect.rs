//! Detect command - heuristic presence check.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use pixelmark::config::Config;
use pixelmark::{detect, image_io};

use super::CommandExecutor;

/// Guess whether an image carries a watermark, without decoding it.
///
/// Heuristic only: unmarked photos often score close to marked ones.
/// Run `extract` for a definite answer.
#[derive(Args, Debug)]
pub struct DetectCommand {
    /// Image to inspect
    #[arg(short, long)]
    pub input: PathBuf,
}

impl CommandExecutor for DetectCommand {
    fn execute(&self, _config: &Config) -> Result<()> {
        let buffer = image_io::load(&self.input)
            .with_context(|| format!("Failed to load image from {}", self.input.display()))?;

        let detection = detect(&buffer);
        let verdict = if detection.likely_present {
            "watermark likely present"
        } else {
            "no watermark signal"
        };

        println!("{}: {}", self.input.display(), verdict);
        println!(
            "  Blue LSBs set: {}/{} ({:.1}%)",
            detection.ones,
            detection.sampled,
            detection.ratio() * 100.0
        );
        println!("  Note: heuristic only, not proof");

        Ok(())
    }
}
