//! Embed command - hide a message in an image.

use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use pixelmark::config::Config;
use pixelmark::{capacity_bytes, embed, image_io, Strength};

use super::CommandExecutor;

/// Hide a message in an image's least significant bits.
///
/// The output must be a lossless format (.png or .bmp). The same strength
/// has to be given again when extracting.
#[derive(Args, Debug)]
pub struct EmbedCommand {
    /// Cover image
    #[arg(short, long)]
    pub input: PathBuf,

    /// Where to write the watermarked image (.png or .bmp)
    #[arg(short, long)]
    pub output: PathBuf,

    /// Text message to embed (mutually exclusive with --file)
    #[arg(short, long, conflicts_with = "file")]
    pub message: Option<String>,

    /// File whose contents (UTF-8 text) are embedded
    #[arg(short, long, conflicts_with = "message")]
    pub file: Option<PathBuf>,

    /// Channels per pixel: low (1), medium (2) or high (3)
    #[arg(short, long)]
    pub strength: Option<Strength>,
}

impl CommandExecutor for EmbedCommand {
    fn execute(&self, config: &Config) -> Result<()> {
        let strength = self.strength.unwrap_or(config.strength);

        let message = self.read_message()?;
        if message.is_empty() {
            anyhow::bail!("Message cannot be empty");
        }

        let mut buffer = image_io::load(&self.input)
            .with_context(|| format!("Failed to load image from {}", self.input.display()))?;

        let capacity = capacity_bytes(&buffer, strength);
        embed(&mut buffer, message.as_bytes(), strength).with_context(|| {
            format!(
                "Cannot embed {} bytes at {} strength (capacity {} bytes)",
                message.len(),
                strength,
                capacity
            )
        })?;

        image_io::save(&buffer, &self.output)
            .with_context(|| format!("Failed to save image to {}", self.output.display()))?;

        let (width, height) = buffer.dimensions();
        println!("Watermark embedded: {}", self.output.display());
        println!("  Image:    {}x{}", width, height);
        println!("  Strength: {}", strength);
        println!("  Message:  {} of {} bytes", message.len(), capacity);

        Ok(())
    }
}

impl EmbedCommand {
    fn read_message(&self) -> Result<String> {
        if let Some(message) = &self.message {
            return Ok(message.clone());
        }

        if let Some(path) = &self.file {
            return std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read message from {}", path.display()));
        }

        eprintln!("Reading message from stdin (Ctrl+D to finish):");
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read message from stdin")?;
        Ok(buffer.trim().to_string())
    }
}
