//! Command module - Strategy pattern for CLI commands.
//!
//! Each command is a separate module implementing the `CommandExecutor` trait.

mod attack;
mod capacity;
mod detect;
mod embed;
mod evaluate;
mod extract;

pub use attack::AttackCommand;
pub use capacity::CapacityCommand;
pub use detect::DetectCommand;
pub use embed::EmbedCommand;
pub use evaluate::EvaluateCommand;
pub use extract::ExtractCommand;

use anyhow::Result;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use pixelmark::config::Config;

/// Trait for command execution - Strategy pattern.
///
/// Each command struct holds its parsed arguments and implements
/// this trait to define its execution logic. Flags the user left out
/// fall back to `config`.
pub trait CommandExecutor {
    /// Executes the command with its parsed arguments.
    fn execute(&self, config: &Config) -> Result<()>;
}

/// RNG for the noise attack: reproducible when a seed is known.
pub(crate) fn noise_rng(seed: Option<u64>) -> ChaCha20Rng {
    match seed {
        Some(seed) => ChaCha20Rng::seed_from_u64(seed),
        None => ChaCha20Rng::from_entropy(),
    }
}
