//! Embed, degrade, extract: one resilience trial.

use std::fmt;

use rand::Rng;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use super::attack::{Attack, AttackError};
use crate::buffer::PixelBuffer;
use crate::codec::{embed, extract, DecodingError, EncodingError, Strength};

/// Errors that stop a trial before extraction is attempted.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HarnessError {
    #[error("Embedding failed: {0}")]
    Encoding(#[from] EncodingError),

    #[error("Attack failed: {0}")]
    Attack(#[from] AttackError),
}

/// What extraction produced after the attacks.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// A structurally valid message came back (not necessarily the original).
    Recovered { message: String, confidence: f32 },
    /// The length prefix was rejected.
    NotFound { length: u32 },
    /// The payload was not valid UTF-8.
    Corrupted { reason: String },
}

impl From<Result<crate::codec::Extraction, DecodingError>> for Outcome {
    fn from(result: Result<crate::codec::Extraction, DecodingError>) -> Self {
        match result {
            Ok(extraction) => Outcome::Recovered {
                message: extraction.message,
                confidence: extraction.confidence,
            },
            Err(DecodingError::ImplausibleLength { length }) => Outcome::NotFound { length },
            Err(DecodingError::InvalidPayload(reason)) => Outcome::Corrupted { reason },
        }
    }
}

/// Result of one trial.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResilienceReport {
    pub strength: Strength,
    pub attacks: Vec<Attack>,
    pub original_dimensions: (u32, u32),
    pub final_dimensions: (u32, u32),
    pub outcome: Outcome,
    /// True only if the exact original message was recovered.
    pub survived: bool,
}

/// Embeds `message` into a copy of `cover`, applies `attacks` in order and
/// tries to read the message back.
///
/// The cover itself is never modified. Decode failures are part of the
/// report, not errors.
pub fn evaluate<R: Rng + ?Sized>(
    cover: &PixelBuffer,
    message: &str,
    strength: Strength,
    attacks: &[Attack],
    rng: &mut R,
) -> Result<ResilienceReport, HarnessError> {
    let mut marked = cover.clone();
    embed(&mut marked, message.as_bytes(), strength)?;

    let mut degraded = marked;
    for attack in attacks {
        degraded = attack.apply(&degraded, rng)?;
    }

    let outcome = Outcome::from(extract(&degraded, strength));
    let survived = matches!(&outcome, Outcome::Recovered { message: m, .. } if m == message);

    info!(
        %strength,
        attacks = attacks.len(),
        survived,
        "resilience trial finished"
    );

    Ok(ResilienceReport {
        strength,
        attacks: attacks.to_vec(),
        original_dimensions: cover.dimensions(),
        final_dimensions: degraded.dimensions(),
        outcome,
        survived,
    })
}

impl fmt::Display for ResilienceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (w, h) = self.original_dimensions;
        let (fw, fh) = self.final_dimensions;
        writeln!(f, "Strength:   {}", self.strength)?;
        if self.attacks.is_empty() {
            writeln!(f, "Attacks:    none")?;
        } else {
            let steps: Vec<String> = self.attacks.iter().map(|a| a.to_string()).collect();
            writeln!(f, "Attacks:    {}", steps.join(" -> "))?;
        }
        writeln!(f, "Dimensions: {}x{} -> {}x{}", w, h, fw, fh)?;
        match &self.outcome {
            Outcome::Recovered {
                message,
                confidence,
            } => writeln!(f, "Extracted:  {:?} (confidence {:.2})", message, confidence)?,
            Outcome::NotFound { length } => {
                writeln!(f, "Extracted:  nothing (implausible length {})", length)?
            }
            Outcome::Corrupted { reason } => writeln!(f, "Extracted:  corrupted ({})", reason)?,
        }
        write!(f, "Survived:   {}", if self.survived { "yes" } else { "no" })
    }
}
