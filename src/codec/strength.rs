//! Embedding strength and the channel budget it maps to.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::buffer::{ALPHA, BLUE, GREEN};

/// Channels written per pixel, in the order they receive bits.
/// Red is never used so hue stays stable.
const CHANNEL_ORDER: [usize; 3] = [BLUE, GREEN, ALPHA];

/// How many channels of each pixel carry payload bits.
///
/// The same strength must be used to embed and to extract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strength {
    /// Blue only.
    #[default]
    Low,
    /// Blue and green.
    Medium,
    /// Blue, green and alpha.
    High,
}

impl Strength {
    pub const ALL: [Strength; 3] = [Strength::Low, Strength::Medium, Strength::High];

    /// Number of bit slots per pixel.
    pub fn channels(self) -> usize {
        match self {
            Strength::Low => 1,
            Strength::Medium => 2,
            Strength::High => 3,
        }
    }

    /// Sample offsets (within a pixel) that carry bits, in write order.
    pub fn channel_offsets(self) -> &'static [usize] {
        &CHANNEL_ORDER[..self.channels()]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Strength::Low => "low",
            Strength::Medium => "medium",
            Strength::High => "high",
        }
    }
}

/// Channel budget for a strength level.
pub fn channels_for(strength: Strength) -> usize {
    strength.channels()
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown strength '{0}' (expected low, medium or high)")]
pub struct ParseStrengthError(String);

impl FromStr for Strength {
    type Err = ParseStrengthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Strength::Low),
            "medium" => Ok(Strength::Medium),
            "high" => Ok(Strength::High),
            _ => Err(ParseStrengthError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_budget() {
        assert_eq!(channels_for(Strength::Low), 1);
        assert_eq!(channels_for(Strength::Medium), 2);
        assert_eq!(channels_for(Strength::High), 3);
    }

    #[test]
    fn test_channel_order_skips_red() {
        assert_eq!(Strength::Low.channel_offsets(), &[BLUE]);
        assert_eq!(Strength::Medium.channel_offsets(), &[BLUE, GREEN]);
        assert_eq!(Strength::High.channel_offsets(), &[BLUE, GREEN, ALPHA]);
        for strength in Strength::ALL {
            assert!(!strength.channel_offsets().contains(&crate::buffer::RED));
        }
    }

    #[test]
    fn test_parse() {
        assert_eq!("low".parse::<Strength>().unwrap(), Strength::Low);
        assert_eq!(" Medium ".parse::<Strength>().unwrap(), Strength::Medium);
        assert_eq!("HIGH".parse::<Strength>().unwrap(), Strength::High);
        assert!("extreme".parse::<Strength>().is_err());
    }

    #[test]
    fn test_display_roundtrip() {
        for strength in Strength::ALL {
            assert_eq!(strength.to_string().parse::<Strength>().unwrap(), strength);
        }
    }
}
