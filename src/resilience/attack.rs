//! Simulated image degradations.
//!
//! Both transforms are deliberately naive (no resampling, no filtering).
//! They produce repeatable stress cases for the codec, not realistic
//! image pipelines. Neither modifies its input.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::buffer::{PixelBuffer, BLUE, CHANNELS, GREEN, RED};

/// Largest change applied to a channel by the noise attack, in either direction.
pub const NOISE_AMPLITUDE: i16 = 50;

/// Errors from invalid attack parameters.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AttackError {
    #[error("Crop retention must be in (0, 100], got {0}")]
    InvalidRetention(f64),

    #[error("Noise intensity must be in [0, 1], got {0}")]
    InvalidIntensity(f64),
}

/// Center-crops `buffer`, keeping `retain_pct` percent of each dimension.
///
/// New size is `round(w * p / 100) x round(h * p / 100)`, never below 1x1
/// for a non-empty image. The kept window starts at
/// `((w - new_w) / 2, (h - new_h) / 2)`.
pub fn simulate_crop(buffer: &PixelBuffer, retain_pct: f64) -> Result<PixelBuffer, AttackError> {
    if !(retain_pct > 0.0 && retain_pct <= 100.0) {
        return Err(AttackError::InvalidRetention(retain_pct));
    }

    let (width, height) = buffer.dimensions();
    let new_width = scaled(width, retain_pct);
    let new_height = scaled(height, retain_pct);
    let left = ((width - new_width) / 2) as usize;
    let top = (height - new_height) / 2;

    let mut samples = Vec::with_capacity(new_width as usize * new_height as usize * CHANNELS);
    for y in top..top + new_height {
        let row = buffer.row(y);
        samples.extend_from_slice(&row[left * CHANNELS..(left + new_width as usize) * CHANNELS]);
    }

    debug!(
        from = ?(width, height),
        to = ?(new_width, new_height),
        offset = ?(left, top),
        "simulated crop"
    );
    Ok(PixelBuffer::from_raw_parts(new_width, new_height, samples))
}

fn scaled(dimension: u32, retain_pct: f64) -> u32 {
    if dimension == 0 {
        return 0;
    }
    let kept = (dimension as f64 * retain_pct / 100.0).round() as u32;
    kept.clamp(1, dimension)
}

/// Adds random noise to roughly `intensity` of the pixels, using the thread RNG.
///
/// See [`simulate_noise_with_rng`] for a reproducible variant.
pub fn simulate_noise(buffer: &PixelBuffer, intensity: f64) -> Result<PixelBuffer, AttackError> {
    simulate_noise_with_rng(buffer, intensity, &mut rand::thread_rng())
}

/// Adds random noise using the supplied RNG.
///
/// Each pixel is hit with probability `intensity`. A hit pixel gets one delta
/// drawn uniformly from `[-50, 50]`, added to red, green and blue and clamped
/// to `[0, 255]`. Alpha is left alone. With `intensity == 0.0` the output is
/// an exact copy.
pub fn simulate_noise_with_rng<R: Rng + ?Sized>(
    buffer: &PixelBuffer,
    intensity: f64,
    rng: &mut R,
) -> Result<PixelBuffer, AttackError> {
    if !(0.0..=1.0).contains(&intensity) {
        return Err(AttackError::InvalidIntensity(intensity));
    }

    let mut output = buffer.clone();
    if intensity == 0.0 {
        return Ok(output);
    }

    let mut hit = 0usize;
    for px in output.samples_mut().chunks_exact_mut(CHANNELS) {
        if !rng.gen_bool(intensity) {
            continue;
        }
        let delta = rng.gen_range(-NOISE_AMPLITUDE..=NOISE_AMPLITUDE);
        for channel in [RED, GREEN, BLUE] {
            px[channel] = (px[channel] as i16 + delta).clamp(0, 255) as u8;
        }
        hit += 1;
    }

    debug!(intensity, pixels_hit = hit, "simulated noise");
    Ok(output)
}

/// One step of an attack scenario.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Attack {
    Crop { retain_pct: f64 },
    Noise { intensity: f64 },
}

impl Attack {
    /// Applies this attack to `buffer`, drawing any randomness from `rng`.
    pub fn apply<R: Rng + ?Sized>(
        &self,
        buffer: &PixelBuffer,
        rng: &mut R,
    ) -> Result<PixelBuffer, AttackError> {
        match *self {
            Attack::Crop { retain_pct } => simulate_crop(buffer, retain_pct),
            Attack::Noise { intensity } => simulate_noise_with_rng(buffer, intensity, rng),
        }
    }
}

impl fmt::Display for Attack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Attack::Crop { retain_pct } => write!(f, "crop {}%", retain_pct),
            Attack::Noise { intensity } => write!(f, "noise {}", intensity),
        }
    }
}
