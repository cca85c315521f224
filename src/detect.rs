//! Statistical presence check.
//!
//! This is a heuristic, not a decode. It looks at the blue-channel LSBs of
//! the first pixels and flags the image when more than 40% of them are set.
//! Unwatermarked natural images sit near 50% too, so a positive result is a
//! hint at best. Use [`extract`](crate::codec::extract()) for an answer.

use serde::Serialize;
use tracing::debug;

use crate::buffer::{PixelBuffer, BLUE, CHANNELS};

/// Raw samples examined from the start of the buffer.
pub const SAMPLE_BYTES: usize = 1000;

/// Percentage of set LSBs above which a watermark is reported as likely.
pub const PRESENCE_THRESHOLD_PCT: usize = 40;

/// Result of a presence check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Detection {
    pub likely_present: bool,
    /// Pixels whose blue LSB was examined.
    pub sampled: usize,
    /// How many of those had the LSB set.
    pub ones: usize,
}

impl Detection {
    /// Share of sampled LSBs that were set, 0.0 for an empty sample.
    pub fn ratio(&self) -> f32 {
        if self.sampled == 0 {
            0.0
        } else {
            self.ones as f32 / self.sampled as f32
        }
    }
}

/// Runs the presence heuristic on `buffer`.
pub fn detect(buffer: &PixelBuffer) -> Detection {
    let window = &buffer.samples()[..buffer.samples().len().min(SAMPLE_BYTES)];
    let (sampled, ones) = window
        .chunks_exact(CHANNELS)
        .fold((0usize, 0usize), |(sampled, ones), px| {
            (sampled + 1, ones + (px[BLUE] & 1) as usize)
        });

    let likely_present = sampled > 0 && ones * 100 > sampled * PRESENCE_THRESHOLD_PCT;
    debug!(sampled, ones, likely_present, "presence check");

    Detection {
        likely_present,
        sampled,
        ones,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_window() {
        let buf = PixelBuffer::filled(100, 100, [0, 0, 1, 0]).unwrap();
        let detection = detect(&buf);
        assert_eq!(detection.sampled, 250);
        assert_eq!(detection.ones, 250);
        assert!(detection.likely_present);
        assert_eq!(detection.ratio(), 1.0);
    }

    #[test]
    fn test_even_samples_not_present() {
        let buf = PixelBuffer::filled(100, 100, [1, 1, 2, 1]).unwrap();
        let detection = detect(&buf);
        assert_eq!(detection.ones, 0);
        assert!(!detection.likely_present);
    }

    #[test]
    fn test_threshold_is_strict() {
        // 10 pixels, exactly 4 with the LSB set: 40% is not above 40%
        let buf = PixelBuffer::from_fn(10, 1, |x, _| [0, 0, (x < 4) as u8, 0]).unwrap();
        assert!(!detect(&buf).likely_present);

        let buf = PixelBuffer::from_fn(10, 1, |x, _| [0, 0, (x < 5) as u8, 0]).unwrap();
        assert!(detect(&buf).likely_present);
    }

    #[test]
    fn test_only_blue_counts() {
        let buf = PixelBuffer::filled(10, 10, [1, 1, 0, 1]).unwrap();
        assert_eq!(detect(&buf).ones, 0);
    }

    #[test]
    fn test_empty_buffer() {
        let buf = PixelBuffer::new(0, 0, Vec::new()).unwrap();
        let detection = detect(&buf);
        assert_eq!(detection.sampled, 0);
        assert!(!detection.likely_present);
        assert_eq!(detection.ratio(), 0.0);
    }
}
