//! LSB watermark codec for RGBA pixel buffers.
//!
//! Hides a framed bit stream in the least significant bit of up to three
//! channels per pixel (see [`Strength`]). Pixels are visited in raster
//! order, so the payload occupies the top rows of the image.
//!
//! The codec is stateless: every function takes the buffer it works on and
//! nothing else, so extraction and detection can run concurrently on a
//! shared buffer.

pub mod bits;
pub mod embed;
pub mod error;
pub mod extract;
pub mod strength;

pub use bits::{pack, unpack_length, unpack_message, LENGTH_PREFIX_BITS};
pub use embed::embed;
pub use error::{DecodingError, EncodingError};
pub use extract::{extract, validate_length, Extraction};
pub use strength::{channels_for, ParseStrengthError, Strength};

use crate::buffer::{PixelBuffer, CHANNELS};

/// Largest payload accepted on embed and believed on extract.
/// Anything above this read back from an image is treated as noise.
pub const MAX_MESSAGE_LEN: usize = 10_000;

/// Confidence reported for a structurally valid decode.
pub const DECODE_CONFIDENCE: f32 = 0.95;

/// Total bit slots available in `buffer` at `strength`, length prefix included.
pub fn capacity_bits(buffer: &PixelBuffer, strength: Strength) -> usize {
    buffer.pixel_count() * strength.channels()
}

/// Largest message (in bytes) that fits in `buffer` at `strength`.
pub fn capacity_bytes(buffer: &PixelBuffer, strength: Strength) -> usize {
    let payload_bits = capacity_bits(buffer, strength).saturating_sub(LENGTH_PREFIX_BITS);
    (payload_bits / 8).min(MAX_MESSAGE_LEN)
}

/// Sample indices that carry bits, in stream order.
pub(crate) fn slots(pixel_count: usize, strength: Strength) -> impl Iterator<Item = usize> {
    let offsets = strength.channel_offsets();
    (0..pixel_count).flat_map(move |pixel| offsets.iter().map(move |c| pixel * CHANNELS + c))
}

/// A codec bound to one strength level.
///
/// Holds no buffer state; copy it freely between threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Watermarker {
    strength: Strength,
}

impl Watermarker {
    pub fn new(strength: Strength) -> Self {
        Self { strength }
    }

    pub fn strength(&self) -> Strength {
        self.strength
    }

    /// See [`embed()`].
    pub fn embed(&self, buffer: &mut PixelBuffer, message: &[u8]) -> Result<(), EncodingError> {
        embed(buffer, message, self.strength)
    }

    /// See [`extract()`].
    pub fn extract(&self, buffer: &PixelBuffer) -> Result<Extraction, DecodingError> {
        extract(buffer, self.strength)
    }

    /// See [`capacity_bytes`].
    pub fn capacity(&self, buffer: &PixelBuffer) -> usize {
        capacity_bytes(buffer, self.strength)
    }
}
