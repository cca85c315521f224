//! RGBA8 pixel buffers.
//!
//! The codec never touches image files directly. Callers decode an image
//! into a [`PixelBuffer`] (the `image` crate conversions below are the only
//! file-format boundary) and encode the result back out afterwards.
//!
//! Layout: row-major, 4 samples per pixel in R, G, B, A order.

use image::{DynamicImage, RgbaImage};
use thiserror::Error;

/// Number of samples per pixel.
pub const CHANNELS: usize = 4;

/// Sample offsets within a pixel.
pub const RED: usize = 0;
pub const GREEN: usize = 1;
pub const BLUE: usize = 2;
pub const ALPHA: usize = 3;

/// Errors that can occur when constructing a pixel buffer.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum BufferError {
    #[error("Sample count {len} does not match {width}x{height} RGBA ({expected} expected)")]
    DimensionMismatch {
        width: u32,
        height: u32,
        len: usize,
        expected: usize,
    },

    #[error("Image dimensions {width}x{height} overflow the addressable size")]
    TooLarge { width: u32, height: u32 },
}

/// An owned RGBA8 raster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    samples: Vec<u8>,
}

impl PixelBuffer {
    /// Wraps raw RGBA samples, checking that the length matches the dimensions.
    pub fn new(width: u32, height: u32, samples: Vec<u8>) -> Result<Self, BufferError> {
        let expected = sample_len(width, height)?;
        if samples.len() != expected {
            return Err(BufferError::DimensionMismatch {
                width,
                height,
                len: samples.len(),
                expected,
            });
        }
        Ok(Self {
            width,
            height,
            samples,
        })
    }

    /// Wraps samples already known to match the dimensions.
    pub(crate) fn from_raw_parts(width: u32, height: u32, samples: Vec<u8>) -> Self {
        debug_assert_eq!(samples.len(), width as usize * height as usize * CHANNELS);
        Self {
            width,
            height,
            samples,
        }
    }

    /// Creates a buffer where every pixel has the same RGBA value.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Result<Self, BufferError> {
        let pixels = sample_len(width, height)? / CHANNELS;
        let samples = rgba.iter().copied().cycle().take(pixels * CHANNELS).collect();
        Ok(Self {
            width,
            height,
            samples,
        })
    }

    /// Builds a buffer by evaluating `f(x, y)` for every pixel in row-major order.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Result<Self, BufferError>
    where
        F: FnMut(u32, u32) -> [u8; 4],
    {
        let mut samples = Vec::with_capacity(sample_len(width, height)?);
        for y in 0..height {
            for x in 0..width {
                samples.extend_from_slice(&f(x, y));
            }
        }
        Ok(Self {
            width,
            height,
            samples,
        })
    }

    /// Takes ownership of a decoded RGBA image.
    pub fn from_image(image: RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            width,
            height,
            samples: image.into_raw(),
        }
    }

    /// Converts any decoded image to RGBA8 and wraps it.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self::from_image(image.into_rgba8())
    }

    /// Hands the samples back to the `image` crate for encoding.
    pub fn into_image(self) -> RgbaImage {
        // Dimensions and length were validated on construction.
        RgbaImage::from_raw(self.width, self.height, self.samples)
            .unwrap_or_else(|| unreachable!("pixel buffer length matches its dimensions"))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of pixels (samples / 4).
    pub fn pixel_count(&self) -> usize {
        self.samples.len() / CHANNELS
    }

    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    pub fn samples_mut(&mut self) -> &mut [u8] {
        &mut self.samples
    }

    pub fn into_samples(self) -> Vec<u8> {
        self.samples
    }

    /// Returns the RGBA value at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let start = (y as usize * self.width as usize + x as usize) * CHANNELS;
        let px = &self.samples[start..start + CHANNELS];
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Row `y` as a slice of raw samples.
    pub(crate) fn row(&self, y: u32) -> &[u8] {
        let stride = self.width as usize * CHANNELS;
        let start = y as usize * stride;
        &self.samples[start..start + stride]
    }
}

fn sample_len(width: u32, height: u32) -> Result<usize, BufferError> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|pixels| pixels.checked_mul(CHANNELS))
        .ok_or(BufferError::TooLarge { width, height })
}
