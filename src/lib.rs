//! # pixelmark - invisible watermarks in pixel LSBs
//!
//! pixelmark hides a short byte message in the least significant bits of an
//! RGBA image and reads it back. It also ships a small harness for checking
//! how well a watermark survives cropping and noise, and a cheap
//! presence heuristic.
//!
//! ## Overview
//!
//! - **Framing**: 32-bit little-endian length prefix, then the message bytes,
//!   every byte spread LSB-first over 8 bit slots
//! - **Strength**: 1, 2 or 3 bit slots per pixel (blue, then green, then alpha);
//!   red is never touched
//! - **All-or-nothing**: capacity is checked before the first write
//! - **Self-checking decode**: a zero or absurd length prefix means "no watermark"
//!
//! This is data hiding, not cryptography. The payload is neither encrypted
//! nor authenticated, and it does not survive lossy compression or resizing.
//!
//! ## Example Usage
//!
//! ```rust
//! use pixelmark::{embed, extract, PixelBuffer, Strength};
//!
//! let mut image = PixelBuffer::filled(100, 100, [200, 180, 160, 255]).unwrap();
//! embed(&mut image, b"CSA{test}", Strength::Low).unwrap();
//!
//! let found = extract(&image, Strength::Low).unwrap();
//! assert_eq!(found.message, "CSA{test}");
//! ```
//!
//! ## Modules
//!
//! - [`buffer`]: RGBA8 pixel buffers
//! - [`codec`]: bit-stream framing, strength policy, embedding and extraction
//! - [`resilience`]: crop/noise attacks and survival reports
//! - [`detect`]: statistical presence heuristic
//! - [`image_io`]: image file loading and saving
//! - [`config`]: CLI defaults

pub mod buffer;
pub mod codec;
pub mod config;
pub mod detect;
pub mod image_io;
pub mod resilience;

// Re-export commonly used types at the crate root
pub use buffer::{BufferError, PixelBuffer};
pub use codec::{
    capacity_bits, capacity_bytes, channels_for, embed, extract, DecodingError, EncodingError,
    Extraction, Strength, Watermarker, DECODE_CONFIDENCE, MAX_MESSAGE_LEN,
};
pub use detect::{detect, Detection};
pub use resilience::{
    evaluate, simulate_crop, simulate_noise, simulate_noise_with_rng, Attack, AttackError,
    ResilienceReport,
};
