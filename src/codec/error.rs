//! Error types for embedding and extraction.

use thiserror::Error;

/// Errors that can occur while embedding a message.
///
/// All of these are detected before the pixel buffer is modified.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    #[error("Message too large: {len} bytes (limit {limit})")]
    MessageTooLarge { len: usize, limit: usize },

    #[error("Image too small to hide message: need {required_bits} bits, have {available_bits}")]
    InsufficientCapacity {
        required_bits: usize,
        available_bits: usize,
    },

    #[error("Message cannot be empty")]
    EmptyMessage,
}

/// Errors that can occur while extracting a message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodingError {
    /// The recovered length prefix is not something an embedder could have written.
    /// Usually means the image carries no watermark, or was read at the wrong strength.
    #[error("No watermark found (implausible payload length {length})")]
    ImplausibleLength { length: u32 },

    /// The length was plausible but the payload bytes are not valid UTF-8.
    #[error("Watermark payload is corrupted: {0}")]
    InvalidPayload(String),
}
