//! Extraction engine and capacity validator.

use serde::Serialize;
use tracing::{debug, warn};

use super::bits::{unpack_length, unpack_message, LENGTH_PREFIX_BITS};
use super::error::DecodingError;
use super::strength::Strength;
use super::{capacity_bits, slots, DECODE_CONFIDENCE, MAX_MESSAGE_LEN};
use crate::buffer::PixelBuffer;

/// A successfully recovered watermark.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Extraction {
    pub message: String,
    /// Always [`DECODE_CONFIDENCE`]: a decode either succeeds structurally or fails.
    pub confidence: f32,
}

/// Accepts a recovered length prefix only if an embedder could have written it.
///
/// Zero and anything above [`MAX_MESSAGE_LEN`] are rejected. This is the main
/// guard against "decoding" an image that was never watermarked.
pub fn validate_length(length: u32) -> Result<usize, DecodingError> {
    let len = length as usize;
    if len == 0 || len > MAX_MESSAGE_LEN {
        return Err(DecodingError::ImplausibleLength { length });
    }
    Ok(len)
}

/// Recovers a message embedded at `strength`.
///
/// Reads the same channel slots, in the same order, that [`embed`](super::embed())
/// writes for that strength.
///
/// # Errors
/// - [`DecodingError::ImplausibleLength`] if the prefix fails
///   [`validate_length`], or claims more payload than the buffer can hold.
/// - [`DecodingError::InvalidPayload`] if the payload is not valid UTF-8.
pub fn extract(buffer: &PixelBuffer, strength: Strength) -> Result<Extraction, DecodingError> {
    let samples = buffer.samples();
    let mut bits = slots(buffer.pixel_count(), strength).map(|slot| samples[slot] & 1);

    let prefix: Vec<u8> = bits.by_ref().take(LENGTH_PREFIX_BITS).collect();
    let length = unpack_length(&prefix);
    let len = validate_length(length).inspect_err(|_| {
        debug!(length, %strength, "rejected implausible length prefix");
    })?;

    let payload_bits = capacity_bits(buffer, strength).saturating_sub(LENGTH_PREFIX_BITS);
    if len * 8 > payload_bits {
        warn!(
            length,
            payload_bits,
            %strength,
            "length prefix exceeds what the image can hold"
        );
        return Err(DecodingError::ImplausibleLength { length });
    }

    let payload: Vec<u8> = bits.take(len * 8).collect();
    let message = unpack_message(&payload, len)?;

    debug!(message_len = len, %strength, "extracted watermark");
    Ok(Extraction {
        message,
        confidence: DECODE_CONFIDENCE,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::embed;

    fn gray(width: u32, height: u32) -> PixelBuffer {
        PixelBuffer::filled(width, height, [128, 128, 128, 255]).unwrap()
    }

    #[test]
    fn test_validate_length() {
        assert_eq!(validate_length(1), Ok(1));
        assert_eq!(validate_length(10_000), Ok(10_000));
        assert_eq!(
            validate_length(0),
            Err(DecodingError::ImplausibleLength { length: 0 })
        );
        assert_eq!(
            validate_length(10_001),
            Err(DecodingError::ImplausibleLength { length: 10_001 })
        );
    }

    #[test]
    fn test_roundtrip_all_strengths() {
        for strength in Strength::ALL {
            let mut buf = gray(50, 50);
            embed(&mut buf, "strength check ✓".as_bytes(), strength).unwrap();
            let extraction = extract(&buf, strength).unwrap();
            assert_eq!(extraction.message, "strength check ✓");
            assert_eq!(extraction.confidence, DECODE_CONFIDENCE);
        }
    }

    #[test]
    fn test_all_zero_buffer_has_no_watermark() {
        let buf = PixelBuffer::new(20, 20, vec![0u8; 1600]).unwrap();
        for strength in Strength::ALL {
            assert_eq!(
                extract(&buf, strength),
                Err(DecodingError::ImplausibleLength { length: 0 })
            );
        }
    }

    #[test]
    fn test_all_ones_buffer_has_no_watermark() {
        let buf = PixelBuffer::new(20, 20, vec![0xFF; 1600]).unwrap();
        assert_eq!(
            extract(&buf, Strength::Low),
            Err(DecodingError::ImplausibleLength { length: u32::MAX })
        );
    }

    #[test]
    fn test_length_beyond_buffer_rejected() {
        // Claim 200 bytes in a 64-pixel image
        let mut buf = gray(8, 8);
        let prefix = 200u32.to_le_bytes();
        for (i, slot) in slots(64, Strength::Low).take(32).enumerate() {
            let bit = (prefix[i / 8] >> (i % 8)) & 1;
            let sample = &mut buf.samples_mut()[slot];
            *sample = (*sample & 0xFE) | bit;
        }
        assert_eq!(
            extract(&buf, Strength::Low),
            Err(DecodingError::ImplausibleLength { length: 200 })
        );
    }

    #[test]
    fn test_buffer_smaller_than_prefix() {
        let buf = gray(3, 3);
        assert!(matches!(
            extract(&buf, Strength::High),
            Err(DecodingError::ImplausibleLength { .. })
        ));
    }

    #[test]
    fn test_invalid_utf8_payload() {
        let mut buf = gray(30, 30);
        embed(&mut buf, &[0xC3, 0x28, 0xFF], Strength::Low).unwrap();
        assert!(matches!(
            extract(&buf, Strength::Low),
            Err(DecodingError::InvalidPayload(_))
        ));
    }

    #[test]
    fn test_wrong_strength_does_not_return_message() {
        let mut buf = gray(60, 60);
        embed(&mut buf, b"medium only", Strength::Medium).unwrap();
        let misread = extract(&buf, Strength::Low);
        assert!(misread.map(|e| e.message) != Ok("medium only".to_string()));
    }
}
