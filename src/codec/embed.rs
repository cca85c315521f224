//! Embedding engine.

use tracing::{debug, warn};

use super::bits::pack;
use super::error::EncodingError;
use super::strength::Strength;
use super::{capacity_bits, slots, MAX_MESSAGE_LEN};
use crate::buffer::PixelBuffer;

/// Hides `message` in `buffer` in place.
///
/// Each bit of the framed stream replaces the LSB of one channel slot,
/// walking pixels in raster order and channels in [`Strength::channel_offsets`]
/// order. Samples past the end of the stream are left alone.
///
/// # Errors
/// Returns [`EncodingError::EmptyMessage`], [`EncodingError::MessageTooLarge`]
/// or [`EncodingError::InsufficientCapacity`]. In every error case the buffer
/// is untouched.
pub fn embed(buffer: &mut PixelBuffer, message: &[u8], strength: Strength) -> Result<(), EncodingError> {
    if message.is_empty() {
        return Err(EncodingError::EmptyMessage);
    }
    if message.len() > MAX_MESSAGE_LEN {
        return Err(EncodingError::MessageTooLarge {
            len: message.len(),
            limit: MAX_MESSAGE_LEN,
        });
    }

    let bits = pack(message)?;
    let available_bits = capacity_bits(buffer, strength);
    if bits.len() > available_bits {
        warn!(
            required_bits = bits.len(),
            available_bits,
            %strength,
            "message does not fit in image"
        );
        return Err(EncodingError::InsufficientCapacity {
            required_bits: bits.len(),
            available_bits,
        });
    }

    let pixel_count = buffer.pixel_count();
    let samples = buffer.samples_mut();
    for (slot, bit) in slots(pixel_count, strength).zip(&bits) {
        // Clear LSB and set new bit
        samples[slot] = (samples[slot] & 0xFE) | bit;
    }

    debug!(
        message_len = message.len(),
        bits = bits.len(),
        pixels_touched = bits.len().div_ceil(strength.channels()),
        %strength,
        "embedded watermark"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::{ALPHA, BLUE, GREEN, RED};

    fn gradient(width: u32, height: u32) -> PixelBuffer {
        PixelBuffer::from_fn(width, height, |x, y| {
            [
                ((x * 17) % 256) as u8,
                ((y * 23) % 256) as u8,
                (((x + y) * 31) % 256) as u8,
                255,
            ]
        })
        .unwrap()
    }

    #[test]
    fn test_only_lsb_changes() {
        let original = gradient(40, 40);
        let mut marked = original.clone();
        embed(&mut marked, b"Hello, watermark!", Strength::High).unwrap();

        for (a, b) in original.samples().iter().zip(marked.samples()) {
            assert!(a ^ b <= 1, "sample changed beyond LSB: {} -> {}", a, b);
        }
    }

    #[test]
    fn test_red_never_touched() {
        let original = gradient(20, 20);
        for strength in Strength::ALL {
            let mut marked = original.clone();
            embed(&mut marked, &[0xAA; 40], strength).unwrap();
            for (a, b) in original.samples().chunks(4).zip(marked.samples().chunks(4)) {
                assert_eq!(a[RED], b[RED]);
            }
        }
    }

    #[test]
    fn test_low_uses_blue_only() {
        let original = gradient(20, 20);
        let mut marked = original.clone();
        embed(&mut marked, &[0xFF; 20], Strength::Low).unwrap();
        for (a, b) in original.samples().chunks(4).zip(marked.samples().chunks(4)) {
            assert_eq!(a[GREEN], b[GREEN]);
            assert_eq!(a[ALPHA], b[ALPHA]);
        }
    }

    #[test]
    fn test_first_bits_written_to_blue() {
        // Length prefix of a 1-byte message starts with bit 1
        let mut buf = PixelBuffer::filled(8, 8, [0, 0, 0, 0]).unwrap();
        embed(&mut buf, b"z", Strength::Low).unwrap();
        assert_eq!(buf.samples()[BLUE], 1);
        assert_eq!(buf.samples()[4 + BLUE], 0);
    }

    #[test]
    fn test_insufficient_capacity_leaves_buffer_unchanged() {
        let original = gradient(10, 10);
        let mut buf = original.clone();

        // 100 pixels at low strength = 100 bits, message needs 32 + 80
        let result = embed(&mut buf, &[0u8; 10], Strength::Low);
        assert_eq!(
            result,
            Err(EncodingError::InsufficientCapacity {
                required_bits: 112,
                available_bits: 100,
            })
        );
        assert_eq!(buf, original);
    }

    #[test]
    fn test_exact_fit() {
        // 13 pixels * 3 channels = 39 bits, one byte needs 40
        let mut buf = PixelBuffer::filled(13, 1, [9, 9, 9, 9]).unwrap();
        assert!(embed(&mut buf, b"a", Strength::High).is_err());

        let mut buf = PixelBuffer::filled(20, 2, [9, 9, 9, 9]).unwrap();
        assert!(embed(&mut buf, b"a", Strength::Low).is_ok());
    }

    #[test]
    fn test_message_limits() {
        let mut buf = PixelBuffer::filled(400, 400, [0, 0, 0, 255]).unwrap();
        assert_eq!(embed(&mut buf, b"", Strength::High), Err(EncodingError::EmptyMessage));

        let too_big = vec![b'a'; MAX_MESSAGE_LEN + 1];
        assert_eq!(
            embed(&mut buf, &too_big, Strength::High),
            Err(EncodingError::MessageTooLarge {
                len: MAX_MESSAGE_LEN + 1,
                limit: MAX_MESSAGE_LEN,
            })
        );
    }
}
