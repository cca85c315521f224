//! Bit-stream framing.
//!
//! Format: [32-bit length, little-endian] + [message bytes]
//! Every byte (length bytes included) is expanded LSB-first into 8 bits,
//! so the stream is `32 + len * 8` entries of 0 or 1.

use super::error::{DecodingError, EncodingError};

/// Number of bits in the length prefix.
pub const LENGTH_PREFIX_BITS: usize = 32;

/// Packs a message into its framed bit stream.
pub fn pack(message: &[u8]) -> Result<Vec<u8>, EncodingError> {
    let len = u32::try_from(message.len()).map_err(|_| EncodingError::MessageTooLarge {
        len: message.len(),
        limit: u32::MAX as usize,
    })?;

    let mut bits = Vec::with_capacity(stream_len(message.len()));
    for byte in len.to_le_bytes().iter().chain(message) {
        push_byte(&mut bits, *byte);
    }
    Ok(bits)
}

/// Total stream length in bits for a message of `message_len` bytes.
pub fn stream_len(message_len: usize) -> usize {
    LENGTH_PREFIX_BITS + message_len * 8
}

/// Rebuilds the length prefix from the first 32 bits of a stream.
///
/// Missing bits (a stream shorter than 32) read as zero.
pub fn unpack_length(bits: &[u8]) -> u32 {
    let mut len_bytes = [0u8; 4];
    for (bit_index, bit) in bits.iter().take(LENGTH_PREFIX_BITS).enumerate() {
        len_bytes[bit_index / 8] |= (bit & 1) << (bit_index % 8);
    }
    u32::from_le_bytes(len_bytes)
}

/// Rebuilds `length` bytes from the message portion of a stream (prefix excluded)
/// and decodes them as UTF-8.
pub fn unpack_message(bits: &[u8], length: usize) -> Result<String, DecodingError> {
    let bytes = unpack_bytes(bits, length)?;
    String::from_utf8(bytes).map_err(|e| DecodingError::InvalidPayload(e.to_string()))
}

/// Rebuilds raw bytes from LSB-first bit groups.
pub(crate) fn unpack_bytes(bits: &[u8], length: usize) -> Result<Vec<u8>, DecodingError> {
    if bits.len() < length * 8 {
        return Err(DecodingError::InvalidPayload(format!(
            "stream ends after {} bits, {} needed",
            bits.len(),
            length * 8
        )));
    }

    Ok(bits[..length * 8]
        .chunks_exact(8)
        .map(|chunk| {
            chunk
                .iter()
                .enumerate()
                .fold(0u8, |byte, (offset, bit)| byte | ((bit & 1) << offset))
        })
        .collect())
}

fn push_byte(bits: &mut Vec<u8>, byte: u8) {
    for offset in 0..8 {
        bits.push((byte >> offset) & 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_layout() {
        let bits = pack(b"A").unwrap();
        assert_eq!(bits.len(), 40);
        // Length 1, little-endian, LSB-first
        assert_eq!(&bits[..8], &[1, 0, 0, 0, 0, 0, 0, 0]);
        assert!(bits[8..32].iter().all(|&b| b == 0));
        // 'A' = 0x41 = 0b0100_0001
        assert_eq!(&bits[32..], &[1, 0, 0, 0, 0, 0, 1, 0]);
    }

    #[test]
    fn test_length_prefix_multibyte() {
        let message = vec![b'x'; 300];
        let bits = pack(&message).unwrap();
        assert_eq!(unpack_length(&bits), 300);
        // 300 = 0x012C: low byte 0x2C, second byte 0x01
        assert_eq!(&bits[8..16], &[1, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_unpack_message() {
        let bits = pack("héllo".as_bytes()).unwrap();
        let len = unpack_length(&bits) as usize;
        assert_eq!(len, 6);
        assert_eq!(unpack_message(&bits[LENGTH_PREFIX_BITS..], len).unwrap(), "héllo");
    }

    #[test]
    fn test_unpack_length_short_stream() {
        assert_eq!(unpack_length(&[1, 1]), 3);
        assert_eq!(unpack_length(&[]), 0);
    }

    #[test]
    fn test_invalid_utf8_is_error() {
        let bits = pack(&[0xFF, 0xFE]).unwrap();
        let result = unpack_message(&bits[LENGTH_PREFIX_BITS..], 2);
        assert!(matches!(result, Err(DecodingError::InvalidPayload(_))));
    }

    #[test]
    fn test_truncated_stream_is_error() {
        let bits = pack(b"abc").unwrap();
        let result = unpack_message(&bits[LENGTH_PREFIX_BITS..LENGTH_PREFIX_BITS + 12], 3);
        assert!(matches!(result, Err(DecodingError::InvalidPayload(_))));
    }

    #[test]
    fn test_empty_message() {
        let bits = pack(&[]).unwrap();
        assert_eq!(bits, vec![0u8; 32]);
        assert_eq!(unpack_message(&[], 0).unwrap(), "");
    }
}
