//! BER length encoding and decoding.
//!
//! Length encoding follows X.690 Section 8.1.3:
//! - Short form: Single byte, bit 8=0, value 0-127
//! - Long form: Initial byte (bit 8=1, bits 7-1=count), followed by length bytes
//! - Indefinite form (0x80): Rejected per net-snmp behavior

use crate::error::{DecodeErrorKind, Error, Result};

/// Maximum length we'll accept (to prevent DoS).
///
/// 2MB is far larger than any realistic SNMP value (typical values are
/// a few bytes to a few KB). This provides a sanity check at the BER
/// decode layer while still being generous enough for any legitimate use case.
pub const MAX_LENGTH: usize = 0x200000; // 2MB

/// Largest length the long form is written with here (4 length octets).
pub const MAX_ENCODABLE_LENGTH: usize = u32::MAX as usize;

/// Encode a length value in wire order.
///
/// Returns a stack-allocated array and the number of valid leading bytes.
/// Uses short form for lengths <= 127, long form otherwise. Lengths above
/// [`MAX_ENCODABLE_LENGTH`] must be rejected by the caller.
pub fn encode_length(len: usize) -> ([u8; 5], usize) {
    let mut buf = [0u8; 5];

    if len <= 127 {
        // Short form
        buf[0] = len as u8;
        return (buf, 1);
    }

    let octets = long_form_octets(len);
    buf[0] = 0x80 | octets as u8;
    for i in 0..octets {
        buf[1 + i] = (len >> (8 * (octets - 1 - i))) as u8;
    }
    (buf, 1 + octets)
}

/// Number of bytes the length field for `len` occupies on the wire.
#[inline]
pub const fn length_encoded_len(len: usize) -> usize {
    if len <= 127 {
        1
    } else {
        1 + long_form_octets(len)
    }
}

#[inline]
const fn long_form_octets(len: usize) -> usize {
    if len <= 0xFF {
        1
    } else if len <= 0xFFFF {
        2
    } else if len <= 0xFFFFFF {
        3
    } else {
        4
    }
}

/// Decode a length from bytes, returning (length, bytes_consumed).
///
/// The `base_offset` parameter is used to report error offsets correctly
/// when this is called from within a decoder.
pub fn decode_length(data: &[u8], base_offset: usize) -> Result<(usize, usize)> {
    decode_length_with_max(data, base_offset, MAX_LENGTH)
}

/// Decode a length, rejecting values above `max`.
pub fn decode_length_with_max(
    data: &[u8],
    base_offset: usize,
    max: usize,
) -> Result<(usize, usize)> {
    if data.is_empty() {
        return Err(Error::decode(base_offset, DecodeErrorKind::TruncatedData));
    }

    let first = data[0];

    if first == 0x80 {
        // Indefinite length - rejected per net-snmp behavior
        return Err(Error::decode(
            base_offset,
            DecodeErrorKind::IndefiniteLength,
        ));
    }

    if first & 0x80 == 0 {
        // Short form
        return check_max(first as usize, 1, base_offset, max);
    }

    // Long form
    let num_octets = (first & 0x7F) as usize;

    if num_octets > 4 {
        return Err(Error::decode(
            base_offset,
            DecodeErrorKind::LengthTooLong { octets: num_octets },
        ));
    }

    if data.len() < 1 + num_octets {
        return Err(Error::decode(base_offset, DecodeErrorKind::TruncatedData));
    }

    let mut len: usize = 0;
    for &byte in &data[1..=num_octets] {
        len = (len << 8) | (byte as usize);
    }

    check_max(len, 1 + num_octets, base_offset, max)
}

fn check_max(len: usize, consumed: usize, base_offset: usize, max: usize) -> Result<(usize, usize)> {
    if len > max {
        return Err(Error::decode(
            base_offset,
            DecodeErrorKind::LengthExceedsMax { length: len, max },
        ));
    }
    Ok((len, consumed))
}
