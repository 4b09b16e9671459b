//! BER encoding.
//!
//! Definite-length encoding written front to back: each header needs its
//! content length up front, so every writer pairs with a `*_content_len`
//! helper that computes the length without producing the bytes.

use std::io::Write;

use super::length::{MAX_ENCODABLE_LENGTH, encode_length};
use crate::error::{Error, Result};

/// Write a tag and definite length.
///
/// Nothing is written if `len` exceeds [`MAX_ENCODABLE_LENGTH`].
pub fn write_header<W: Write + ?Sized>(w: &mut W, tag: u8, len: usize) -> Result<()> {
    if len > MAX_ENCODABLE_LENGTH {
        tracing::debug!(target: "snmp_varvalue::ber", { tag, length = len }, "length does not fit in 4 octets");
        return Err(Error::LengthOverflow { length: len });
    }
    let (bytes, count) = encode_length(len);
    w.write_all(&[tag])?;
    w.write_all(&bytes[..count])?;
    Ok(())
}

/// Write a signed 32-bit INTEGER-style TLV with the given tag.
pub fn write_integer<W: Write + ?Sized>(w: &mut W, tag: u8, value: i32) -> Result<()> {
    let (arr, len) = encode_integer_stack(value);
    write_header(w, tag, len)?;
    // Valid bytes are at the end of the array
    w.write_all(&arr[4 - len..])?;
    Ok(())
}

/// Write an unsigned integer TLV (TimeTicks, Gauge32, Counter32) with the given tag.
pub fn write_unsigned<W: Write + ?Sized>(w: &mut W, tag: u8, value: u64) -> Result<()> {
    let (arr, len) = encode_unsigned_stack(value);
    write_header(w, tag, len)?;
    w.write_all(&arr[9 - len..])?;
    Ok(())
}

/// Write an OCTET STRING-style TLV with the given tag.
pub fn write_octet_string<W: Write + ?Sized>(w: &mut W, tag: u8, data: &[u8]) -> Result<()> {
    write_header(w, tag, data.len())?;
    w.write_all(data)?;
    Ok(())
}

/// Content length of a signed integer in minimal two's-complement form.
#[inline]
pub fn integer_content_len(value: i32) -> usize {
    encode_integer_stack(value).1
}

/// Content length of an unsigned integer, including the 0x00 pad when the
/// high bit of the first significant byte is set.
#[inline]
pub fn unsigned_content_len(value: u64) -> usize {
    encode_unsigned_stack(value).1
}

/// Encode a signed 32-bit integer in minimal BER form.
///
/// Returns a stack-allocated array and the number of valid bytes.
/// The valid bytes are at the END of the array.
#[inline]
fn encode_integer_stack(value: i32) -> ([u8; 4], usize) {
    let bytes = value.to_be_bytes();

    // Find first significant byte
    let mut start = 0;
    if value >= 0 {
        // For positive/zero, skip leading 0x00 bytes (but keep one if needed for sign)
        while start < 3 && bytes[start] == 0 && bytes[start + 1] & 0x80 == 0 {
            start += 1;
        }
    } else {
        // For negative, skip leading 0xFF bytes (but keep one if needed for sign)
        while start < 3 && bytes[start] == 0xFF && bytes[start + 1] & 0x80 != 0 {
            start += 1;
        }
    }

    (bytes, 4 - start)
}

/// Encode an unsigned 64-bit integer.
///
/// Returns a stack-allocated array and the number of valid bytes.
/// The valid bytes are at the END of the array.
#[inline]
fn encode_unsigned_stack(value: u64) -> ([u8; 9], usize) {
    if value == 0 {
        return ([0; 9], 1);
    }

    let bytes = value.to_be_bytes();
    let mut start = 0;

    // Skip leading zeros, but add a 0x00 prefix if MSB is set
    while start < 7 && bytes[start] == 0 {
        start += 1;
    }

    let mut result = [0u8; 9];
    result[1..].copy_from_slice(&bytes);
    if bytes[start] & 0x80 != 0 {
        // Need to add a leading 0x00 to indicate positive
        (result, 9 - start)
    } else {
        (result, 8 - start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ber::tag;

    /// Helper to extract the valid bytes from stack-based integer encoding
    fn encode_integer(value: i32) -> Vec<u8> {
        let (arr, len) = encode_integer_stack(value);
        arr[4 - len..].to_vec()
    }

    /// Helper to extract the valid bytes from stack-based unsigned encoding
    fn encode_unsigned(value: u64) -> Vec<u8> {
        let (arr, len) = encode_unsigned_stack(value);
        arr[9 - len..].to_vec()
    }

    /// Sink that fails every write.
    struct BrokenSink;

    impl Write for BrokenSink {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_encode_integer() {
        assert_eq!(encode_integer(0), vec![0]);
        assert_eq!(encode_integer(1), vec![1]);
        assert_eq!(encode_integer(127), vec![127]);
        assert_eq!(encode_integer(128), vec![0, 128]);
        assert_eq!(encode_integer(-1), vec![0xFF]);
        assert_eq!(encode_integer(-128), vec![0x80]);
        assert_eq!(encode_integer(-129), vec![0xFF, 0x7F]);
        assert_eq!(encode_integer(i32::MIN), vec![0x80, 0, 0, 0]);
        assert_eq!(encode_integer(i32::MAX), vec![0x7F, 0xFF, 0xFF, 0xFF]);
    }

    #[test]
    fn test_encode_unsigned() {
        assert_eq!(encode_unsigned(0), vec![0]);
        assert_eq!(encode_unsigned(127), vec![127]);
        assert_eq!(encode_unsigned(128), vec![0, 128]);
        assert_eq!(encode_unsigned(255), vec![0, 255]);
        assert_eq!(encode_unsigned(256), vec![1, 0]);
        assert_eq!(encode_unsigned(u32::MAX as u64), vec![0, 0xFF, 0xFF, 0xFF, 0xFF]);
        assert_eq!(
            encode_unsigned(u64::MAX),
            vec![0, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]
        );
    }

    #[test]
    fn test_content_len_helpers() {
        assert_eq!(integer_content_len(0), 1);
        assert_eq!(integer_content_len(-1), 1);
        assert_eq!(integer_content_len(128), 2);
        assert_eq!(integer_content_len(i32::MIN), 4);
        assert_eq!(unsigned_content_len(0), 1);
        assert_eq!(unsigned_content_len(0x80), 2);
        assert_eq!(unsigned_content_len(u64::MAX), 9);
    }

    #[test]
    fn test_write_header_null() {
        let mut out = Vec::new();
        write_header(&mut out, tag::universal::NULL, 0).unwrap();
        assert_eq!(out, [0x05, 0x00]);
    }

    #[test]
    fn test_write_integer_value() {
        let mut out = Vec::new();
        write_integer(&mut out, tag::universal::INTEGER, 42).unwrap();
        assert_eq!(out, [0x02, 0x01, 0x2A]);
    }

    #[test]
    fn test_write_unsigned_value() {
        let mut out = Vec::new();
        write_unsigned(&mut out, tag::application::GAUGE32, 200).unwrap();
        assert_eq!(out, [0x42, 0x02, 0x00, 0xC8]);
    }

    #[test]
    fn test_write_long_octet_string() {
        let data = vec![0xAB; 200];
        let mut out = Vec::new();
        write_octet_string(&mut out, tag::universal::OCTET_STRING, &data).unwrap();
        assert_eq!(&out[..3], &[0x04, 0x81, 200]);
        assert_eq!(out.len(), 3 + 200);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_write_header_rejects_length_over_four_octets() {
        let mut out = Vec::new();
        write_header(&mut out, tag::universal::OCTET_STRING, MAX_ENCODABLE_LENGTH).unwrap();
        assert_eq!(out, [0x04, 0x84, 0xFF, 0xFF, 0xFF, 0xFF]);

        let mut out = Vec::new();
        let err = write_header(&mut out, tag::universal::OCTET_STRING, MAX_ENCODABLE_LENGTH + 1)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::LengthOverflow { length } if length == MAX_ENCODABLE_LENGTH + 1
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn test_sink_failure_propagates() {
        let err = write_integer(&mut BrokenSink, tag::universal::INTEGER, 1).unwrap_err();
        match err {
            Error::Io { source } => {
                assert_eq!(source.kind(), std::io::ErrorKind::BrokenPipe)
            }
            other => panic!("expected Io error, got {:?}", other),
        }
    }
}
