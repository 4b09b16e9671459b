//! BER decoding.
//!
//! Zero-copy decoding using `Bytes` to avoid allocations.

use std::io::Read;

use super::length::{MAX_LENGTH, decode_length_with_max};
use super::tag;
use crate::error::{DecodeErrorKind, Error, Result};
use bytes::Bytes;

/// BER decoder that reads from a byte buffer.
#[derive(Debug)]
pub struct Decoder {
    data: Bytes,
    offset: usize,
    max_length: usize,
}

impl Decoder {
    /// Create a new decoder from bytes.
    pub fn new(data: Bytes) -> Self {
        Self {
            data,
            offset: 0,
            max_length: MAX_LENGTH,
        }
    }

    /// Create a decoder from a byte slice (copies the data).
    pub fn from_slice(data: &[u8]) -> Self {
        Self::new(Bytes::copy_from_slice(data))
    }

    /// Override the largest content length this decoder accepts.
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    /// Read exactly one TLV from a blocking byte source and wrap it in a decoder.
    ///
    /// Only the bytes of that TLV are consumed from `reader`. I/O failures are
    /// returned as [`Error::Io`]; a malformed length is a decode error.
    pub fn read_tlv_from<R: Read + ?Sized>(reader: &mut R, max_length: usize) -> Result<Self> {
        let mut head = [0u8; 2];
        reader.read_exact(&mut head)?;

        let mut raw = Vec::with_capacity(16);
        raw.extend_from_slice(&head);

        // Long-form lengths carry their octet count in the first length byte
        if head[1] & 0x80 != 0 && head[1] != 0x80 {
            let octets = (head[1] & 0x7F) as usize;
            if octets > 4 {
                tracing::debug!(target: "snmp_varvalue::ber", { snmp.offset = 1, kind = %DecodeErrorKind::LengthTooLong { octets } }, "length encoding too long");
                return Err(Error::decode(1, DecodeErrorKind::LengthTooLong { octets }));
            }
            let mut extra = [0u8; 4];
            reader.read_exact(&mut extra[..octets])?;
            raw.extend_from_slice(&extra[..octets]);
        }

        let (len, _) = decode_length_with_max(&raw[1..], 1, max_length)?;
        let header_len = raw.len();
        raw.resize(header_len + len, 0);
        reader.read_exact(&mut raw[header_len..])?;

        Ok(Self::new(Bytes::from(raw)).with_max_length(max_length))
    }

    /// Get the current offset.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Get remaining bytes.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    /// Check if we've reached the end.
    pub fn is_empty(&self) -> bool {
        self.offset >= self.data.len()
    }

    /// Peek at the next tag without consuming it.
    pub fn peek_tag(&self) -> Option<u8> {
        self.data.get(self.offset).copied()
    }

    /// Read a tag byte.
    pub fn read_tag(&mut self) -> Result<u8> {
        let Some(byte) = self.peek_tag() else {
            tracing::debug!(target: "snmp_varvalue::ber", { snmp.offset = %self.offset, kind = %DecodeErrorKind::TruncatedData }, "truncated data: unexpected end of input");
            return Err(Error::decode(self.offset, DecodeErrorKind::TruncatedData));
        };
        self.offset += 1;
        Ok(byte)
    }

    /// Read a length.
    pub fn read_length(&mut self) -> Result<usize> {
        self.read_length_with_max(self.max_length)
    }

    /// Read a length, checking it against `max` instead of this decoder's limit.
    pub fn read_length_with_max(&mut self, max: usize) -> Result<usize> {
        let (len, consumed) =
            decode_length_with_max(&self.data[self.offset..], self.offset, max)
                .inspect_err(|e| {
                    tracing::debug!(target: "snmp_varvalue::ber", { snmp.offset = %self.offset, error = %e }, "invalid length");
                })?;
        self.offset += consumed;
        Ok(len)
    }

    /// Read raw bytes without copying.
    pub fn read_bytes(&mut self, len: usize) -> Result<Bytes> {
        // Use saturating_add to prevent overflow from bypassing bounds check
        if self.offset.saturating_add(len) > self.data.len() {
            let kind = DecodeErrorKind::InsufficientData {
                needed: len,
                available: self.remaining(),
            };
            tracing::debug!(target: "snmp_varvalue::ber", { snmp.offset = %self.offset, kind = %kind }, "insufficient data");
            return Err(Error::decode(self.offset, kind));
        }
        let bytes = self.data.slice(self.offset..self.offset + len);
        self.offset += len;
        Ok(bytes)
    }

    /// Read and expect a specific tag, returning the content length.
    pub fn expect_tag(&mut self, expected: u8) -> Result<usize> {
        self.check_tag(expected)?;
        self.read_length()
    }

    fn check_tag(&mut self, expected: u8) -> Result<()> {
        let tag = self.read_tag()?;
        if tag != expected {
            let kind = DecodeErrorKind::UnexpectedTag {
                expected,
                actual: tag,
            };
            tracing::debug!(target: "snmp_varvalue::ber", { snmp.offset = %self.offset - 1, kind = %kind }, "unexpected tag");
            return Err(Error::decode(self.offset - 1, kind));
        }
        Ok(())
    }

    /// Read signed integer content given the length.
    ///
    /// Redundant leading sign bytes are accepted. A value that still needs
    /// more than 4 bytes is [`DecodeErrorKind::IntegerOverflow`].
    pub fn read_integer_value(&mut self, len: usize) -> Result<i32> {
        if len == 0 {
            tracing::debug!(target: "snmp_varvalue::ber", { snmp.offset = %self.offset, kind = %DecodeErrorKind::ZeroLengthInteger }, "zero-length integer");
            return Err(Error::decode(self.offset, DecodeErrorKind::ZeroLengthInteger));
        }

        let start = self.offset;
        let bytes = self.read_bytes(len)?;

        let mut significant = &bytes[..];
        while let [first, second, ..] = significant
            && ((*first == 0x00 && second & 0x80 == 0) || (*first == 0xFF && second & 0x80 != 0))
        {
            significant = &significant[1..];
        }
        if significant.len() > 4 {
            tracing::debug!(target: "snmp_varvalue::ber", { snmp.offset = %start, kind = %DecodeErrorKind::IntegerOverflow, length = len }, "integer does not fit in 32 bits");
            return Err(Error::decode(start, DecodeErrorKind::IntegerOverflow));
        }

        // Sign extend
        let is_negative = significant[0] & 0x80 != 0;
        let mut value: i32 = if is_negative { -1 } else { 0 };

        for &byte in significant {
            value = (value << 8) | (byte as i32);
        }

        Ok(value)
    }

    /// Read unsigned integer content given the length.
    ///
    /// Accepts up to 9 bytes: one leading zero plus 8 bytes for a u64.
    pub fn read_unsigned_value(&mut self, len: usize) -> Result<u64> {
        if len == 0 {
            tracing::debug!(target: "snmp_varvalue::ber", { snmp.offset = %self.offset, kind = %DecodeErrorKind::ZeroLengthInteger }, "zero-length integer");
            return Err(Error::decode(self.offset, DecodeErrorKind::ZeroLengthInteger));
        }
        if len > 9 {
            let kind = DecodeErrorKind::UnsignedTooLong { length: len };
            tracing::debug!(target: "snmp_varvalue::ber", { snmp.offset = %self.offset, kind = %kind }, "unsigned integer too long");
            return Err(Error::decode(self.offset, kind));
        }

        let start = self.offset;
        let bytes = self.read_bytes(len)?;
        if len == 9 && bytes[0] != 0 {
            tracing::debug!(target: "snmp_varvalue::ber", { snmp.offset = %start, kind = %DecodeErrorKind::IntegerOverflow }, "unsigned integer overflows u64");
            return Err(Error::decode(start, DecodeErrorKind::IntegerOverflow));
        }

        let mut value: u64 = 0;
        for &byte in bytes.iter() {
            value = (value << 8) | (byte as u64);
        }

        Ok(value)
    }

    /// Read a SEQUENCE, returning a decoder for its contents.
    pub fn read_sequence(&mut self) -> Result<Decoder> {
        self.read_sequence_with_max(self.max_length)
    }

    /// Read a SEQUENCE whose length and contents are limited by `max`.
    pub fn read_sequence_with_max(&mut self, max: usize) -> Result<Decoder> {
        self.check_tag(tag::universal::SEQUENCE)?;
        let len = self.read_length_with_max(max)?;
        Ok(self.sub_decoder(len)?.with_max_length(max))
    }

    /// Skip `len` content bytes.
    pub fn skip(&mut self, len: usize) -> Result<()> {
        self.read_bytes(len).map(|_| ())
    }

    /// Create a sub-decoder for a portion of the remaining data.
    pub fn sub_decoder(&mut self, len: usize) -> Result<Decoder> {
        let content = self.read_bytes(len)?;
        Ok(Decoder {
            data: content,
            offset: 0,
            max_length: self.max_length,
        })
    }

    /// Get remaining data as a slice.
    pub fn remaining_slice(&self) -> &[u8] {
        &self.data[self.offset..]
    }
}
