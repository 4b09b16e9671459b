//! SNMP variable-binding values.
//!
//! [`VariableValue`] is the value half of a variable binding: one of six
//! payload-carrying kinds, one of the three exception markers returned by
//! GETNEXT/GETBULK, or `Null`. Encoding is definite-length BER, so every
//! variant can report its content length ([`VariableValue::wire_length`])
//! before any byte is written.

use std::fmt;
use std::io::{Read, Write};

use crate::ber::{
    Decoder, integer_content_len, length_encoded_len, tag, unsigned_content_len, write_header,
    write_integer, write_octet_string, write_unsigned,
};
use crate::config::CodecConfig;
use crate::error::{DecodeErrorKind, Error, Result};
use crate::oid::Oid;
use bytes::Bytes;

/// Text labels accepted when building a value from user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// `"Integer"`
    Integer,
    /// `"String"`
    String,
    /// `"ObjectID"`
    ObjectId,
    /// `"TimeTick"`
    TimeTicks,
    /// `"Gauge32"`
    Gauge32,
    /// `"Counter32"`
    Counter32,
}

impl ValueKind {
    /// Every kind, in dispatch order.
    pub const ALL: [ValueKind; 6] = [
        ValueKind::Integer,
        ValueKind::String,
        ValueKind::ObjectId,
        ValueKind::TimeTicks,
        ValueKind::Gauge32,
        ValueKind::Counter32,
    ];

    /// Look up a kind by its label. Labels are case-sensitive.
    ///
    /// ```
    /// use snmp_varvalue::ValueKind;
    ///
    /// assert_eq!(ValueKind::from_label("Gauge32"), Some(ValueKind::Gauge32));
    /// assert_eq!(ValueKind::from_label("gauge32"), None);
    /// ```
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.label() == label)
    }

    /// The label this kind is selected by.
    pub const fn label(self) -> &'static str {
        match self {
            ValueKind::Integer => "Integer",
            ValueKind::String => "String",
            ValueKind::ObjectId => "ObjectID",
            ValueKind::TimeTicks => "TimeTick",
            ValueKind::Gauge32 => "Gauge32",
            ValueKind::Counter32 => "Counter32",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single SNMP value.
///
/// Exactly one variant is active. Variants are declared in the order used
/// for describing and dispatching values.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum VariableValue {
    /// INTEGER (signed 32-bit)
    Integer(i32),

    /// OCTET STRING. Usually text, but any bytes round-trip.
    String(Bytes),

    /// OBJECT IDENTIFIER
    ObjectIdentifier(Oid),

    /// TimeTicks (hundredths of seconds)
    TimeTicks(u64),

    /// Gauge32 / Unsigned32
    Gauge32(u64),

    /// Counter32
    Counter32(u64),

    /// noSuchObject exception - the OID names no object known to the agent.
    NoSuchObject,

    /// noSuchInstance exception - the object exists but this instance does not.
    NoSuchInstance,

    /// endOfMibView exception - nothing follows the requested OID.
    ///
    /// This is the normal termination condition for a walk.
    EndOfMibView,

    /// NULL, also the placeholder value in GET requests.
    #[default]
    Null,
}

impl VariableValue {
    /// Build a value from an optional kind label and optional text.
    ///
    /// If either is missing the result is [`VariableValue::Null`]. An
    /// unrecognized label also yields `Null` (and logs a warning). Text that
    /// does not parse for the requested kind is an [`Error::Parse`].
    ///
    /// # Examples
    ///
    /// ```
    /// use snmp_varvalue::VariableValue;
    ///
    /// let v = VariableValue::from_typed_text(Some("Integer"), Some("42")).unwrap();
    /// assert_eq!(v, VariableValue::Integer(42));
    ///
    /// assert!(VariableValue::from_typed_text(Some("Integer"), Some("abc")).is_err());
    ///
    /// let v = VariableValue::from_typed_text(None, Some("42")).unwrap();
    /// assert!(v.is_null());
    /// ```
    pub fn from_typed_text(kind: Option<&str>, text: Option<&str>) -> Result<Self> {
        let (Some(label), Some(text)) = (kind, text) else {
            return Ok(VariableValue::Null);
        };

        match ValueKind::from_label(label) {
            Some(kind) => Self::parse(kind, text),
            None => {
                tracing::warn!(target: "snmp_varvalue::value", { label, text }, "unrecognized value kind, using NULL");
                Ok(VariableValue::Null)
            }
        }
    }

    /// Parse `text` as a value of the given kind.
    pub fn parse(kind: ValueKind, text: &str) -> Result<Self> {
        let value = match kind {
            ValueKind::Integer => {
                VariableValue::Integer(text.parse().map_err(|_| Error::parse(kind, text))?)
            }
            ValueKind::String => VariableValue::String(Bytes::copy_from_slice(text.as_bytes())),
            ValueKind::ObjectId => {
                let oid = Oid::parse(text).map_err(|_| Error::parse(kind, text))?;
                // A lone arc has no BER form that decodes back to itself
                if oid.len() == 1 || oid.validate().is_err() {
                    return Err(Error::parse(kind, text));
                }
                VariableValue::ObjectIdentifier(oid)
            }
            ValueKind::TimeTicks => {
                VariableValue::TimeTicks(text.parse().map_err(|_| Error::parse(kind, text))?)
            }
            ValueKind::Gauge32 => {
                VariableValue::Gauge32(text.parse().map_err(|_| Error::parse(kind, text))?)
            }
            ValueKind::Counter32 => {
                VariableValue::Counter32(text.parse().map_err(|_| Error::parse(kind, text))?)
            }
        };
        Ok(value)
    }

    /// The kind of a payload-carrying value; `None` for exceptions and `Null`.
    pub fn kind(&self) -> Option<ValueKind> {
        match self {
            VariableValue::Integer(_) => Some(ValueKind::Integer),
            VariableValue::String(_) => Some(ValueKind::String),
            VariableValue::ObjectIdentifier(_) => Some(ValueKind::ObjectId),
            VariableValue::TimeTicks(_) => Some(ValueKind::TimeTicks),
            VariableValue::Gauge32(_) => Some(ValueKind::Gauge32),
            VariableValue::Counter32(_) => Some(ValueKind::Counter32),
            VariableValue::NoSuchObject
            | VariableValue::NoSuchInstance
            | VariableValue::EndOfMibView
            | VariableValue::Null => None,
        }
    }

    /// The wire tag this value is encoded with by default.
    pub fn tag(&self) -> u8 {
        self.tag_with(&CodecConfig::default())
    }

    /// The wire tag this value is encoded with under `config`.
    pub fn tag_with(&self, config: &CodecConfig) -> u8 {
        let policy = config.unsigned_tag_policy();
        match self {
            VariableValue::Integer(_) => tag::universal::INTEGER,
            VariableValue::String(_) => tag::universal::OCTET_STRING,
            VariableValue::ObjectIdentifier(_) => tag::universal::OBJECT_IDENTIFIER,
            VariableValue::TimeTicks(_) => tag::application::TIMETICKS,
            VariableValue::Gauge32(_) => policy.gauge32_tag(),
            VariableValue::Counter32(_) => policy.counter32_tag(),
            VariableValue::NoSuchObject => tag::context::NO_SUCH_OBJECT,
            VariableValue::NoSuchInstance => tag::context::NO_SUCH_INSTANCE,
            VariableValue::EndOfMibView => tag::context::END_OF_MIB_VIEW,
            VariableValue::Null => tag::universal::NULL,
        }
    }

    /// Number of content bytes [`encode`](Self::encode) writes after the
    /// tag and length, computed without encoding.
    ///
    /// ```
    /// use snmp_varvalue::VariableValue;
    ///
    /// assert_eq!(VariableValue::Integer(128).wire_length(), 2);
    /// assert_eq!(VariableValue::from("héllo").wire_length(), 6);
    /// assert_eq!(VariableValue::EndOfMibView.wire_length(), 0);
    /// ```
    pub fn wire_length(&self) -> usize {
        match self {
            VariableValue::Integer(v) => integer_content_len(*v),
            VariableValue::String(data) => data.len(),
            VariableValue::ObjectIdentifier(oid) => oid.ber_content_len(),
            VariableValue::TimeTicks(v) | VariableValue::Gauge32(v) | VariableValue::Counter32(v) => {
                unsigned_content_len(*v)
            }
            VariableValue::NoSuchObject
            | VariableValue::NoSuchInstance
            | VariableValue::EndOfMibView
            | VariableValue::Null => 0,
        }
    }

    /// Total encoded size: tag byte, length field and content.
    pub fn total_wire_length(&self) -> usize {
        let content_len = self.wire_length();
        1 + length_encoded_len(content_len) + content_len
    }

    /// Check if this is an exception value.
    pub fn is_exception(&self) -> bool {
        matches!(
            self,
            VariableValue::NoSuchObject | VariableValue::NoSuchInstance | VariableValue::EndOfMibView
        )
    }

    /// Check if this is `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, VariableValue::Null)
    }

    /// Returns `Some(i32)` for [`VariableValue::Integer`], `None` otherwise.
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            VariableValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the payload of the unsigned kinds, or a non-negative Integer.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            VariableValue::TimeTicks(v) | VariableValue::Gauge32(v) | VariableValue::Counter32(v) => {
                Some(*v)
            }
            VariableValue::Integer(v) if *v >= 0 => Some(*v as u64),
            _ => None,
        }
    }

    /// Returns the raw bytes of a [`VariableValue::String`].
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            VariableValue::String(data) => Some(data),
            _ => None,
        }
    }

    /// Returns a [`VariableValue::String`] as `&str` when it is valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        self.as_bytes().and_then(|b| std::str::from_utf8(b).ok())
    }

    /// Returns the OID of a [`VariableValue::ObjectIdentifier`].
    pub fn as_oid(&self) -> Option<&Oid> {
        match self {
            VariableValue::ObjectIdentifier(oid) => Some(oid),
            _ => None,
        }
    }

    /// Single-line description such as `{ Integer: 42 }`, or `null`.
    ///
    /// Meant for logs; there is no parser for it.
    pub fn describe(&self) -> String {
        self.to_string()
    }

    /// Encode to BER with the default configuration.
    pub fn encode<W: Write + ?Sized>(&self, w: &mut W) -> Result<()> {
        self.encode_with(w, &CodecConfig::default())
    }

    /// Encode one tag-length-content triple to `w`.
    ///
    /// Sink errors are returned as [`Error::Io`]. Nothing is retried, and a
    /// failed write leaves the sink holding a partial TLV.
    pub fn encode_with<W: Write + ?Sized>(&self, w: &mut W, config: &CodecConfig) -> Result<()> {
        let tag = self.tag_with(config);
        match self {
            VariableValue::Integer(v) => write_integer(w, tag, *v)?,
            VariableValue::String(data) => write_octet_string(w, tag, data)?,
            VariableValue::ObjectIdentifier(oid) => oid.encode(w)?,
            VariableValue::TimeTicks(v) | VariableValue::Gauge32(v) | VariableValue::Counter32(v) => {
                write_unsigned(w, tag, *v)?
            }
            VariableValue::NoSuchObject
            | VariableValue::NoSuchInstance
            | VariableValue::EndOfMibView
            | VariableValue::Null => write_header(w, tag, 0)?,
        }
        tracing::trace!(target: "snmp_varvalue::value", { value = %self, tag }, "encoded value");
        Ok(())
    }

    /// Encode into a new buffer sized by [`total_wire_length`](Self::total_wire_length).
    pub fn to_bytes(&self) -> Result<Bytes> {
        let mut buf = Vec::with_capacity(self.total_wire_length());
        self.encode(&mut buf)?;
        Ok(Bytes::from(buf))
    }

    /// Decode from BER with the default configuration.
    pub fn decode(decoder: &mut Decoder) -> Result<Self> {
        Self::decode_with(decoder, &CodecConfig::default())
    }

    /// Decode one value, dispatching on the next tag.
    ///
    /// An unknown tag is reported as [`Error::UnrecognizedTag`] before
    /// anything is consumed, so the decoder still points at that tag.
    pub fn decode_with(decoder: &mut Decoder, config: &CodecConfig) -> Result<Self> {
        let offset = decoder.offset();
        let Some(tag) = decoder.peek_tag() else {
            tracing::debug!(target: "snmp_varvalue::value", { snmp.offset = %offset, kind = %DecodeErrorKind::TruncatedData }, "no value to decode");
            return Err(Error::decode(offset, DecodeErrorKind::TruncatedData));
        };

        let value = match tag {
            tag::universal::INTEGER => {
                let len = read_header(decoder, config)?;
                VariableValue::Integer(decoder.read_integer_value(len)?)
            }
            tag::universal::OCTET_STRING => {
                let len = read_header(decoder, config)?;
                VariableValue::String(decoder.read_bytes(len)?)
            }
            tag::universal::OBJECT_IDENTIFIER => VariableValue::ObjectIdentifier(Oid::decode(decoder)?),
            tag::application::TIMETICKS => {
                let len = read_header(decoder, config)?;
                VariableValue::TimeTicks(decoder.read_unsigned_value(len)?)
            }
            tag::application::GAUGE32 => {
                let len = read_header(decoder, config)?;
                VariableValue::Gauge32(decoder.read_unsigned_value(len)?)
            }
            tag::application::COUNTER32 => {
                let len = read_header(decoder, config)?;
                VariableValue::Counter32(decoder.read_unsigned_value(len)?)
            }
            tag::universal::NULL => {
                let len = read_header(decoder, config)?;
                if len != 0 {
                    tracing::debug!(target: "snmp_varvalue::value", { snmp.offset = %offset, kind = %DecodeErrorKind::InvalidNull }, "NULL with non-zero length");
                    return Err(Error::decode(offset, DecodeErrorKind::InvalidNull));
                }
                VariableValue::Null
            }
            tag::context::NO_SUCH_OBJECT => {
                read_exception(decoder, config, tag, offset)?;
                VariableValue::NoSuchObject
            }
            tag::context::NO_SUCH_INSTANCE => {
                read_exception(decoder, config, tag, offset)?;
                VariableValue::NoSuchInstance
            }
            tag::context::END_OF_MIB_VIEW => {
                read_exception(decoder, config, tag, offset)?;
                VariableValue::EndOfMibView
            }
            // Net-snmp documents but does not parse constructed form; we follow suit.
            tag::universal::OCTET_STRING_CONSTRUCTED => {
                tracing::debug!(target: "snmp_varvalue::value", { snmp.offset = %offset, kind = %DecodeErrorKind::ConstructedOctetString }, "constructed OCTET STRING");
                return Err(Error::decode(
                    offset,
                    DecodeErrorKind::ConstructedOctetString,
                ));
            }
            _ => {
                tracing::debug!(target: "snmp_varvalue::value", { snmp.offset = %offset, tag }, "unrecognized value tag");
                return Err(Error::UnrecognizedTag { offset, tag });
            }
        };

        tracing::trace!(target: "snmp_varvalue::value", { value = %value, tag }, "decoded value");
        Ok(value)
    }

    /// Decode a value from a byte slice holding exactly one TLV.
    ///
    /// Trailing bytes after the value are ignored.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::decode(&mut Decoder::from_slice(data))
    }

    /// Read one TLV from a blocking source and decode it.
    pub fn decode_from_reader<R: Read + ?Sized>(reader: &mut R) -> Result<Self> {
        Self::decode_from_reader_with(reader, &CodecConfig::default())
    }

    /// Read one TLV from a blocking source and decode it under `config`.
    ///
    /// Source errors, including a source that ends mid-value, are returned
    /// as [`Error::Io`].
    pub fn decode_from_reader_with<R: Read + ?Sized>(
        reader: &mut R,
        config: &CodecConfig,
    ) -> Result<Self> {
        let mut decoder = Decoder::read_tlv_from(reader, config.max_length_limit())?;
        Self::decode_with(&mut decoder, config)
    }
}

/// Consume a tag whose value was already peeked, plus its length.
fn read_header(decoder: &mut Decoder, config: &CodecConfig) -> Result<usize> {
    decoder.read_tag()?;
    decoder.read_length_with_max(config.max_length_limit())
}

/// Consume an exception marker header; stray content is skipped unless strict.
fn read_exception(
    decoder: &mut Decoder,
    config: &CodecConfig,
    tag: u8,
    offset: usize,
) -> Result<()> {
    let len = read_header(decoder, config)?;
    if len == 0 {
        return Ok(());
    }
    if config.is_strict_exceptions() {
        let kind = DecodeErrorKind::ExceptionWithContent { tag, length: len };
        tracing::debug!(target: "snmp_varvalue::value", { snmp.offset = %offset, kind = %kind }, "exception with content");
        return Err(Error::decode(offset, kind));
    }
    tracing::warn!(target: "snmp_varvalue::value", { snmp.offset = %offset, tag, length = len }, "skipping content of exception value");
    decoder.skip(len)
}

impl fmt::Display for VariableValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariableValue::Integer(v) => write!(f, "{{ Integer: {} }}", v),
            VariableValue::String(data) => {
                write!(f, "{{ String: {} }}", String::from_utf8_lossy(data))
            }
            VariableValue::ObjectIdentifier(oid) => write!(f, "{{ OID: {} }}", oid),
            VariableValue::TimeTicks(v) => write!(f, "{{ TimeTick: {} }}", v),
            VariableValue::Gauge32(v) => write!(f, "{{ Gauge32: {} }}", v),
            VariableValue::Counter32(v) => write!(f, "{{ Counter32: {} }}", v),
            VariableValue::NoSuchObject => write!(f, "{{ NoSuchObject }}"),
            VariableValue::NoSuchInstance => write!(f, "{{ NoSuchInstance }}"),
            VariableValue::EndOfMibView => write!(f, "{{ EndOfMibView }}"),
            VariableValue::Null => write!(f, "null"),
        }
    }
}

impl From<i32> for VariableValue {
    fn from(v: i32) -> Self {
        VariableValue::Integer(v)
    }
}

impl From<&str> for VariableValue {
    fn from(s: &str) -> Self {
        VariableValue::String(Bytes::copy_from_slice(s.as_bytes()))
    }
}

impl From<String> for VariableValue {
    fn from(s: String) -> Self {
        VariableValue::String(Bytes::from(s))
    }
}

impl From<Bytes> for VariableValue {
    fn from(data: Bytes) -> Self {
        VariableValue::String(data)
    }
}

impl From<Oid> for VariableValue {
    fn from(oid: Oid) -> Self {
        VariableValue::ObjectIdentifier(oid)
    }
}
