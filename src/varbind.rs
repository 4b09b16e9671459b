//! Variable binding (VarBind) type.
//!
//! A VarBind pairs an OID with a value.

use std::io::Write;

use crate::ber::{Decoder, length_encoded_len, tag, write_header};
use crate::config::CodecConfig;
use crate::error::{DecodeErrorKind, Error, Result};
use crate::oid::Oid;
use crate::value::VariableValue;

/// Variable binding - an OID-value pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarBind {
    /// The object identifier.
    pub oid: Oid,
    /// The value.
    pub value: VariableValue,
}

impl VarBind {
    /// Create a new VarBind.
    pub fn new(oid: Oid, value: VariableValue) -> Self {
        Self { oid, value }
    }

    /// Create a VarBind with a NULL value (for GET requests).
    pub fn null(oid: Oid) -> Self {
        Self {
            oid,
            value: VariableValue::Null,
        }
    }

    /// Build a SET binding from an OID string plus the kind/text pair of
    /// [`VariableValue::from_typed_text`].
    ///
    /// ```
    /// use snmp_varvalue::{VarBind, VariableValue};
    ///
    /// let vb = VarBind::from_typed_text("1.3.6.1.2.1.1.5.0", Some("String"), Some("core-sw1")).unwrap();
    /// assert_eq!(vb.value, VariableValue::from("core-sw1"));
    /// ```
    pub fn from_typed_text(oid: &str, kind: Option<&str>, text: Option<&str>) -> Result<Self> {
        let oid = Oid::parse(oid)?;
        let value = VariableValue::from_typed_text(kind, text)?;
        Ok(Self { oid, value })
    }

    /// Length of the SEQUENCE content: the OID TLV followed by the value TLV.
    pub fn content_len(&self) -> usize {
        let oid_len = self.oid.ber_content_len();
        1 + length_encoded_len(oid_len) + oid_len + self.value.total_wire_length()
    }

    /// Exact encoded size of this VarBind in bytes.
    ///
    /// Useful for response size estimation in GETBULK processing.
    pub fn total_wire_length(&self) -> usize {
        let content_len = self.content_len();
        1 + length_encoded_len(content_len) + content_len
    }

    /// Encode to BER.
    pub fn encode<W: Write + ?Sized>(&self, w: &mut W) -> Result<()> {
        self.encode_with(w, &CodecConfig::default())
    }

    /// Encode to BER, writing the value under `config`.
    pub fn encode_with<W: Write + ?Sized>(&self, w: &mut W, config: &CodecConfig) -> Result<()> {
        write_header(w, tag::universal::SEQUENCE, self.content_len())?;
        self.oid.encode(w)?;
        self.value.encode_with(w, config)
    }

    /// Decode from BER.
    pub fn decode(decoder: &mut Decoder) -> Result<Self> {
        Self::decode_with(decoder, &CodecConfig::default())
    }

    /// Decode from BER, reading the value under `config`.
    ///
    /// The SEQUENCE must hold exactly the OID and the value.
    pub fn decode_with(decoder: &mut Decoder, config: &CodecConfig) -> Result<Self> {
        let mut seq = decoder.read_sequence_with_max(config.max_length_limit())?;
        let oid = Oid::decode(&mut seq)?;
        let value = VariableValue::decode_with(&mut seq, config)?;
        if !seq.is_empty() {
            let kind = DecodeErrorKind::TrailingData {
                count: seq.remaining(),
            };
            tracing::debug!(target: "snmp_varvalue::value", { snmp.offset = %seq.offset(), kind = %kind }, "trailing bytes in varbind");
            return Err(Error::decode(seq.offset(), kind));
        }
        Ok(VarBind { oid, value })
    }
}

impl std::fmt::Display for VarBind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {}", self.oid, self.value)
    }
}

/// Encode a list of VarBinds as a SEQUENCE OF VarBind.
pub fn encode_varbind_list<W: Write + ?Sized>(w: &mut W, varbinds: &[VarBind]) -> Result<()> {
    let content_len: usize = varbinds.iter().map(VarBind::total_wire_length).sum();
    write_header(w, tag::universal::SEQUENCE, content_len)?;
    for vb in varbinds {
        vb.encode(w)?;
    }
    Ok(())
}

/// Decode a list of VarBinds.
pub fn decode_varbind_list(decoder: &mut Decoder) -> Result<Vec<VarBind>> {
    let mut seq = decoder.read_sequence()?;
    let mut varbinds = Vec::new();

    while !seq.is_empty() {
        varbinds.push(VarBind::decode(&mut seq)?);
    }

    Ok(varbinds)
}

impl TryFrom<(&str, &str, &str)> for VarBind {
    type Error = Error;

    /// `(oid, kind, text)` as used to build SET requests.
    fn try_from((oid, kind, text): (&str, &str, &str)) -> Result<Self> {
        Self::from_typed_text(oid, Some(kind), Some(text))
    }
}
