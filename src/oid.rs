//! Object Identifier (OID) type.
//!
//! OIDs are stored as `SmallVec<[u32; 16]>` to avoid heap allocation for common OIDs.
//! The type carries its own BER codec: [`Oid::encode`] writes a complete
//! OBJECT IDENTIFIER TLV, [`Oid::decode`] consumes one, and
//! [`Oid::ber_content_len`] reports the content length without encoding.

use std::fmt;
use std::io::Write;

use crate::ber::{Decoder, tag, write_header};
use crate::error::{DecodeErrorKind, Error, OidErrorKind, Result};
use smallvec::SmallVec;

/// Maximum number of arcs (subidentifiers) allowed in an OID.
///
/// Per RFC 2578 Section 3.5: "there are at most 128 sub-identifiers in a value".
pub const MAX_OID_LEN: usize = 128;

/// Object Identifier.
///
/// Stored as a sequence of arc values (u32). Uses SmallVec to avoid
/// heap allocation for OIDs with 16 or fewer arcs.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Oid {
    arcs: SmallVec<[u32; 16]>,
}

impl Oid {
    /// Create an empty OID.
    pub fn empty() -> Self {
        Self {
            arcs: SmallVec::new(),
        }
    }

    /// Create an OID from arc values.
    ///
    /// # Examples
    ///
    /// ```
    /// use snmp_varvalue::oid::Oid;
    ///
    /// let oid = Oid::new([1, 3, 6, 1]);
    /// assert_eq!(oid.len(), 4);
    /// ```
    pub fn new(arcs: impl IntoIterator<Item = u32>) -> Self {
        Self {
            arcs: arcs.into_iter().collect(),
        }
    }

    /// Create an OID from a slice of arcs.
    pub fn from_slice(arcs: &[u32]) -> Self {
        Self {
            arcs: SmallVec::from_slice(arcs),
        }
    }

    /// Parse an OID from dotted string notation (e.g., "1.3.6.1.2.1.1.1.0").
    ///
    /// A leading dot is accepted. Arc constraints are not checked here;
    /// call [`validate()`](Self::validate) for that.
    ///
    /// # Examples
    ///
    /// ```
    /// use snmp_varvalue::oid::Oid;
    ///
    /// let oid = Oid::parse("1.3.6.1.2.1.1.1.0").unwrap();
    /// assert_eq!(oid.arcs(), &[1, 3, 6, 1, 2, 1, 1, 1, 0]);
    ///
    /// assert!(Oid::parse("1.3.six.1").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let trimmed = s.strip_prefix('.').unwrap_or(s);
        if trimmed.is_empty() {
            return Ok(Self::empty());
        }

        let mut arcs = SmallVec::new();

        for part in trimmed.split('.') {
            let arc: u32 = part.parse().map_err(|_| {
                Error::invalid_oid_with_input(OidErrorKind::InvalidArc, s.to_string())
            })?;
            arcs.push(arc);
        }

        let oid = Self { arcs };
        oid.validate_length()
            .map_err(|_| {
                Error::invalid_oid_with_input(
                    OidErrorKind::TooManyArcs {
                        count: oid.len(),
                        max: MAX_OID_LEN,
                    },
                    s.to_string(),
                )
            })?;
        Ok(oid)
    }

    /// Get the arc values.
    pub fn arcs(&self) -> &[u32] {
        &self.arcs
    }

    /// Get the number of arcs.
    pub fn len(&self) -> usize {
        self.arcs.len()
    }

    /// Check if the OID is empty.
    pub fn is_empty(&self) -> bool {
        self.arcs.is_empty()
    }

    /// Check if this OID starts with another OID.
    pub fn starts_with(&self, other: &Oid) -> bool {
        self.arcs.len() >= other.arcs.len() && self.arcs[..other.arcs.len()] == other.arcs[..]
    }

    /// Validate OID arcs per X.690 Section 8.19.4.
    ///
    /// - arc1 must be 0, 1, or 2
    /// - arc2 must be <= 39 when arc1 is 0 or 1
    /// - arc2 must be <= 4294967215 when arc1 is 2, so that `arc1 * 40 + arc2`
    ///   still decodes as a 32-bit subidentifier
    pub fn validate(&self) -> Result<()> {
        let Some(&arc1) = self.arcs.first() else {
            return Ok(());
        };

        if arc1 > 2 {
            return Err(Error::invalid_oid(OidErrorKind::InvalidFirstArc(arc1)));
        }

        if let Some(&arc2) = self.arcs.get(1)
            && ((arc1 < 2 && arc2 >= 40) || arc2 > u32::MAX - 80)
        {
            return Err(Error::invalid_oid(OidErrorKind::InvalidSecondArc {
                first: arc1,
                second: arc2,
            }));
        }

        self.validate_length()
    }

    /// Validate that the OID doesn't exceed the maximum arc count.
    pub fn validate_length(&self) -> Result<()> {
        if self.arcs.len() > MAX_OID_LEN {
            return Err(Error::invalid_oid(OidErrorKind::TooManyArcs {
                count: self.arcs.len(),
                max: MAX_OID_LEN,
            }));
        }
        Ok(())
    }

    /// Iterate the BER subidentifiers: the first two arcs fold into
    /// `arc1 * 40 + arc2`, the rest follow unchanged.
    fn subidentifiers(&self) -> impl Iterator<Item = u64> + '_ {
        let first = match self.arcs.as_slice() {
            [] => None,
            [a] => Some(*a as u64 * 40),
            [a, b, ..] => Some(*a as u64 * 40 + *b as u64),
        };
        first
            .into_iter()
            .chain(self.arcs.iter().skip(2).map(|&arc| arc as u64))
    }

    /// Number of content bytes [`encode`](Self::encode) writes after the header.
    ///
    /// # Examples
    ///
    /// ```
    /// use snmp_varvalue::oid::Oid;
    ///
    /// // 1.3.6.1 encodes as [0x2B, 0x06, 0x01]
    /// assert_eq!(Oid::parse("1.3.6.1").unwrap().ber_content_len(), 3);
    /// ```
    pub fn ber_content_len(&self) -> usize {
        self.subidentifiers().map(subidentifier_len).sum()
    }

    /// Encode the content bytes (no tag or length).
    ///
    /// Empty OIDs encode as zero bytes. net-snmp writes `[0x00]` instead;
    /// empty OIDs are rare enough in practice that this does not matter.
    pub fn to_ber(&self) -> SmallVec<[u8; 64]> {
        let mut bytes = SmallVec::new();
        for subid in self.subidentifiers() {
            encode_subidentifier(&mut bytes, subid);
        }
        bytes
    }

    /// Write a complete OBJECT IDENTIFIER TLV.
    pub fn encode<W: Write + ?Sized>(&self, w: &mut W) -> Result<()> {
        let content = self.to_ber();
        write_header(w, tag::universal::OBJECT_IDENTIFIER, content.len())?;
        w.write_all(&content)?;
        Ok(())
    }

    /// Read a complete OBJECT IDENTIFIER TLV, header included.
    pub fn decode(decoder: &mut Decoder) -> Result<Self> {
        let len = decoder.expect_tag(tag::universal::OBJECT_IDENTIFIER)?;
        let base = decoder.offset();
        let bytes = decoder.read_bytes(len)?;
        Self::from_ber(&bytes).map_err(|e| match e {
            // Rebase content-relative offsets onto the enclosing buffer
            Error::Decode { offset, kind } => Error::decode(base + offset, kind),
            other => other,
        })
    }

    /// Decode from BER content bytes.
    ///
    /// Enforces [`MAX_OID_LEN`] limit per RFC 2578 Section 3.5.
    pub fn from_ber(data: &[u8]) -> Result<Self> {
        if data.is_empty() {
            return Ok(Self::empty());
        }

        let mut arcs = SmallVec::new();

        // Decode first subidentifier (which encodes arc1*40 + arc2)
        // This may be multi-byte for large arc2 values (when arc1=2)
        let (first_subid, consumed) = decode_subidentifier(data, 0)?;

        if first_subid < 40 {
            arcs.push(0);
            arcs.push(first_subid);
        } else if first_subid < 80 {
            arcs.push(1);
            arcs.push(first_subid - 40);
        } else {
            arcs.push(2);
            arcs.push(first_subid - 80);
        }

        let mut i = consumed;
        while i < data.len() {
            let (arc, bytes_consumed) = decode_subidentifier(&data[i..], i)?;
            arcs.push(arc);
            i += bytes_consumed;

            // RFC 2578 Section 3.5: "at most 128 sub-identifiers in a value"
            if arcs.len() > MAX_OID_LEN {
                return Err(Error::decode(
                    i,
                    DecodeErrorKind::OidTooLong {
                        count: arcs.len(),
                        max: MAX_OID_LEN,
                    },
                ));
            }
        }

        Ok(Self { arcs })
    }
}

#[inline]
fn subidentifier_len(value: u64) -> usize {
    let bits = 64 - value.leading_zeros() as usize;
    bits.div_ceil(7).max(1)
}

/// Encode a subidentifier in base-128 variable length.
#[inline]
fn encode_subidentifier(bytes: &mut SmallVec<[u8; 64]>, value: u64) {
    let count = subidentifier_len(value);

    // Encode from MSB to LSB
    for i in (0..count).rev() {
        let mut byte = ((value >> (i * 7)) & 0x7F) as u8;
        if i > 0 {
            byte |= 0x80; // Continuation bit
        }
        bytes.push(byte);
    }
}

/// Decode a subidentifier, returning (value, bytes_consumed).
fn decode_subidentifier(data: &[u8], base_offset: usize) -> Result<(u32, usize)> {
    let mut value: u32 = 0;
    let mut i = 0;

    loop {
        let Some(&byte) = data.get(i) else {
            return Err(Error::decode(
                base_offset + i,
                DecodeErrorKind::TruncatedData,
            ));
        };
        i += 1;

        // Check for overflow before shifting
        if value > (u32::MAX >> 7) {
            return Err(Error::decode(
                base_offset + i,
                DecodeErrorKind::IntegerOverflow,
            ));
        }

        value = (value << 7) | ((byte & 0x7F) as u32);

        if byte & 0x80 == 0 {
            break;
        }
    }

    Ok((value, i))
}

impl fmt::Debug for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Oid({})", self)
    }
}

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for arc in &self.arcs {
            if !first {
                write!(f, ".")?;
            }
            write!(f, "{}", arc)?;
            first = false;
        }
        Ok(())
    }
}

impl std::str::FromStr for Oid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<&[u32]> for Oid {
    fn from(arcs: &[u32]) -> Self {
        Self::from_slice(arcs)
    }
}

impl<const N: usize> From<[u32; N]> for Oid {
    fn from(arcs: [u32; N]) -> Self {
        Self::new(arcs)
    }
}

impl PartialOrd for Oid {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Oid {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.arcs.cmp(&other.arcs)
    }
}

/// Macro to create an OID without parsing.
///
/// # Examples
///
/// ```
/// use snmp_varvalue::oid;
///
/// let sys_descr = oid!(1, 3, 6, 1, 2, 1, 1, 1, 0);
/// assert_eq!(sys_descr.to_string(), "1.3.6.1.2.1.1.1.0");
/// ```
#[macro_export]
macro_rules! oid {
    ($($arc:expr),* $(,)?) => {
        $crate::oid::Oid::from_slice(&[$($arc),*])
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_to_vec(oid: &Oid) -> Vec<u8> {
        let mut out = Vec::new();
        oid.encode(&mut out).unwrap();
        out
    }

    #[test]
    fn test_parse() {
        let oid = Oid::parse("1.3.6.1.2.1.1.1.0").unwrap();
        assert_eq!(oid.arcs(), &[1, 3, 6, 1, 2, 1, 1, 1, 0]);

        let leading_dot = Oid::parse(".1.3.6.1").unwrap();
        assert_eq!(leading_dot.arcs(), &[1, 3, 6, 1]);

        assert!(Oid::parse("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_bad_arcs() {
        assert!(Oid::parse("1.3.abc.1").is_err());
        assert!(Oid::parse("1.3.-6.1").is_err());
        assert!(Oid::parse("1..3").is_err());
        assert!(Oid::parse("1.3.99999999999").is_err());
    }

    #[test]
    fn test_parse_rejects_too_many_arcs() {
        let text = vec!["1"; MAX_OID_LEN + 1].join(".");
        let err = Oid::parse(&text).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidOid {
                kind: OidErrorKind::TooManyArcs { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_display() {
        let oid = Oid::from_slice(&[1, 3, 6, 1, 2, 1, 1, 1, 0]);
        assert_eq!(oid.to_string(), "1.3.6.1.2.1.1.1.0");
        assert_eq!(format!("{:?}", oid), "Oid(1.3.6.1.2.1.1.1.0)");
    }

    #[test]
    fn test_ber_encoding() {
        // 1.3.6.1 encodes as: (1*40+3)=43, 6, 1 = [0x2B, 0x06, 0x01]
        let oid = Oid::parse("1.3.6.1").unwrap();
        assert_eq!(oid.to_ber().as_slice(), &[0x2B, 0x06, 0x01]);
        assert_eq!(encode_to_vec(&oid), vec![0x06, 0x03, 0x2B, 0x06, 0x01]);
    }

    #[test]
    fn test_ber_encoding_large_arc2() {
        // OID 2.999.3: first subid = 2*40 + 999 = 1079 -> 0x88 0x37
        let oid = Oid::from_slice(&[2, 999, 3]);
        assert_eq!(oid.to_ber().as_slice(), &[0x88, 0x37, 0x03]);
        assert_eq!(oid.ber_content_len(), 3);
        assert_eq!(Oid::from_ber(&oid.to_ber()).unwrap(), oid);
    }

    #[test]
    fn test_ber_content_len_matches_encoding() {
        for oid in [
            Oid::empty(),
            oid!(1, 3),
            oid!(1, 3, 6, 1, 4, 1, 2021, 10, 1, 3, 1),
            oid!(2, 48),
            oid!(1, 3, 6, 1, u32::MAX),
            oid!(2, u32::MAX - 80),
        ] {
            assert_eq!(oid.ber_content_len(), oid.to_ber().len(), "{}", oid);
        }
    }

    #[test]
    fn test_decode_consumes_own_header() {
        let mut dec = Decoder::from_slice(&[0x06, 0x03, 0x2B, 0x06, 0x01, 0x05, 0x00]);
        let oid = Oid::decode(&mut dec).unwrap();
        assert_eq!(oid.arcs(), &[1, 3, 6, 1]);
        assert_eq!(dec.remaining_slice(), &[0x05, 0x00]);
    }

    #[test]
    fn test_decode_wrong_tag() {
        let mut dec = Decoder::from_slice(&[0x04, 0x01, 0x2B]);
        assert!(Oid::decode(&mut dec).is_err());
    }

    #[test]
    fn test_decode_truncated_subidentifier_offset() {
        // Continuation bit set on the last content byte
        let mut dec = Decoder::from_slice(&[0x06, 0x02, 0x2B, 0x86]);
        let err = Oid::decode(&mut dec).unwrap_err();
        assert!(matches!(
            err,
            Error::Decode {
                offset: 4,
                kind: DecodeErrorKind::TruncatedData
            }
        ));
    }

    #[test]
    fn test_validate() {
        assert!(oid!(1, 3, 6, 1).validate().is_ok());
        assert!(oid!(3, 0).validate().is_err());
        assert!(oid!(0, 40).validate().is_err());
        assert!(oid!(1, 39).validate().is_ok());
        assert!(oid!(2, 999).validate().is_ok());
        assert!(oid!(2, u32::MAX - 80).validate().is_ok());
        assert!(matches!(
            oid!(2, u32::MAX - 79).validate(),
            Err(Error::InvalidOid {
                kind: OidErrorKind::InvalidSecondArc { first: 2, .. },
                ..
            })
        ));
    }

    #[test]
    fn test_oid_non_minimal_subidentifier() {
        let oid = Oid::from_ber(&[0x2B, 0x80, 0x01]).unwrap();
        assert_eq!(oid.arcs(), &[1, 3, 1]);
    }

    #[test]
    fn test_from_ber_enforces_max_oid_len() {
        let mut ber_at_limit = vec![0x2B];
        ber_at_limit.extend(std::iter::repeat_n(0x01, MAX_OID_LEN - 2));
        assert_eq!(Oid::from_ber(&ber_at_limit).unwrap().len(), MAX_OID_LEN);

        let mut ber_over_limit = vec![0x2B];
        ber_over_limit.extend(std::iter::repeat_n(0x01, MAX_OID_LEN - 1));
        assert!(Oid::from_ber(&ber_over_limit).is_err());
    }

    #[test]
    fn test_starts_with() {
        let oid = oid!(1, 3, 6, 1, 2, 1, 1, 1, 0);
        assert!(oid.starts_with(&oid!(1, 3, 6, 1)));
        assert!(!oid!(1, 3, 6, 1).starts_with(&oid));
    }
}
