//! BER tag definitions for SNMP values.
//!
//! Tag encoding follows X.690 Section 8.1.2:
//! - Bits 7-6: Class (00=Universal, 01=Application, 10=Context-specific, 11=Private)
//! - Bit 5: Primitive (0) or Constructed (1)
//! - Bits 4-0: Tag number (0-30, or 31 for long form)
//!
//! Every value kind has its own constant here. Encoders must never reuse one
//! kind's tag for another.

/// Tag class bits (bits 7-6)
pub mod class {
    pub const UNIVERSAL: u8 = 0x00;
    pub const APPLICATION: u8 = 0x40;
    pub const CONTEXT_SPECIFIC: u8 = 0x80;
}

/// Constructed bit (bit 5)
pub const CONSTRUCTED: u8 = 0x20;

/// Universal tags (class bits 00)
pub mod universal {
    use super::CONSTRUCTED;
    use super::class::UNIVERSAL;

    pub const INTEGER: u8 = UNIVERSAL | 0x02;
    pub const OCTET_STRING: u8 = UNIVERSAL | 0x04;
    /// Constructed OCTET STRING (0x24) - not supported, should be rejected
    pub const OCTET_STRING_CONSTRUCTED: u8 = OCTET_STRING | CONSTRUCTED;
    pub const NULL: u8 = UNIVERSAL | 0x05;
    pub const OBJECT_IDENTIFIER: u8 = UNIVERSAL | 0x06;
    pub const SEQUENCE: u8 = UNIVERSAL | CONSTRUCTED | 0x10; // 0x30
}

/// Application tags (class bits 01) - SNMP-specific types
pub mod application {
    use super::class::APPLICATION;

    pub const COUNTER32: u8 = APPLICATION | 0x01; // 0x41
    pub const GAUGE32: u8 = APPLICATION | 0x02; // 0x42, also Unsigned32
    pub const TIMETICKS: u8 = APPLICATION | 0x03; // 0x43
}

/// Context-specific tags (class bits 10) - Exception values
pub mod context {
    use super::class::CONTEXT_SPECIFIC;

    pub const NO_SUCH_OBJECT: u8 = CONTEXT_SPECIFIC; // 0x80
    pub const NO_SUCH_INSTANCE: u8 = CONTEXT_SPECIFIC | 0x01; // 0x81
    pub const END_OF_MIB_VIEW: u8 = CONTEXT_SPECIFIC | 0x02; // 0x82
}
