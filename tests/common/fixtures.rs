//! Common test fixtures and constants.

use bytes::Bytes;
use snmp_varvalue::{Oid, VariableValue, oid};

// =============================================================================
// Standard system MIB OIDs (1.3.6.1.2.1.1.*)
// =============================================================================

pub fn sys_descr() -> Oid {
    oid!(1, 3, 6, 1, 2, 1, 1, 1, 0)
}
pub fn sys_object_id() -> Oid {
    oid!(1, 3, 6, 1, 2, 1, 1, 2, 0)
}
pub fn sys_uptime() -> Oid {
    oid!(1, 3, 6, 1, 2, 1, 1, 3, 0)
}
pub fn sys_contact() -> Oid {
    oid!(1, 3, 6, 1, 2, 1, 1, 4, 0)
}
pub fn sys_name() -> Oid {
    oid!(1, 3, 6, 1, 2, 1, 1, 5, 0)
}
pub fn if_in_octets() -> Oid {
    oid!(1, 3, 6, 1, 2, 1, 2, 2, 1, 10, 1)
}
pub fn if_speed() -> Oid {
    oid!(1, 3, 6, 1, 2, 1, 2, 2, 1, 5, 1)
}

/// Nonexistent OID for testing NoSuchObject/NoSuchInstance
pub fn nonexistent_oid() -> Oid {
    oid!(1, 3, 6, 1, 99, 99, 99, 0)
}

// =============================================================================
// Known encodings
// =============================================================================

/// Values paired with their exact BER encoding under the default config.
pub fn known_encodings() -> Vec<(VariableValue, &'static [u8])> {
    vec![
        (VariableValue::Integer(0), &[0x02, 0x01, 0x00]),
        (VariableValue::Integer(127), &[0x02, 0x01, 0x7F]),
        (VariableValue::Integer(128), &[0x02, 0x02, 0x00, 0x80]),
        (VariableValue::Integer(-129), &[0x02, 0x02, 0xFF, 0x7F]),
        (
            VariableValue::Integer(i32::MAX),
            &[0x02, 0x04, 0x7F, 0xFF, 0xFF, 0xFF],
        ),
        (VariableValue::from(""), &[0x04, 0x00]),
        (VariableValue::from("abc"), &[0x04, 0x03, b'a', b'b', b'c']),
        (
            VariableValue::ObjectIdentifier(oid!(1, 3, 6, 1, 4, 1, 311)),
            &[0x06, 0x07, 0x2B, 0x06, 0x01, 0x04, 0x01, 0x82, 0x37],
        ),
        (VariableValue::TimeTicks(0), &[0x43, 0x01, 0x00]),
        (
            VariableValue::Gauge32(u32::MAX as u64),
            &[0x42, 0x05, 0x00, 0xFF, 0xFF, 0xFF, 0xFF],
        ),
        (VariableValue::Counter32(256), &[0x41, 0x02, 0x01, 0x00]),
        (VariableValue::NoSuchObject, &[0x80, 0x00]),
        (VariableValue::NoSuchInstance, &[0x81, 0x00]),
        (VariableValue::EndOfMibView, &[0x82, 0x00]),
        (VariableValue::Null, &[0x05, 0x00]),
    ]
}

/// A string value whose byte length differs from its character count.
pub fn multibyte_string() -> VariableValue {
    VariableValue::String(Bytes::from_static("Zürich-日本".as_bytes()))
}
