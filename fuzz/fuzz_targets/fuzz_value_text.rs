#![no_main]

use libfuzzer_sys::fuzz_target;

use snmp_varvalue::oid::Oid;
use snmp_varvalue::value::{ValueKind, VariableValue};

fuzz_target!(|data: &[u8]| {
    let _ = Oid::from_ber(data);

    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let _ = Oid::parse(s);

    for kind in ValueKind::ALL {
        if let Ok(value) = VariableValue::parse(kind, s) {
            let wire = value.to_bytes().unwrap();
            assert_eq!(wire.len(), value.total_wire_length());
        }
    }
});
