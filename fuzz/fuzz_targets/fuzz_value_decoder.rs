#![no_main]

use bytes::Bytes;
use libfuzzer_sys::fuzz_target;

use snmp_varvalue::ber::Decoder;
use snmp_varvalue::value::VariableValue;
use snmp_varvalue::varbind::VarBind;
use snmp_varvalue::{CodecConfig, Error};

fuzz_target!(|data: &[u8]| {
    let bytes = Bytes::copy_from_slice(data);

    // Anything that decodes must re-encode to a value that decodes the same
    let mut decoder = Decoder::new(bytes.clone());
    match VariableValue::decode(&mut decoder) {
        Ok(value) => {
            let wire = value.to_bytes().unwrap();
            assert_eq!(wire.len(), value.total_wire_length());
            assert_eq!(VariableValue::from_bytes(&wire).unwrap(), value);
        }
        Err(Error::UnrecognizedTag { offset, .. }) => assert_eq!(decoder.offset(), offset),
        Err(_) => {}
    }

    let strict = CodecConfig::new().strict_exceptions(true);
    let mut decoder = Decoder::new(bytes.clone());
    let _ = VariableValue::decode_with(&mut decoder, &strict);

    let mut src = data;
    let _ = VariableValue::decode_from_reader(&mut src);

    let mut decoder = Decoder::new(bytes);
    let _ = VarBind::decode(&mut decoder);
});
