//! # snmp-varvalue
//!
//! BER codec for SNMP variable-binding values.
//!
//! [`VariableValue`] holds exactly one of INTEGER, OCTET STRING, OBJECT
//! IDENTIFIER, TimeTicks, Gauge32, Counter32, one of the three SNMPv2
//! exception markers, or NULL. Values are built from typed text, encoded as
//! definite-length BER to any [`std::io::Write`] sink and decoded from a
//! [`ber::Decoder`] or any [`std::io::Read`] source.
//!
//! ## Quick Start
//!
//! ```
//! use snmp_varvalue::{VarBind, VariableValue};
//! use snmp_varvalue::ber::Decoder;
//!
//! let value = VariableValue::from_typed_text(Some("Counter32"), Some("1500"))?;
//! assert_eq!(value.wire_length(), 2);
//!
//! let mut wire = Vec::new();
//! value.encode(&mut wire)?;
//! assert_eq!(wire, [0x41, 0x02, 0x05, 0xDC]);
//!
//! let decoded = VariableValue::decode(&mut Decoder::from_slice(&wire))?;
//! assert_eq!(decoded.describe(), "{ Counter32: 1500 }");
//!
//! let vb = VarBind::from_typed_text("1.3.6.1.2.1.1.5.0", Some("String"), Some("rtr-1"))?;
//! println!("{}", vb);
//! # Ok::<(), snmp_varvalue::Error>(())
//! ```
//!
//! ## Logging
//!
//! Decode failures are reported at `debug` level and permissive recoveries at
//! `warn` level through [`tracing`], under the `snmp_varvalue::ber` and
//! `snmp_varvalue::value` targets. No subscriber is installed by the crate.

pub mod ber;
pub mod config;
pub mod error;
pub mod oid;
pub mod value;
pub mod varbind;

// Re-exports for convenience
pub use config::{CodecConfig, UnsignedTagPolicy};
pub use error::{DecodeErrorKind, Error, OidErrorKind, Result};
pub use oid::Oid;
pub use value::{ValueKind, VariableValue};
pub use varbind::VarBind;
