//! BER (Basic Encoding Rules) primitives for SNMP values.
//!
//! This module provides the definite-length encoding and decoding pieces the
//! value codec is built on. Encoders write forward into any [`std::io::Write`]
//! sink, so every content length is computed before its header is written.
//! The decoder follows X.690 with permissive parsing aligned with net-snmp behavior.

mod decode;
mod encode;
mod length;
pub mod tag;

pub use decode::*;
pub use encode::*;
pub use length::*;
