//! # snmp-ber
//!
//! BER codec for the ASN.1 subset used by SNMP v1/v2c/v3.
//!
//! This crate implements the tag-length-value wire discipline that every
//! SNMP message is built from: the universal ASN.1 types (INTEGER, OCTET
//! STRING, NULL, OBJECT IDENTIFIER, SEQUENCE, ...), the SNMP
//! application types (IpAddress, Counter32, Gauge32, TimeTicks,
//! Counter64), the exception markers (noSuchObject, endOfMibView), and
//! the context-tagged PDU wrappers (GetRequest, GetNextRequest,
//! GetResponse, Report).
//!
//! The codec is a pure, reentrant library: no I/O, no shared mutable
//! state, no background work. Transport, SNMPv3 security, and any
//! command-line surface live in other crates that feed this one byte
//! slices and consume [`Value`] trees.
//!
//! ## Features
//!
//! - Bit-exact BER encode/decode with minimal integer encodings
//! - Typed OIDs, values, bindings, and PDUs instead of raw byte juggling
//! - Decoder tolerant of the padded and mis-tagged encodings real
//!   agents produce
//! - Injectable diagnostics for recoverable wire anomalies
//!
//! ## Quick Start
//!
//! ```rust
//! use snmp_ber::{Value, oid};
//!
//! // Encode a varbind-shaped sequence
//! let value = Value::Sequence(vec![
//!     Value::ObjectIdentifier(oid!(1, 3, 6, 1, 2, 1, 1, 1, 0)),
//!     Value::Null,
//! ]);
//! let wire = value.to_ber();
//!
//! // Decode it back; trailing bytes are left to the caller
//! let (decoded, consumed) = Value::from_ber(&wire).unwrap();
//! assert_eq!(decoded, value);
//! assert_eq!(consumed, wire.len());
//! ```
//!
//! ## PDU wrappers
//!
//! ```rust
//! use snmp_ber::{Pdu, Value, oid};
//!
//! let pdu = Pdu::get_request(42, &[oid!(1, 3, 6, 1, 2, 1, 1, 5, 0)]);
//! let wire = Value::from(pdu).to_ber();
//!
//! let (decoded, _) = Value::from_ber(&wire).unwrap();
//! assert_eq!(decoded.as_pdu().unwrap().request_id, 42);
//! ```

pub mod ber;
pub mod error;
pub mod oid;
pub mod pdu;
pub mod report;
pub mod value;
pub mod varbind;

pub(crate) mod util;

// Flatten the common types into the crate root
pub use error::{DecodeErrorKind, Error, OidErrorKind, Result};
pub use oid::Oid;
pub use pdu::{ErrorStatus, Pdu, PduType};
pub use report::{RecordingReporter, Reporter, TracingReporter};
pub use value::Value;
pub use varbind::VarBind;
