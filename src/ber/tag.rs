//! Identifier octets for the SNMP wire dialect.
//!
//! X.690 Section 8.1.2 packs three fields into the identifier octet: the
//! class in the top two bits, a constructed-encoding flag in bit 5, and
//! the tag number below that. Everything SNMP puts on the wire fits in
//! single-octet identifiers, so the constants here are plain `u8`s and
//! the multi-octet tag-number form never comes up.

/// The four class values, pre-shifted into bits 7-6.
pub mod class {
    pub const UNIVERSAL: u8 = 0x00;
    pub const APPLICATION: u8 = 0x40;
    pub const CONTEXT_SPECIFIC: u8 = 0x80;
    pub const PRIVATE: u8 = 0xC0;
}

/// Bit 5 of the identifier, set when the contents are themselves TLVs.
pub const CONSTRUCTED: u8 = 0x20;

/// Universal-class types this codec understands.
pub mod universal {
    pub const END_OF_CONTENT: u8 = 0x00;
    pub const INTEGER: u8 = 0x02;
    pub const BIT_STRING: u8 = 0x03;
    pub const OCTET_STRING: u8 = 0x04;
    pub const NULL: u8 = 0x05;
    pub const OBJECT_IDENTIFIER: u8 = 0x06;
    pub const IA5_STRING: u8 = 0x16;
    /// SEQUENCE always travels in constructed form.
    pub const SEQUENCE: u8 = 0x30;
    /// SEQUENCE with the constructed bit mis-cleared. Not valid BER, but
    /// some peers emit it; accepted on decode only.
    pub const SEQUENCE_PRIMITIVE: u8 = 0x10;
}

/// Application-class types, defined for SNMP by RFC 2578.
pub mod application {
    pub const IP_ADDRESS: u8 = 0x40;
    pub const COUNTER32: u8 = 0x41;
    /// RFC 2578 gives Gauge32 and Unsigned32 one shared encoding.
    pub const GAUGE32: u8 = 0x42;
    pub const TIMETICKS: u8 = 0x43;
    pub const COUNTER64: u8 = 0x46;
}

/// Context-specific markers: the varbind exception values of SNMPv2c.
pub mod context {
    pub const NO_SUCH_OBJECT: u8 = 0x80;
    pub const END_OF_MIB_VIEW: u8 = 0x82;
}

/// Context-specific constructed wrappers carrying a PDU body.
///
/// Only the four operations this codec handles; the other RFC 3416 PDU
/// octets (SetRequest 0xA3 through TrapV2 0xA7) decode as unsupported.
pub mod pdu {
    pub const GET_REQUEST: u8 = 0xA0;
    pub const GET_NEXT_REQUEST: u8 = 0xA1;
    pub const RESPONSE: u8 = 0xA2;
    pub const REPORT: u8 = 0xA8;
}

/// True for the four PDU wrapper identifiers above.
#[inline]
pub const fn is_pdu(tag: u8) -> bool {
    matches!(
        tag,
        pdu::GET_REQUEST | pdu::GET_NEXT_REQUEST | pdu::RESPONSE | pdu::REPORT
    )
}

/// True when the identifier marks a constructed encoding.
#[inline]
pub const fn is_constructed(tag: u8) -> bool {
    tag & CONSTRUCTED != 0
}

/// Extract the class bits of an identifier.
#[inline]
pub const fn tag_class(tag: u8) -> u8 {
    tag & 0xC0
}
