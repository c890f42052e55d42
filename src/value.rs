//! SNMP value types.
//!
//! The `Value` enum is the tagged-union model of the wire: every BER
//! element the codec understands maps to exactly one variant, and every
//! variant knows its identifier octet. Decoding is a pure function from a
//! byte slice to a `Value` tree plus a consumed-byte count; encoding is
//! the inverse.

use crate::ber::{Decoder, EncodeBuf, integer_content_len, length_encoded_len, tag};
use crate::error::{DecodeErrorKind, Error, Result};
use crate::oid::Oid;
use crate::pdu::{Pdu, PduType};
use crate::util::encode_hex;
use bytes::Bytes;

/// Maximum SEQUENCE nesting depth accepted on decode.
///
/// SNMP messages nest a handful of levels; a hostile datagram built of
/// nothing but SEQUENCE headers could otherwise recurse once per two
/// input bytes and exhaust the stack.
pub const MAX_SEQUENCE_DEPTH: usize = 128;

/// SNMP value.
///
/// A closed sum over the BER types required by SNMP v1/v2c/v3. Unknown
/// identifier octets are a decode error, not a variant: a datagram
/// carrying a tag outside this table is malformed from the point of view
/// of this codec and gets discarded by the caller.
///
/// Values are immutable once constructed. Decoded byte payloads are
/// refcounted out of the input buffer, so a `Value` never borrows from
/// the slice it was decoded from.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// END-OF-CONTENT (0x00). Only meaningful inside indefinite-length
    /// elements, which this codec rejects, but some agents emit it as a
    /// padding element.
    EndOfContent,

    /// INTEGER (signed, up to 64-bit, minimal two's-complement encoding)
    Integer(i64),

    /// BIT STRING payload, kept verbatim.
    ///
    /// The leading unused-bit-count octet is currently part of the
    /// payload rather than being interpreted.
    /// TODO: surface the unused-bit count separately and reject non-zero
    /// counts instead of storing the octet in-band.
    BitString(Bytes),

    /// OCTET STRING: uninterpreted bytes.
    OctetString(Bytes),

    /// NULL, the placeholder value of request varbinds.
    Null,

    /// OBJECT IDENTIFIER.
    ObjectIdentifier(Oid),

    /// IA5String. Nominally ASCII, but UTF-8 passes with a diagnostic.
    IA5String(String),

    /// SEQUENCE: child values in wire order.
    Sequence(Vec<Value>),

    /// IpAddress: four octets, network order.
    IpAddress([u8; 4]),

    /// Counter32: monotonically increasing, wraps at 2^32.
    Counter32(u32),

    /// Gauge32 (and Unsigned32, which shares its encoding): clamps
    /// rather than wrapping.
    Gauge32(u32),

    /// TimeTicks: elapsed time in hundredths of a second.
    TimeTicks(u32),

    /// Counter64: wraps at 2^64. Unknown to SNMPv1 peers.
    Counter64(u64),

    /// The noSuchObject exception: the object is in the MIB, but this
    /// instance has nothing to report.
    NoSuchObject,

    /// The endOfMibView exception: a GETNEXT walked off the end.
    EndOfMibView,

    /// GetRequest PDU (0xA0)
    SnmpGet(Pdu),

    /// GetNextRequest PDU (0xA1)
    SnmpGetNext(Pdu),

    /// GetResponse PDU (0xA2)
    SnmpResponse(Pdu),

    /// Report PDU (0xA8)
    SnmpReport(Pdu),
}

impl Value {
    /// The identifier octet this value encodes under.
    pub fn tag(&self) -> u8 {
        match self {
            Value::EndOfContent => tag::universal::END_OF_CONTENT,
            Value::Integer(_) => tag::universal::INTEGER,
            Value::BitString(_) => tag::universal::BIT_STRING,
            Value::OctetString(_) => tag::universal::OCTET_STRING,
            Value::Null => tag::universal::NULL,
            Value::ObjectIdentifier(_) => tag::universal::OBJECT_IDENTIFIER,
            Value::IA5String(_) => tag::universal::IA5_STRING,
            Value::Sequence(_) => tag::universal::SEQUENCE,
            Value::IpAddress(_) => tag::application::IP_ADDRESS,
            Value::Counter32(_) => tag::application::COUNTER32,
            Value::Gauge32(_) => tag::application::GAUGE32,
            Value::TimeTicks(_) => tag::application::TIMETICKS,
            Value::Counter64(_) => tag::application::COUNTER64,
            Value::NoSuchObject => tag::context::NO_SUCH_OBJECT,
            Value::EndOfMibView => tag::context::END_OF_MIB_VIEW,
            Value::SnmpGet(_) => tag::pdu::GET_REQUEST,
            Value::SnmpGetNext(_) => tag::pdu::GET_NEXT_REQUEST,
            Value::SnmpResponse(_) => tag::pdu::RESPONSE,
            Value::SnmpReport(_) => tag::pdu::REPORT,
        }
    }

    /// The signed integer inside, for [`Value::Integer`] only.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// The number as u32, for any of the 32-bit unsigned application
    /// types or an [`Value::Integer`] that happens to fit.
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            Value::Counter32(v) | Value::Gauge32(v) | Value::TimeTicks(v) => Some(*v),
            Value::Integer(v) => u32::try_from(*v).ok(),
            _ => None,
        }
    }

    /// The number as u64: [`Value::Counter64`], the 32-bit unsigned
    /// types widened, or a non-negative [`Value::Integer`].
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Counter64(v) => Some(*v),
            Value::Counter32(v) | Value::Gauge32(v) | Value::TimeTicks(v) => Some(*v as u64),
            Value::Integer(v) => u64::try_from(*v).ok(),
            _ => None,
        }
    }

    /// The raw payload of an [`Value::OctetString`] or [`Value::BitString`].
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::OctetString(v) | Value::BitString(v) => Some(v),
            _ => None,
        }
    }

    /// A text view: [`Value::IA5String`] directly, or an
    /// [`Value::OctetString`] whose payload happens to be valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::IA5String(s) => Some(s),
            Value::OctetString(v) => std::str::from_utf8(v).ok(),
            _ => None,
        }
    }

    /// The OID inside, for [`Value::ObjectIdentifier`] only.
    pub fn as_oid(&self) -> Option<&Oid> {
        match self {
            Value::ObjectIdentifier(oid) => Some(oid),
            _ => None,
        }
    }

    /// The address inside a [`Value::IpAddress`], as an `Ipv4Addr`.
    pub fn as_ip(&self) -> Option<std::net::Ipv4Addr> {
        match self {
            Value::IpAddress(bytes) => Some(std::net::Ipv4Addr::from(*bytes)),
            _ => None,
        }
    }

    /// The children of a [`Value::Sequence`].
    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// The PDU inside any of the four wrapper variants.
    pub fn as_pdu(&self) -> Option<&Pdu> {
        match self {
            Value::SnmpGet(pdu)
            | Value::SnmpGetNext(pdu)
            | Value::SnmpResponse(pdu)
            | Value::SnmpReport(pdu) => Some(pdu),
            _ => None,
        }
    }

    /// True for the varbind exception markers.
    pub fn is_exception(&self) -> bool {
        matches!(self, Value::NoSuchObject | Value::EndOfMibView)
    }

    /// Exact size of the encoding, header included, without encoding.
    pub fn ber_encoded_len(&self) -> usize {
        match self {
            Value::EndOfContent | Value::Null | Value::NoSuchObject | Value::EndOfMibView => 2,
            Value::Integer(v) => {
                let content_len = integer_content_len(*v);
                1 + length_encoded_len(content_len) + content_len
            }
            Value::BitString(data) | Value::OctetString(data) => {
                let content_len = data.len();
                1 + length_encoded_len(content_len) + content_len
            }
            Value::IA5String(s) => {
                let content_len = s.len();
                1 + length_encoded_len(content_len) + content_len
            }
            Value::ObjectIdentifier(oid) => oid.ber_encoded_len(),
            Value::Sequence(items) => {
                let content_len: usize = items.iter().map(Value::ber_encoded_len).sum();
                1 + length_encoded_len(content_len) + content_len
            }
            // The fixed-width types: header plus 4 or 8 payload bytes
            Value::IpAddress(_) => 6,
            Value::Counter32(_) | Value::Gauge32(_) | Value::TimeTicks(_) => 6,
            Value::Counter64(_) => 10,
            Value::SnmpGet(pdu)
            | Value::SnmpGetNext(pdu)
            | Value::SnmpResponse(pdu)
            | Value::SnmpReport(pdu) => pdu.ber_encoded_len(),
        }
    }

    /// Encode to BER.
    pub fn encode(&self, buf: &mut EncodeBuf) {
        match self {
            Value::EndOfContent => {
                buf.push_length(0);
                buf.push_tag(tag::universal::END_OF_CONTENT);
            }
            Value::Integer(v) => buf.push_integer(*v),
            Value::BitString(data) => buf.push_bit_string(data),
            Value::OctetString(data) => buf.push_octet_string(data),
            Value::Null => buf.push_null(),
            Value::ObjectIdentifier(oid) => buf.push_oid(oid),
            Value::IA5String(s) => buf.push_ia5_string(s),
            Value::Sequence(items) => {
                buf.push_sequence(|buf| {
                    // Reverse buffer: children pushed last-first
                    for item in items.iter().rev() {
                        item.encode(buf);
                    }
                });
            }
            Value::IpAddress(addr) => buf.push_ip_address(*addr),
            Value::Counter32(v) => buf.push_unsigned32(tag::application::COUNTER32, *v),
            Value::Gauge32(v) => buf.push_unsigned32(tag::application::GAUGE32, *v),
            Value::TimeTicks(v) => buf.push_unsigned32(tag::application::TIMETICKS, *v),
            Value::Counter64(v) => buf.push_counter64(*v),
            Value::NoSuchObject => {
                buf.push_length(0);
                buf.push_tag(tag::context::NO_SUCH_OBJECT);
            }
            Value::EndOfMibView => {
                buf.push_length(0);
                buf.push_tag(tag::context::END_OF_MIB_VIEW);
            }
            // PDU wrappers delegate wholesale; the PDU encoder emits the
            // complete TLV including its context tag.
            Value::SnmpGet(pdu)
            | Value::SnmpGetNext(pdu)
            | Value::SnmpResponse(pdu)
            | Value::SnmpReport(pdu) => pdu.encode(buf),
        }
    }

    /// Encode to a fresh buffer, returning the wire bytes.
    pub fn to_ber(&self) -> Bytes {
        let mut buf = EncodeBuf::with_capacity(self.ber_encoded_len());
        self.encode(&mut buf);
        buf.finish()
    }

    /// Decode one value from the front of a byte slice.
    ///
    /// Returns the value and the number of bytes consumed; trailing bytes
    /// are left to the caller.
    ///
    /// # Examples
    ///
    /// ```
    /// use snmp_ber::Value;
    ///
    /// let (value, consumed) = Value::from_ber(&[0x02, 0x01, 0x7F, 0xAA]).unwrap();
    /// assert_eq!(value, Value::Integer(127));
    /// assert_eq!(consumed, 3);
    /// ```
    pub fn from_ber(data: &[u8]) -> Result<(Self, usize)> {
        let mut decoder = Decoder::from_slice(data);
        let value = Self::decode(&mut decoder)?;
        Ok((value, decoder.offset()))
    }

    /// Decode from BER at the decoder's cursor.
    pub fn decode(decoder: &mut Decoder) -> Result<Self> {
        Self::decode_at_depth(decoder, 0)
    }

    fn decode_at_depth(decoder: &mut Decoder, depth: usize) -> Result<Self> {
        let start = decoder.offset();
        let Some(outer) = decoder.peek_byte() else {
            tracing::debug!(target: "snmp_ber", offset = start, "empty input");
            return Err(Error::decode(start, DecodeErrorKind::BadLength));
        };

        // PDU wrappers consume the whole TLV, tag included.
        if tag::is_pdu(outer) {
            let pdu = Pdu::decode(decoder)?;
            let inner = pdu.pdu_type.tag();
            if inner != outer {
                decoder.report(&format!(
                    "PDU codec returned {} for outer tag 0x{outer:02X}",
                    pdu.pdu_type
                ));
                return Err(Error::decode(
                    start,
                    DecodeErrorKind::UnexpectedPdu { outer, inner },
                ));
            }
            return Ok(match pdu.pdu_type {
                PduType::GetRequest => Value::SnmpGet(pdu),
                PduType::GetNextRequest => Value::SnmpGetNext(pdu),
                PduType::Response => Value::SnmpResponse(pdu),
                PduType::Report => Value::SnmpReport(pdu),
            });
        }

        let tag_byte = decoder.read_tag()?;
        let len = decoder.read_length()?;
        let body_offset = decoder.offset();

        match tag_byte {
            tag::universal::END_OF_CONTENT => {
                require_empty(decoder, len, "END-OF-CONTENT")?;
                Ok(Value::EndOfContent)
            }
            tag::universal::INTEGER => {
                let value = decoder.read_integer_value(len)?;
                Ok(Value::Integer(value))
            }
            tag::universal::BIT_STRING => {
                let data = decoder.read_bytes(len)?;
                Ok(Value::BitString(data))
            }
            tag::universal::OCTET_STRING => {
                let data = decoder.read_bytes(len)?;
                Ok(Value::OctetString(data))
            }
            tag::universal::NULL => {
                require_empty(decoder, len, "NULL")?;
                Ok(Value::Null)
            }
            tag::universal::OBJECT_IDENTIFIER => {
                let oid = decoder.read_oid_value(len)?;
                Ok(Value::ObjectIdentifier(oid))
            }
            tag::universal::IA5_STRING => {
                let data = decoder.read_bytes(len)?;
                let text = match String::from_utf8(data.to_vec()) {
                    Ok(s) => s,
                    Err(e) => {
                        decoder.report(&format!(
                            "IA5String is not valid UTF-8 at offset {body_offset}, replacing"
                        ));
                        String::from_utf8_lossy(e.as_bytes()).into_owned()
                    }
                };
                Ok(Value::IA5String(text))
            }
            tag::universal::SEQUENCE | tag::universal::SEQUENCE_PRIMITIVE => {
                if depth >= MAX_SEQUENCE_DEPTH {
                    tracing::debug!(target: "snmp_ber", offset = start, "sequence nesting too deep");
                    return Err(Error::decode(start, DecodeErrorKind::BadLength));
                }
                let mut seq = decoder.sub_decoder(len)?;
                let mut items = Vec::new();
                while !seq.is_empty() {
                    let item = Self::decode_at_depth(&mut seq, depth + 1)
                        .map_err(|e| e.with_offset_base(body_offset))?;
                    items.push(item);
                }
                Ok(Value::Sequence(items))
            }
            tag::application::IP_ADDRESS => {
                // Header must be the two-byte short form per the wire contract
                if body_offset - start != 2 {
                    tracing::debug!(target: "snmp_ber", offset = start, "IP address requires short-form length");
                    return Err(Error::decode(start, DecodeErrorKind::BadLength));
                }
                let addr = decoder.read_ip_address_value(len)?;
                Ok(Value::IpAddress(addr))
            }
            tag::application::COUNTER32 => {
                let value = decoder.read_unsigned32_value(len)?;
                Ok(Value::Counter32(value))
            }
            tag::application::GAUGE32 => {
                let value = decoder.read_unsigned32_value(len)?;
                Ok(Value::Gauge32(value))
            }
            tag::application::TIMETICKS => {
                let value = decoder.read_unsigned32_value(len)?;
                Ok(Value::TimeTicks(value))
            }
            tag::application::COUNTER64 => {
                let value = decoder.read_unsigned64_value(len)?;
                Ok(Value::Counter64(value))
            }
            tag::context::NO_SUCH_OBJECT => {
                require_empty(decoder, len, "noSuchObject")?;
                Ok(Value::NoSuchObject)
            }
            tag::context::END_OF_MIB_VIEW => {
                require_empty(decoder, len, "endOfMibView")?;
                Ok(Value::EndOfMibView)
            }
            other => {
                decoder.report(&format!(
                    "unsupported identifier 0x{other:02X} (class 0x{:02X}, {}) at offset {start}",
                    tag::tag_class(other),
                    if tag::is_constructed(other) {
                        "constructed"
                    } else {
                        "primitive"
                    },
                ));
                Err(Error::decode(
                    start,
                    DecodeErrorKind::UnsupportedType { tag: other },
                ))
            }
        }
    }
}

/// Fail with BadLength when a fixed-empty element carries content.
fn require_empty(decoder: &Decoder, len: usize, what: &str) -> Result<()> {
    if len != 0 {
        tracing::debug!(target: "snmp_ber", offset = decoder.offset(), length = len, "{what} with non-zero length");
        return Err(Error::decode(decoder.offset(), DecodeErrorKind::BadLength));
    }
    Ok(())
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::EndOfContent => write!(f, "END-OF-CONTENT"),
            Value::Integer(v) => write!(f, "{v}"),
            Value::BitString(data) => write!(f, "BitString(0x{})", encode_hex(data)),
            Value::OctetString(data) => {
                // Readable text when the payload is UTF-8, hex otherwise
                if let Ok(s) = std::str::from_utf8(data) {
                    write!(f, "{s}")
                } else {
                    write!(f, "0x{}", encode_hex(data))
                }
            }
            Value::Null => write!(f, "NULL"),
            Value::ObjectIdentifier(oid) => write!(f, "{oid}"),
            Value::IA5String(s) => write!(f, "{s}"),
            Value::Sequence(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::IpAddress(addr) => {
                write!(f, "{}.{}.{}.{}", addr[0], addr[1], addr[2], addr[3])
            }
            Value::Counter32(v) => write!(f, "{v}"),
            Value::Gauge32(v) => write!(f, "{v}"),
            Value::TimeTicks(v) => {
                let secs = v / 100;
                let days = secs / 86400;
                let hours = (secs % 86400) / 3600;
                let mins = (secs % 3600) / 60;
                let s = secs % 60;
                write!(f, "{days}d {hours}h {mins}m {s}s")
            }
            Value::Counter64(v) => write!(f, "{v}"),
            Value::NoSuchObject => write!(f, "noSuchObject"),
            Value::EndOfMibView => write!(f, "endOfMibView"),
            Value::SnmpGet(pdu)
            | Value::SnmpGetNext(pdu)
            | Value::SnmpResponse(pdu)
            | Value::SnmpReport(pdu) => {
                write!(f, "{}(request-id {})", pdu.pdu_type, pdu.request_id)
            }
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v.into())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::OctetString(Bytes::copy_from_slice(s.as_bytes()))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::OctetString(Bytes::from(s))
    }
}

impl From<&[u8]> for Value {
    fn from(data: &[u8]) -> Self {
        Value::OctetString(Bytes::copy_from_slice(data))
    }
}

impl From<Bytes> for Value {
    fn from(data: Bytes) -> Self {
        Value::OctetString(data)
    }
}

impl From<Oid> for Value {
    fn from(oid: Oid) -> Self {
        Value::ObjectIdentifier(oid)
    }
}

impl From<std::net::Ipv4Addr> for Value {
    fn from(addr: std::net::Ipv4Addr) -> Self {
        Value::IpAddress(addr.octets())
    }
}

impl From<[u8; 4]> for Value {
    fn from(addr: [u8; 4]) -> Self {
        Value::IpAddress(addr)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::Counter64(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Sequence(items)
    }
}

/// A PDU converts to the wrapper variant selected by its own type, which
/// keeps the variant and the embedded discriminant consistent.
impl From<Pdu> for Value {
    fn from(pdu: Pdu) -> Self {
        match pdu.pdu_type {
            PduType::GetRequest => Value::SnmpGet(pdu),
            PduType::GetNextRequest => Value::SnmpGetNext(pdu),
            PduType::Response => Value::SnmpResponse(pdu),
            PduType::Report => Value::SnmpReport(pdu),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::varbind::VarBind;

    fn roundtrip(value: Value) -> Value {
        let data = value.to_ber();
        let (decoded, consumed) = Value::from_ber(&data).unwrap();
        assert_eq!(consumed, data.len(), "consumed bytes != encoded length");
        decoded
    }

    #[test]
    fn test_integer_roundtrip() {
        for v in [
            0i64,
            1,
            -1,
            127,
            128,
            -128,
            -129,
            i32::MAX as i64,
            i32::MIN as i64,
            i64::MAX,
            i64::MIN,
            -32768,
            -8388608,
            -2147483648,
        ] {
            let value = Value::Integer(v);
            assert_eq!(roundtrip(value.clone()), value, "integer {v}");
        }
    }

    #[test]
    fn test_octet_string_roundtrip() {
        for data in [&b"hello world"[..], &[0x00, 0xFF, 0x80, 0x7F], &[]] {
            let value = Value::OctetString(Bytes::copy_from_slice(data));
            assert_eq!(roundtrip(value.clone()), value);
        }
    }

    #[test]
    fn test_bit_string_roundtrip() {
        let value = Value::BitString(Bytes::from_static(&[0x00, 0xA0, 0x40]));
        assert_eq!(roundtrip(value.clone()), value);
    }

    #[test]
    fn test_ia5_string_roundtrip() {
        let value = Value::IA5String("SNMPv2-MIB".into());
        assert_eq!(roundtrip(value.clone()), value);

        // Non-ASCII survives (with a diagnostic, not an error)
        let value = Value::IA5String("grüße".into());
        assert_eq!(roundtrip(value.clone()), value);
    }

    #[test]
    fn test_empty_variants_roundtrip() {
        for value in [
            Value::Null,
            Value::EndOfContent,
            Value::NoSuchObject,
            Value::EndOfMibView,
        ] {
            assert_eq!(roundtrip(value.clone()), value);
            assert_eq!(value.to_ber().len(), 2);
        }
    }

    #[test]
    fn test_oid_roundtrip() {
        let value = Value::ObjectIdentifier(crate::oid!(1, 3, 6, 1, 2, 1, 1, 1, 0));
        assert_eq!(roundtrip(value.clone()), value);
    }

    #[test]
    fn test_ip_address_roundtrip() {
        for addr in [[192, 168, 1, 1], [0, 0, 0, 0], [255, 255, 255, 255]] {
            let value = Value::IpAddress(addr);
            assert_eq!(roundtrip(value.clone()), value);
        }
    }

    #[test]
    fn test_unsigned_roundtrip() {
        for v in [0u32, 1, 127, 128, 999999, u32::MAX] {
            assert_eq!(roundtrip(Value::Counter32(v)), Value::Counter32(v));
            assert_eq!(roundtrip(Value::Gauge32(v)), Value::Gauge32(v));
            assert_eq!(roundtrip(Value::TimeTicks(v)), Value::TimeTicks(v));
        }
        for v in [0u64, 1, u32::MAX as u64 + 1, 1 << 33, u64::MAX] {
            assert_eq!(roundtrip(Value::Counter64(v)), Value::Counter64(v));
        }
    }

    #[test]
    fn test_sequence_roundtrip() {
        let value = Value::Sequence(vec![
            Value::Integer(1),
            Value::Null,
            Value::Sequence(vec![Value::OctetString(Bytes::from_static(b"x"))]),
        ]);
        assert_eq!(roundtrip(value.clone()), value);

        let empty = Value::Sequence(vec![]);
        assert_eq!(roundtrip(empty.clone()), empty);
    }

    #[test]
    fn test_pdu_roundtrip() {
        let pdu = Pdu::get_request(0x1234, &[crate::oid!(1, 3, 6, 1, 2, 1, 1, 1, 0)]);
        let value = Value::from(pdu);
        assert!(matches!(value, Value::SnmpGet(_)));
        assert_eq!(roundtrip(value.clone()), value);

        let mut pdu = Pdu::get_request(7, &[]);
        pdu.pdu_type = PduType::Report;
        pdu.varbinds = vec![VarBind::new(
            crate::oid!(1, 3, 6, 1, 6, 3, 15, 1, 1, 4, 0),
            Value::Counter32(42),
        )];
        let value = Value::from(pdu);
        assert!(matches!(value, Value::SnmpReport(_)));
        assert_eq!(roundtrip(value.clone()), value);
    }

    #[test]
    fn test_fixed_width_unsigned_encoding() {
        // Counter32/Gauge32/TimeTicks always emit 4 payload bytes
        assert_eq!(
            &Value::Counter32(5).to_ber()[..],
            &[0x41, 0x04, 0x00, 0x00, 0x00, 0x05]
        );
        // ...but the decoder zero-extends shorter encodings
        let (v, _) = Value::from_ber(&[0x41, 0x01, 0x05]).unwrap();
        assert_eq!(v, Value::Counter32(5));
        let (v, _) = Value::from_ber(&[0x43, 0x02, 0x01, 0x00]).unwrap();
        assert_eq!(v, Value::TimeTicks(256));
    }

    #[test]
    fn test_trailing_bytes_left_to_caller() {
        let (value, consumed) = Value::from_ber(&[0x05, 0x00, 0x02, 0x01, 0x2A]).unwrap();
        assert_eq!(value, Value::Null);
        assert_eq!(consumed, 2);
    }

    #[test]
    fn test_unsupported_tags_rejected() {
        // Opaque (0x44), noSuchInstance (0x81), SetRequest (0xA3), and
        // GetBulk (0xA5) are all outside this codec's table.
        for tag_byte in [0x44u8, 0x81, 0xA3, 0xA5, 0x13, 0xC0] {
            let err = Value::from_ber(&[tag_byte, 0x00]).unwrap_err();
            assert_eq!(
                err.decode_kind(),
                Some(DecodeErrorKind::UnsupportedType { tag: tag_byte }),
                "tag 0x{tag_byte:02X}"
            );
        }
    }

    #[test]
    fn test_sequence_primitive_tag_accepted() {
        // 0x10 accepted on decode, normalized to 0x30 on re-encode
        let (value, _) = Value::from_ber(&[0x10, 0x03, 0x02, 0x01, 0x07]).unwrap();
        assert_eq!(value, Value::Sequence(vec![Value::Integer(7)]));
        assert_eq!(&value.to_ber()[..2], &[0x30, 0x03]);
    }

    #[test]
    fn test_sequence_child_overrun() {
        // Child declares 4 bytes but the sequence body only holds 1
        let err = Value::from_ber(&[0x30, 0x03, 0x02, 0x04, 0x01]).unwrap_err();
        assert_eq!(err.decode_kind(), Some(DecodeErrorKind::BadLength));
    }

    #[test]
    fn test_sequence_depth_capped() {
        // Build nested sequences inside-out, one level past the cap
        let mut data: Vec<u8> = Vec::new();
        for _ in 0..(MAX_SEQUENCE_DEPTH + 8) {
            let len = data.len();
            let mut wrapped = vec![0x30];
            if len < 128 {
                wrapped.push(len as u8);
            } else {
                wrapped.push(0x82);
                wrapped.push((len >> 8) as u8);
                wrapped.push(len as u8);
            }
            wrapped.extend_from_slice(&data);
            data = wrapped;
        }
        let err = Value::from_ber(&data).unwrap_err();
        assert_eq!(err.decode_kind(), Some(DecodeErrorKind::BadLength));

        // A tree at moderate depth still decodes
        let mut nested = Value::Sequence(vec![Value::Integer(1)]);
        for _ in 0..16 {
            nested = Value::Sequence(vec![nested]);
        }
        assert_eq!(roundtrip(nested.clone()), nested);
    }

    #[test]
    fn test_empty_input() {
        let err = Value::from_ber(&[]).unwrap_err();
        assert_eq!(err.decode_kind(), Some(DecodeErrorKind::BadLength));
    }

    #[test]
    fn test_nonzero_length_empty_variants_rejected() {
        for tag_byte in [0x00u8, 0x05, 0x80, 0x82] {
            let err = Value::from_ber(&[tag_byte, 0x01, 0xFF]).unwrap_err();
            assert_eq!(
                err.decode_kind(),
                Some(DecodeErrorKind::BadLength),
                "tag 0x{tag_byte:02X}"
            );
        }
    }

    #[test]
    fn test_ia5_lossy_utf8_reports() {
        use crate::report::RecordingReporter;

        let reporter = RecordingReporter::shared();
        let mut decoder =
            Decoder::with_reporter(Bytes::from_static(&[0x16, 0x02, 0xFF, 0x41]), reporter.clone());
        let value = Value::decode(&mut decoder).unwrap();
        assert_eq!(value, Value::IA5String("\u{FFFD}A".into()));
        assert_eq!(reporter.messages().len(), 1);
    }

    #[test]
    fn test_unsupported_tag_reports() {
        use crate::report::RecordingReporter;

        let reporter = RecordingReporter::shared();
        let mut decoder =
            Decoder::with_reporter(Bytes::from_static(&[0x44, 0x01, 0x00]), reporter.clone());
        assert!(Value::decode(&mut decoder).is_err());
        let messages = reporter.messages();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("0x44"));
    }

    #[test]
    fn test_ber_encoded_len_matches_encoding() {
        let values = [
            Value::Integer(-129),
            Value::OctetString(Bytes::from_static(&[0u8; 200])),
            Value::Sequence(vec![Value::Integer(1), Value::Null]),
            Value::Counter64(u64::MAX),
            Value::ObjectIdentifier(crate::oid!(1, 3, 6, 1, 2, 1)),
            Value::from(Pdu::get_request(1, &[crate::oid!(1, 3, 6, 1)])),
        ];
        for value in values {
            assert_eq!(
                value.ber_encoded_len(),
                value.to_ber().len(),
                "mismatch for {value:?}"
            );
        }
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Value::Integer(42).as_i64(), Some(42));
        assert_eq!(Value::Counter32(100).as_u32(), Some(100));
        assert_eq!(Value::Integer(-1).as_u32(), None);
        assert_eq!(Value::Counter64(100).as_u64(), Some(100));
        assert_eq!(Value::TimeTicks(300).as_u64(), Some(300));
        assert_eq!(
            Value::OctetString(Bytes::from_static(b"test")).as_bytes(),
            Some(b"test".as_slice())
        );
        assert_eq!(Value::IA5String("abc".into()).as_str(), Some("abc"));
        assert_eq!(
            Value::IpAddress([10, 0, 0, 1]).as_ip(),
            Some(std::net::Ipv4Addr::new(10, 0, 0, 1))
        );
        assert!(Value::NoSuchObject.is_exception());
        assert!(Value::EndOfMibView.is_exception());
        assert!(!Value::Null.is_exception());

        let seq = Value::Sequence(vec![Value::Null]);
        assert_eq!(seq.as_sequence().map(<[Value]>::len), Some(1));

        let value = Value::from(Pdu::get_request(9, &[]));
        assert_eq!(value.as_pdu().map(|p| p.request_id), Some(9));
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Integer(-42).to_string(), "-42");
        assert_eq!(
            Value::OctetString(Bytes::from_static(b"hello")).to_string(),
            "hello"
        );
        assert_eq!(
            Value::OctetString(Bytes::from_static(&[0xFF, 0xFE])).to_string(),
            "0xfffe"
        );
        assert_eq!(Value::Null.to_string(), "NULL");
        assert_eq!(Value::IpAddress([192, 168, 1, 1]).to_string(), "192.168.1.1");
        assert_eq!(Value::TimeTicks(123456).to_string(), "0d 0h 20m 34s");
        assert_eq!(Value::NoSuchObject.to_string(), "noSuchObject");
        assert_eq!(Value::EndOfMibView.to_string(), "endOfMibView");
        assert_eq!(
            Value::Sequence(vec![Value::Integer(1), Value::Null]).to_string(),
            "[1, NULL]"
        );
        assert_eq!(
            Value::BitString(Bytes::from_static(&[0xBE, 0xEF])).to_string(),
            "BitString(0xbeef)"
        );
    }

    #[test]
    fn test_from_conversions() {
        assert_eq!(Value::from(42i32), Value::Integer(42));
        assert_eq!(Value::from(42i64), Value::Integer(42));
        assert_eq!(Value::from("hi").as_str(), Some("hi"));
        assert_eq!(Value::from(10_000_000_000u64), Value::Counter64(10_000_000_000));
        assert_eq!(
            Value::from([192u8, 168, 1, 1]),
            Value::IpAddress([192, 168, 1, 1])
        );
        assert_eq!(
            Value::from(vec![Value::Null]),
            Value::Sequence(vec![Value::Null])
        );
    }
}
