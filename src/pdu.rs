//! The PDU codec.
//!
//! Owns the body of the four context-tagged wrappers the value codec
//! supports: GetRequest, GetNextRequest, GetResponse, and Report. A PDU
//! travels as a complete TLV, tag included, so both directions here work
//! on whole elements rather than bare bodies.

use crate::ber::{Decoder, EncodeBuf, integer_content_len, length_encoded_len};
use crate::error::{DecodeErrorKind, Error, Result};
use crate::oid::Oid;
use crate::varbind::{VarBind, decode_varbind_list, encode_varbind_list, varbind_list_encoded_len};

/// Which of the four supported operations a PDU carries.
///
/// The discriminant doubles as the wrapper's identifier octet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PduType {
    GetRequest = 0xA0,
    GetNextRequest = 0xA1,
    Response = 0xA2,
    Report = 0xA8,
}

impl PduType {
    /// Map an identifier octet to its PDU type, if supported.
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0xA0 => Some(Self::GetRequest),
            0xA1 => Some(Self::GetNextRequest),
            0xA2 => Some(Self::Response),
            0xA8 => Some(Self::Report),
            _ => None,
        }
    }

    /// The identifier octet for this PDU type.
    pub fn tag(self) -> u8 {
        self as u8
    }
}

impl std::fmt::Display for PduType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GetRequest => write!(f, "getRequest"),
            Self::GetNextRequest => write!(f, "getNextRequest"),
            Self::Response => write!(f, "getResponse"),
            Self::Report => write!(f, "snmpReport"),
        }
    }
}

/// The `error-status` vocabulary of RFC 3416.
///
/// Codes 0 through 5 date back to SNMPv1; 6 through 18 were added in
/// SMIv2 to say precisely why a SET failed. Agents send whichever their
/// version knows, so the enum keeps an `Unknown` escape hatch rather
/// than rejecting codes from the future.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorStatus {
    /// 0: nothing went wrong.
    NoError,
    /// 1: the reply would not fit in one message.
    TooBig,
    /// 2: no such OID here (v1 agents; v2c+ answer with exception values).
    NoSuchName,
    /// 3: a SET offered a value the object cannot take (v1).
    BadValue,
    /// 4: a SET hit a read-only object (v1).
    ReadOnly,
    /// 5: some failure not covered by any other code.
    GenErr,
    /// 6: the object exists but this principal may not touch it.
    NoAccess,
    /// 7: SET value's ASN.1 type does not match the object.
    WrongType,
    /// 8: SET value has a length the object cannot take.
    WrongLength,
    /// 9: SET value's encoding is malformed.
    WrongEncoding,
    /// 10: SET value is out of range for the object.
    WrongValue,
    /// 11: the named row can never be created.
    NoCreation,
    /// 12: SET value conflicts with the state of other objects.
    InconsistentValue,
    /// 13: a resource the SET needs is not available right now.
    ResourceUnavailable,
    /// 14: the commit phase of a SET failed.
    CommitFailed,
    /// 15: worse, the undo phase failed afterwards.
    UndoFailed,
    /// 16: blocked by access control.
    AuthorizationError,
    /// 17: the object never supports writes.
    NotWritable,
    /// 18: the name cannot be created under current conditions.
    InconsistentName,
    /// Any code this crate does not know yet.
    Unknown(i32),
}

impl ErrorStatus {
    /// Interpret a raw `error-status` integer.
    pub fn from_i32(value: i32) -> Self {
        match value {
            0 => Self::NoError,
            1 => Self::TooBig,
            2 => Self::NoSuchName,
            3 => Self::BadValue,
            4 => Self::ReadOnly,
            5 => Self::GenErr,
            6 => Self::NoAccess,
            7 => Self::WrongType,
            8 => Self::WrongLength,
            9 => Self::WrongEncoding,
            10 => Self::WrongValue,
            11 => Self::NoCreation,
            12 => Self::InconsistentValue,
            13 => Self::ResourceUnavailable,
            14 => Self::CommitFailed,
            15 => Self::UndoFailed,
            16 => Self::AuthorizationError,
            17 => Self::NotWritable,
            18 => Self::InconsistentName,
            other => Self::Unknown(other),
        }
    }

    /// The raw `error-status` integer.
    pub fn as_i32(&self) -> i32 {
        match self {
            Self::NoError => 0,
            Self::TooBig => 1,
            Self::NoSuchName => 2,
            Self::BadValue => 3,
            Self::ReadOnly => 4,
            Self::GenErr => 5,
            Self::NoAccess => 6,
            Self::WrongType => 7,
            Self::WrongLength => 8,
            Self::WrongEncoding => 9,
            Self::WrongValue => 10,
            Self::NoCreation => 11,
            Self::InconsistentValue => 12,
            Self::ResourceUnavailable => 13,
            Self::CommitFailed => 14,
            Self::UndoFailed => 15,
            Self::AuthorizationError => 16,
            Self::NotWritable => 17,
            Self::InconsistentName => 18,
            Self::Unknown(code) => *code,
        }
    }
}

impl std::fmt::Display for ErrorStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoError => write!(f, "noError"),
            Self::TooBig => write!(f, "tooBig"),
            Self::NoSuchName => write!(f, "noSuchName"),
            Self::BadValue => write!(f, "badValue"),
            Self::ReadOnly => write!(f, "readOnly"),
            Self::GenErr => write!(f, "genErr"),
            Self::NoAccess => write!(f, "noAccess"),
            Self::WrongType => write!(f, "wrongType"),
            Self::WrongLength => write!(f, "wrongLength"),
            Self::WrongEncoding => write!(f, "wrongEncoding"),
            Self::WrongValue => write!(f, "wrongValue"),
            Self::NoCreation => write!(f, "noCreation"),
            Self::InconsistentValue => write!(f, "inconsistentValue"),
            Self::ResourceUnavailable => write!(f, "resourceUnavailable"),
            Self::CommitFailed => write!(f, "commitFailed"),
            Self::UndoFailed => write!(f, "undoFailed"),
            Self::AuthorizationError => write!(f, "authorizationError"),
            Self::NotWritable => write!(f, "notWritable"),
            Self::InconsistentName => write!(f, "inconsistentName"),
            Self::Unknown(code) => write!(f, "unknown({code})"),
        }
    }
}

/// One request/response PDU.
///
/// All four supported operations share this layout; only the wrapper
/// tag distinguishes them.
#[derive(Debug, Clone, PartialEq)]
pub struct Pdu {
    /// Which operation the wrapper tag announced.
    pub pdu_type: PduType,
    /// Caller-chosen ID echoed back by the responder.
    pub request_id: i32,
    /// An [`ErrorStatus`] code; zero in requests.
    pub error_status: i32,
    /// 1-based position of the binding `error_status` refers to.
    pub error_index: i32,
    /// The bindings this operation names or answers.
    pub varbinds: Vec<VarBind>,
}

impl Pdu {
    /// A GetRequest naming `oids`, each bound to NULL.
    pub fn get_request(request_id: i32, oids: &[Oid]) -> Self {
        Self {
            pdu_type: PduType::GetRequest,
            request_id,
            error_status: 0,
            error_index: 0,
            varbinds: oids.iter().map(|oid| VarBind::null(oid.clone())).collect(),
        }
    }

    /// A GetNextRequest naming `oids`, each bound to NULL.
    pub fn get_next_request(request_id: i32, oids: &[Oid]) -> Self {
        Self {
            pdu_type: PduType::GetNextRequest,
            request_id,
            error_status: 0,
            error_index: 0,
            varbinds: oids.iter().map(|oid| VarBind::null(oid.clone())).collect(),
        }
    }

    /// Encode to BER, producing the complete TLV including the context tag.
    pub fn encode(&self, buf: &mut EncodeBuf) {
        buf.push_constructed(self.pdu_type.tag(), |buf| {
            encode_varbind_list(buf, &self.varbinds);
            buf.push_integer(self.error_index.into());
            buf.push_integer(self.error_status.into());
            buf.push_integer(self.request_id.into());
        });
    }

    /// Exact size of the encoding, header included.
    pub fn ber_encoded_len(&self) -> usize {
        let header_fields: usize = [self.request_id, self.error_status, self.error_index]
            .into_iter()
            .map(|v| {
                let content_len = integer_content_len(v.into());
                1 + length_encoded_len(content_len) + content_len
            })
            .sum();
        let content_len = header_fields + varbind_list_encoded_len(&self.varbinds);
        1 + length_encoded_len(content_len) + content_len
    }

    /// Decode a complete PDU TLV, tag included.
    pub fn decode(decoder: &mut Decoder) -> Result<Self> {
        let offset = decoder.offset();
        let tag_byte = decoder.read_tag()?;
        let pdu_type = PduType::from_tag(tag_byte).ok_or_else(|| {
            tracing::debug!(target: "snmp_ber", offset, "not a supported PDU tag: 0x{tag_byte:02X}");
            Error::decode(offset, DecodeErrorKind::UnsupportedType { tag: tag_byte })
        })?;

        let len = decoder.read_length()?;
        let body_offset = decoder.offset();
        let mut pdu_decoder = decoder.sub_decoder(len)?;

        Self::decode_body(&mut pdu_decoder, pdu_type).map_err(|e| e.with_offset_base(body_offset))
    }

    fn decode_body(decoder: &mut Decoder, pdu_type: PduType) -> Result<Self> {
        let request_id = decoder.read_integer32()?;
        let error_status = decoder.read_integer32()?;
        let error_index = decoder.read_integer32()?;
        let varbinds = decode_varbind_list(decoder)?;

        Ok(Pdu {
            pdu_type,
            request_id,
            error_status,
            error_index,
            varbinds,
        })
    }

    /// True when `error_status` is anything but noError.
    pub fn is_error(&self) -> bool {
        self.error_status != 0
    }

    /// `error_status` interpreted as an [`ErrorStatus`].
    pub fn error_status_enum(&self) -> ErrorStatus {
        ErrorStatus::from_i32(self.error_status)
    }

    /// The successful Response answering this PDU: same request ID and
    /// bindings, error fields cleared.
    pub fn to_response(&self) -> Self {
        Self {
            pdu_type: PduType::Response,
            request_id: self.request_id,
            error_status: 0,
            error_index: 0,
            varbinds: self.varbinds.clone(),
        }
    }

    /// The failing Response answering this PDU, blaming the binding at
    /// `error_index`.
    pub fn to_error_response(&self, error_status: ErrorStatus, error_index: i32) -> Self {
        Self {
            pdu_type: PduType::Response,
            request_id: self.request_id,
            error_status: error_status.as_i32(),
            error_index,
            varbinds: self.varbinds.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    fn roundtrip(pdu: &Pdu) -> Pdu {
        let mut buf = EncodeBuf::new();
        pdu.encode(&mut buf);
        let bytes = buf.finish();
        let mut decoder = Decoder::new(bytes);
        Pdu::decode(&mut decoder).unwrap()
    }

    #[test]
    fn test_pdu_type_tags() {
        assert_eq!(PduType::GetRequest.tag(), 0xA0);
        assert_eq!(PduType::from_tag(0xA2), Some(PduType::Response));
        assert_eq!(PduType::from_tag(0xA8), Some(PduType::Report));
        assert_eq!(PduType::from_tag(0xA3), None);
        assert_eq!(PduType::from_tag(0xA5), None);
    }

    #[test]
    fn test_get_request_roundtrip() {
        let pdu = Pdu::get_request(
            0x7654,
            &[
                crate::oid!(1, 3, 6, 1, 2, 1, 1, 1, 0),
                crate::oid!(1, 3, 6, 1, 2, 1, 1, 5, 0),
            ],
        );
        let decoded = roundtrip(&pdu);
        assert_eq!(decoded, pdu);
        assert!(!decoded.is_error());
        assert!(decoded.varbinds.iter().all(|vb| vb.value == Value::Null));
    }

    #[test]
    fn test_get_next_request_roundtrip() {
        let pdu = Pdu::get_next_request(1, &[crate::oid!(1, 3, 6, 1)]);
        assert_eq!(roundtrip(&pdu), pdu);
    }

    #[test]
    fn test_response_with_error_status() {
        let request = Pdu::get_request(99, &[crate::oid!(1, 3, 6, 1, 2, 1, 99)]);
        let response = request.to_error_response(ErrorStatus::NoSuchName, 1);

        assert_eq!(response.pdu_type, PduType::Response);
        assert_eq!(response.request_id, 99);
        assert!(response.is_error());
        assert_eq!(response.error_status_enum(), ErrorStatus::NoSuchName);

        let decoded = roundtrip(&response);
        assert_eq!(decoded, response);
    }

    #[test]
    fn test_known_bytes() {
        // GetRequest { request-id 1, error-status 0, error-index 0,
        //              varbinds { { 1.3.6.1.2.1.1.1.0, NULL } } }
        let pdu = Pdu::get_request(1, &[crate::oid!(1, 3, 6, 1, 2, 1, 1, 1, 0)]);
        let mut buf = EncodeBuf::new();
        pdu.encode(&mut buf);
        let bytes = buf.finish();
        assert_eq!(
            &bytes[..],
            &[
                0xA0, 0x19, // GetRequest, 25 bytes
                0x02, 0x01, 0x01, // request-id 1
                0x02, 0x01, 0x00, // error-status 0
                0x02, 0x01, 0x00, // error-index 0
                0x30, 0x0E, // varbind list
                0x30, 0x0C, // varbind
                0x06, 0x08, 0x2B, 0x06, 0x01, 0x02, 0x01, 0x01, 0x01, 0x00, // OID
                0x05, 0x00, // NULL
            ]
        );
        assert_eq!(pdu.ber_encoded_len(), bytes.len());
    }

    #[test]
    fn test_negative_request_id_roundtrip() {
        let mut pdu = Pdu::get_request(-1, &[]);
        pdu.error_status = ErrorStatus::GenErr.as_i32();
        pdu.error_index = 2;
        assert_eq!(roundtrip(&pdu), pdu);
    }

    #[test]
    fn test_decode_rejects_oversized_request_id() {
        // request-id of 5 bytes exceeds Integer32
        let data = [
            0xA0, 0x11, //
            0x02, 0x05, 0x01, 0x00, 0x00, 0x00, 0x00, // request-id too wide
            0x02, 0x01, 0x00, //
            0x02, 0x01, 0x00, //
            0x30, 0x00, //
        ];
        let mut decoder = Decoder::from_slice(&data);
        let err = Pdu::decode(&mut decoder).unwrap_err();
        assert_eq!(
            err.decode_kind(),
            Some(DecodeErrorKind::IntegerOverflow { length: 5, max: 4 })
        );
    }

    #[test]
    fn test_decode_rejects_unsupported_pdu_tag() {
        // SetRequest (0xA3) is outside the supported set
        let mut decoder = Decoder::from_slice(&[0xA3, 0x00]);
        let err = Pdu::decode(&mut decoder).unwrap_err();
        assert_eq!(
            err.decode_kind(),
            Some(DecodeErrorKind::UnsupportedType { tag: 0xA3 })
        );
    }

    #[test]
    fn test_error_status_conversions() {
        for code in 0..=18 {
            let status = ErrorStatus::from_i32(code);
            assert_eq!(status.as_i32(), code);
            assert!(!matches!(status, ErrorStatus::Unknown(_)));
        }
        assert_eq!(ErrorStatus::from_i32(99), ErrorStatus::Unknown(99));
        assert_eq!(ErrorStatus::Unknown(99).as_i32(), 99);
        assert_eq!(ErrorStatus::NoSuchName.to_string(), "noSuchName");
    }

    #[test]
    fn test_to_response() {
        let request = Pdu::get_request(5, &[crate::oid!(1, 3, 6, 1)]);
        let response = request.to_response();
        assert_eq!(response.pdu_type, PduType::Response);
        assert_eq!(response.request_id, 5);
        assert_eq!(response.varbinds, request.varbinds);
        assert!(!response.is_error());
    }

    #[test]
    fn test_pdu_display() {
        assert_eq!(PduType::GetRequest.to_string(), "getRequest");
        assert_eq!(PduType::GetNextRequest.to_string(), "getNextRequest");
        assert_eq!(PduType::Response.to_string(), "getResponse");
        assert_eq!(PduType::Report.to_string(), "snmpReport");
    }
}
