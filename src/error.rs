//! The error surface of the codec.
//!
//! Two layers: [`Error`] is what every fallible operation returns, and
//! [`DecodeErrorKind`] / [`OidErrorKind`] say what actually went wrong —
//! the former a closed set of wire-level failures, the latter the OID
//! constructor's validation failures.
//!
//! Every decode failure carries the byte offset at which it was detected,
//! relative to the buffer handed to the decoder. Detail beyond the kind
//! (expected vs. actual tags, byte counts) is emitted on the `tracing`
//! debug channel at the failure site rather than being carried in the
//! error value.
//!
//! # Matching on failures
//!
//! Most callers match on the decode kind to decide what to log before
//! discarding a malformed datagram:
//!
//! ```
//! use snmp_ber::{DecodeErrorKind, Error, Value};
//!
//! match Value::from_ber(&[0x02, 0x05, 0x00]) {
//!     Ok((value, consumed)) => println!("{value} ({consumed} bytes)"),
//!     Err(Error::Decode { offset, kind: DecodeErrorKind::BadLength }) => {
//!         println!("truncated element at offset {offset}");
//!     }
//!     Err(e) => println!("discarding datagram: {e}"),
//! }
//! ```

/// Shorthand for results carrying this crate's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Wire-level decode error kinds.
///
/// This set is closed: every failure the decoder can produce is one of
/// these kinds, so callers (and fuzzers) can match exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeErrorKind {
    /// Slice shorter than the declared or required payload, or a length
    /// field inconsistent with its element.
    BadLength,
    /// Identifier octet not in the supported SNMP type table.
    UnsupportedType { tag: u8 },
    /// Truncated subidentifier continuation or arc overflow in an OID body.
    MalformedOid,
    /// Integer payload wider than the type it decodes into.
    IntegerOverflow { length: usize, max: usize },
    /// PDU codec returned a type inconsistent with the outer tag.
    UnexpectedPdu { outer: u8, inner: u8 },
}

impl std::fmt::Display for DecodeErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BadLength => write!(f, "slice shorter than declared or required payload"),
            Self::UnsupportedType { tag } => write!(f, "unsupported identifier 0x{tag:02X}"),
            Self::MalformedOid => write!(f, "malformed OID encoding"),
            Self::IntegerOverflow { length, max } => {
                write!(f, "integer payload of {length} bytes exceeds {max}")
            }
            Self::UnexpectedPdu { outer, inner } => {
                write!(
                    f,
                    "PDU type 0x{inner:02X} inconsistent with outer tag 0x{outer:02X}"
                )
            }
        }
    }
}

/// Ways an OID can fail construction or validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OidErrorKind {
    /// A dotted-notation component did not parse as a u32 arc.
    InvalidArc,
    /// The leading arc was outside {0, 1, 2}.
    InvalidFirstArc(u32),
    /// The second arc broke the 0-39 bound its leading arc imposes.
    InvalidSecondArc { first: u32, second: u32 },
    /// Fewer than the 2 arcs every wire OID carries.
    TooShort,
    /// More arcs than the RFC 2578 bound allows.
    TooManyArcs { count: usize, max: usize },
    /// The packed first subidentifier (40 * arc1 + arc2) left u32 range.
    SubidentifierOverflow,
}

impl std::fmt::Display for OidErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidArc => write!(f, "invalid arc value"),
            Self::InvalidFirstArc(v) => write!(f, "first arc must be 0, 1, or 2, got {v}"),
            Self::InvalidSecondArc { first, second } => {
                write!(f, "second arc {second} too large for first arc {first}")
            }
            Self::TooShort => write!(f, "OID must have at least 2 arcs"),
            Self::TooManyArcs { count, max } => {
                write!(f, "OID has {count} arcs, exceeds maximum {max}")
            }
            Self::SubidentifierOverflow => write!(f, "first subidentifier overflows u32"),
        }
    }
}

/// The main error type for all snmp-ber operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// BER decoding error.
    #[error("decode error at offset {offset}: {kind}")]
    Decode {
        offset: usize,
        kind: DecodeErrorKind,
    },

    /// Invalid OID.
    #[error("invalid OID: {kind}")]
    InvalidOid {
        kind: OidErrorKind,
        input: Option<Box<str>>, // populated only on the string-parse path
    },
}

impl Error {
    /// Build a [`Error::Decode`] at the given offset.
    pub fn decode(offset: usize, kind: DecodeErrorKind) -> Self {
        Self::Decode { offset, kind }
    }

    /// Build an [`Error::InvalidOid`] with no offending input to show.
    pub fn invalid_oid(kind: OidErrorKind) -> Self {
        Self::InvalidOid { kind, input: None }
    }

    /// Build an [`Error::InvalidOid`] keeping the string that failed.
    pub fn invalid_oid_with_input(kind: OidErrorKind, input: impl Into<Box<str>>) -> Self {
        Self::InvalidOid {
            kind,
            input: Some(input.into()),
        }
    }

    /// Get the decode kind if this is a wire-level decode error.
    pub fn decode_kind(&self) -> Option<DecodeErrorKind> {
        match self {
            Self::Decode { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Shift a decode offset from body-relative to buffer-relative.
    ///
    /// Sub-decoders report offsets within their own body; callers that
    /// descend into a nested element apply the body's position so errors
    /// surface with absolute offsets.
    pub(crate) fn with_offset_base(self, base: usize) -> Self {
        match self {
            Self::Decode { offset, kind } => Self::Decode {
                offset: base + offset,
                kind,
            },
            other => other,
        }
    }
}
