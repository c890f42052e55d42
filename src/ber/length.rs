//! Length fields of the TLV framing.
//!
//! X.690 defines two definite forms: one octet carrying the length
//! directly when it is below 128, and a count octet (high bit set, low
//! seven bits giving the octet count) followed by that many big-endian
//! length octets. The indefinite form (a bare 0x80) never appears in
//! SNMP datagrams and is rejected here.

use crate::error::{DecodeErrorKind, Error, Result};

/// Upper bound on any decoded length.
///
/// A length field is attacker-controlled input, checked before anything
/// downstream sizes a read from it. SNMP traffic tops out around the
/// 64 KB UDP datagram limit; 2 MB leaves generous headroom for oddball
/// transports while still cutting off absurd declarations early.
pub const MAX_LENGTH: usize = 0x200000;

/// Encode a length field.
///
/// Digits come back least-significant first, with the count octet last,
/// so the prepending [`EncodeBuf`](super::EncodeBuf) lays them down in
/// wire order. Short form below 128; long form with the fewest octets
/// that hold the value otherwise.
pub fn encode_length(len: usize) -> ([u8; 9], usize) {
    let mut buf = [0u8; 9];

    if len <= 127 {
        buf[0] = len as u8;
        return (buf, 1);
    }

    let mut remaining = len;
    let mut count = 0;
    while remaining > 0 {
        buf[count] = remaining as u8;
        remaining >>= 8;
        count += 1;
    }
    buf[count] = 0x80 | count as u8;
    (buf, count + 1)
}

/// Size of the encoded length field for a content length.
pub fn length_encoded_len(len: usize) -> usize {
    if len <= 127 {
        1
    } else {
        let mut remaining = len;
        let mut count = 0;
        while remaining > 0 {
            remaining >>= 8;
            count += 1;
        }
        1 + count
    }
}

/// Decode a length field, returning `(length, octets_consumed)`.
///
/// `base_offset` positions error reports when `data` sits inside a
/// larger buffer.
///
/// Long-form counts up to 126 are handled: redundant leading zero octets
/// are skipped, and whatever remains must fit a `usize` and stay under
/// [`MAX_LENGTH`]. The count octet 0xFF is reserved by X.690 and
/// rejected, as is the indefinite form.
pub fn decode_length(data: &[u8], base_offset: usize) -> Result<(usize, usize)> {
    if data.is_empty() {
        tracing::debug!(target: "snmp_ber", offset = base_offset, "truncated length field");
        return Err(Error::decode(base_offset, DecodeErrorKind::BadLength));
    }

    let first = data[0];

    if first == 0x80 {
        tracing::debug!(target: "snmp_ber", offset = base_offset, "indefinite length rejected");
        return Err(Error::decode(base_offset, DecodeErrorKind::BadLength));
    }

    if first & 0x80 == 0 {
        return Ok((first as usize, 1));
    }

    let num_octets = (first & 0x7F) as usize;

    if num_octets == 0x7F {
        // 0xFF as the initial octet is reserved by X.690 Section 8.1.3.5
        tracing::debug!(target: "snmp_ber", offset = base_offset, "reserved length octet 0xFF");
        return Err(Error::decode(base_offset, DecodeErrorKind::BadLength));
    }

    if data.len() < 1 + num_octets {
        tracing::debug!(
            target: "snmp_ber",
            offset = base_offset,
            needed = 1 + num_octets,
            available = data.len(),
            "truncated long-form length"
        );
        return Err(Error::decode(base_offset, DecodeErrorKind::BadLength));
    }

    // Peers may pad with leading zeros; only the significant octets count
    let octets = &data[1..1 + num_octets];
    let significant: &[u8] = {
        let mut s = octets;
        while s.len() > 1 && s[0] == 0 {
            s = &s[1..];
        }
        s
    };

    if significant.len() > size_of::<usize>() {
        tracing::debug!(
            target: "snmp_ber",
            offset = base_offset,
            octets = significant.len(),
            "length does not fit usize"
        );
        return Err(Error::decode(base_offset, DecodeErrorKind::BadLength));
    }

    let mut len: usize = 0;
    for &byte in significant {
        len = (len << 8) | (byte as usize);
    }

    if len > MAX_LENGTH {
        tracing::debug!(
            target: "snmp_ber",
            offset = base_offset,
            length = len,
            max = MAX_LENGTH,
            "length exceeds sanity cap"
        );
        return Err(Error::decode(base_offset, DecodeErrorKind::BadLength));
    }

    Ok((len, 1 + num_octets))
}
