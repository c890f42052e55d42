//! Variable bindings: the name/value pairs PDUs carry.

use crate::ber::{Decoder, EncodeBuf, length_encoded_len};
use crate::error::Result;
use crate::oid::Oid;
use crate::value::Value;

/// One binding of an OID to a value.
///
/// On the wire a binding is a two-element SEQUENCE, name first.
#[derive(Debug, Clone, PartialEq)]
pub struct VarBind {
    /// The name side of the binding.
    pub oid: Oid,
    /// The value side; NULL in requests.
    pub value: Value,
}

impl VarBind {
    /// Bind `oid` to `value`.
    pub fn new(oid: Oid, value: Value) -> Self {
        Self { oid, value }
    }

    /// Bind `oid` to NULL, the placeholder form GET-style requests use.
    pub fn null(oid: Oid) -> Self {
        Self {
            oid,
            value: Value::Null,
        }
    }

    /// Encode to BER.
    pub fn encode(&self, buf: &mut EncodeBuf) {
        buf.push_sequence(|buf| {
            self.value.encode(buf);
            buf.push_oid(&self.oid);
        });
    }

    /// Exact size of the encoding, header included, without allocating.
    pub fn ber_encoded_len(&self) -> usize {
        let content_len = self.oid.ber_encoded_len() + self.value.ber_encoded_len();
        1 + length_encoded_len(content_len) + content_len
    }

    /// Decode from BER.
    pub fn decode(decoder: &mut Decoder) -> Result<Self> {
        let mut seq = decoder.read_sequence()?;
        let oid = seq.read_oid()?;
        let value = Value::decode(&mut seq)?;
        Ok(VarBind { oid, value })
    }
}

impl std::fmt::Display for VarBind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {}", self.oid, self.value)
    }
}

/// Encode a binding list: an outer SEQUENCE holding each binding's
/// SEQUENCE in order.
pub fn encode_varbind_list(buf: &mut EncodeBuf, varbinds: &[VarBind]) {
    buf.push_sequence(|buf| {
        // The reverse buffer wants the last binding first
        for vb in varbinds.iter().rev() {
            vb.encode(buf);
        }
    });
}

/// Exact encoded size of a binding list TLV.
pub fn varbind_list_encoded_len(varbinds: &[VarBind]) -> usize {
    let content_len: usize = varbinds.iter().map(VarBind::ber_encoded_len).sum();
    1 + length_encoded_len(content_len) + content_len
}

/// Decode a binding list; the outer SEQUENCE may be empty.
pub fn decode_varbind_list(decoder: &mut Decoder) -> Result<Vec<VarBind>> {
    let mut seq = decoder.read_sequence()?;

    // Pre-size the vec from the body length; a binding rarely encodes
    // under 16 bytes, so this leans toward under-allocating
    let estimated_capacity = (seq.remaining() / 16).max(1);
    let mut varbinds = Vec::with_capacity(estimated_capacity);

    while !seq.is_empty() {
        varbinds.push(VarBind::decode(&mut seq)?);
    }

    Ok(varbinds)
}
