//! BER encoding.
//!
//! TLV headers carry the length of content that has not been produced
//! yet, so a forward writer needs either a sizing pre-pass or buffer
//! shuffling. [`EncodeBuf`] sidesteps both by accumulating the message
//! back-to-front: content goes in first, its length and tag after, and
//! one final reversal puts everything in wire order.

use std::sync::Arc;

use super::length::encode_length;
use super::tag;
use crate::report::{self, Reporter};
use bytes::Bytes;

/// Back-to-front BER writer.
///
/// Every `push_*` call lands in front of what was written before it, so
/// callers emit elements in reverse wire order and wrap constructed
/// types after their content. [`finish`](Self::finish) flips the buffer
/// into wire order.
pub struct EncodeBuf {
    buf: Vec<u8>,
    reporter: Option<Arc<dyn Reporter>>,
}

impl EncodeBuf {
    /// A buffer sized for a typical message.
    pub fn new() -> Self {
        Self::with_capacity(512)
    }

    /// A buffer pre-sized by the caller (see `ber_encoded_len` on the
    /// value types for exact sizing).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
            reporter: None,
        }
    }

    /// Create an encode buffer with an attached diagnostic reporter.
    pub fn with_reporter(reporter: Arc<dyn Reporter>) -> Self {
        Self {
            buf: Vec::with_capacity(512),
            reporter: Some(reporter),
        }
    }

    /// Emit a diagnostic through the attached reporter (or `tracing`).
    pub(crate) fn report(&self, message: &str) {
        report::emit(self.reporter.as_ref(), message);
    }

    /// Write a byte slice in front of everything written so far.
    pub fn push_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend(bytes.iter().rev());
    }

    /// Write a length field.
    pub fn push_length(&mut self, len: usize) {
        // encode_length already emits digits in back-to-front order
        let (bytes, count) = encode_length(len);
        self.buf.extend_from_slice(&bytes[..count]);
    }

    /// Write a tag octet.
    pub fn push_tag(&mut self, tag: u8) {
        self.buf.push(tag);
    }

    /// Bytes accumulated so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// True before the first push.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Write a constructed element (SEQUENCE, PDU wrapper).
    ///
    /// Runs `f` to produce the content, measures what it wrote, then
    /// closes the element with its length and tag. Because of the
    /// back-to-front discipline, `f` must push children in reverse wire
    /// order.
    pub fn push_constructed<F>(&mut self, tag: u8, f: F)
    where
        F: FnOnce(&mut Self),
    {
        let start_len = self.len();
        f(self);
        let content_len = self.len() - start_len;
        self.push_length(content_len);
        self.push_tag(tag);
    }

    /// Write a SEQUENCE.
    pub fn push_sequence<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Self),
    {
        self.push_constructed(tag::universal::SEQUENCE, f);
    }

    /// Write an INTEGER in minimal two's-complement form.
    pub fn push_integer(&mut self, value: i64) {
        let (arr, len) = encode_integer_stack(value);
        self.push_bytes(&arr[8 - len..]);
        self.push_length(len);
        self.push_tag(tag::universal::INTEGER);
    }

    /// Write a Counter64. Always eight payload bytes, big-endian.
    pub fn push_counter64(&mut self, value: u64) {
        self.push_bytes(&value.to_be_bytes());
        self.push_length(8);
        self.push_tag(tag::application::COUNTER64);
    }

    /// Write an unsigned 32-bit application type (Counter32, Gauge32,
    /// TimeTicks) under the given tag. Always four payload bytes,
    /// big-endian; peers accept this and the decoder tolerates shorter
    /// encodings.
    pub fn push_unsigned32(&mut self, tag: u8, value: u32) {
        self.push_bytes(&value.to_be_bytes());
        self.push_length(4);
        self.push_tag(tag);
    }

    /// Write an OCTET STRING.
    pub fn push_octet_string(&mut self, data: &[u8]) {
        self.push_bytes(data);
        self.push_length(data.len());
        self.push_tag(tag::universal::OCTET_STRING);
    }

    /// Write a BIT STRING payload verbatim.
    pub fn push_bit_string(&mut self, data: &[u8]) {
        self.push_bytes(data);
        self.push_length(data.len());
        self.push_tag(tag::universal::BIT_STRING);
    }

    /// Write an IA5String.
    ///
    /// IA5 is nominally ASCII; SNMP peers routinely carry UTF-8 in these
    /// strings, so non-ASCII input is reported as a diagnostic and the
    /// UTF-8 bytes are emitted unchanged.
    pub fn push_ia5_string(&mut self, s: &str) {
        if !s.is_ascii() {
            self.report(&format!("IA5String contains non-ASCII bytes: {s:?}"));
        }
        self.push_bytes(s.as_bytes());
        self.push_length(s.len());
        self.push_tag(tag::universal::IA5_STRING);
    }

    /// Write a NULL.
    pub fn push_null(&mut self) {
        self.push_length(0);
        self.push_tag(tag::universal::NULL);
    }

    /// Write an OBJECT IDENTIFIER.
    pub fn push_oid(&mut self, oid: &crate::oid::Oid) {
        let ber = oid.to_ber_smallvec();
        self.push_bytes(&ber);
        self.push_length(ber.len());
        self.push_tag(tag::universal::OBJECT_IDENTIFIER);
    }

    /// Write an IP address.
    pub fn push_ip_address(&mut self, addr: [u8; 4]) {
        self.push_bytes(&addr);
        self.push_length(4);
        self.push_tag(tag::application::IP_ADDRESS);
    }

    /// Flip the accumulated bytes into wire order and hand them over.
    pub fn finish(mut self) -> Bytes {
        self.buf.reverse();
        Bytes::from(self.buf)
    }

    /// Like [`finish`](Self::finish), but returning a plain `Vec<u8>`.
    pub fn finish_vec(mut self) -> Vec<u8> {
        self.buf.reverse();
        self.buf
    }
}

impl Default for EncodeBuf {
    fn default() -> Self {
        Self::new()
    }
}

/// Minimal two's-complement encoding of an i64.
///
/// Returns the full big-endian byte array plus the count of significant
/// trailing bytes (trailing so the reverse buffer can slice them off the
/// array's tail). A byte is redundant when it equals the sign fill
/// (0x00 or 0xFF) and the next byte repeats the sign bit; stripping by
/// that rule leaves exactly the canonical encoding, including the
/// all-0x80 boundary values like -32768 and i64::MIN.
#[inline]
fn encode_integer_stack(value: i64) -> ([u8; 8], usize) {
    let bytes = value.to_be_bytes();

    let mut start = 0;
    if value >= 0 {
        while start < 7 && bytes[start] == 0 && bytes[start + 1] & 0x80 == 0 {
            start += 1;
        }
    } else {
        while start < 7 && bytes[start] == 0xFF && bytes[start + 1] & 0x80 != 0 {
            start += 1;
        }
    }

    (bytes, 8 - start)
}

/// Content length of the minimal INTEGER encoding, without encoding.
pub fn integer_content_len(value: i64) -> usize {
    encode_integer_stack(value).1
}
