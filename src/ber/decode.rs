//! BER decoding.
//!
//! A cursor over a `Bytes` buffer. Payloads handed out by the decoder
//! are refcounted slices of the input, so decoded values own their bytes
//! and the caller's buffer can be released independently.

use std::sync::Arc;

use super::length::decode_length;
use super::tag;
use crate::error::{DecodeErrorKind, Error, Result};
use crate::oid::Oid;
use crate::report::{self, Reporter};
use bytes::Bytes;

/// Cursor-style BER reader.
pub struct Decoder {
    data: Bytes,
    offset: usize,
    reporter: Option<Arc<dyn Reporter>>,
}

impl Decoder {
    /// Wrap a `Bytes` buffer for decoding.
    pub fn new(data: Bytes) -> Self {
        Self {
            data,
            offset: 0,
            reporter: None,
        }
    }

    /// Create a decoder with an attached diagnostic reporter.
    pub fn with_reporter(data: Bytes, reporter: Arc<dyn Reporter>) -> Self {
        Self {
            data,
            offset: 0,
            reporter: Some(reporter),
        }
    }

    /// Wrap a borrowed slice, copying it into an owned buffer first.
    pub fn from_slice(data: &[u8]) -> Self {
        Self::new(Bytes::copy_from_slice(data))
    }

    /// Emit a diagnostic through the attached reporter (or `tracing`).
    pub(crate) fn report(&self, message: &str) {
        report::emit(self.reporter.as_ref(), message);
    }

    /// Position of the cursor: bytes consumed so far.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Bytes left between the cursor and the end of the buffer.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    /// True once the cursor has consumed the whole buffer.
    pub fn is_empty(&self) -> bool {
        self.offset >= self.data.len()
    }

    /// Look at the next byte without advancing.
    pub fn peek_byte(&self) -> Option<u8> {
        if self.offset < self.data.len() {
            Some(self.data[self.offset])
        } else {
            None
        }
    }

    /// Consume one byte.
    pub fn read_byte(&mut self) -> Result<u8> {
        if self.offset >= self.data.len() {
            tracing::debug!(target: "snmp_ber", offset = self.offset, "unexpected end of input");
            return Err(Error::decode(self.offset, DecodeErrorKind::BadLength));
        }
        let byte = self.data[self.offset];
        self.offset += 1;
        Ok(byte)
    }

    /// Consume a tag octet.
    pub fn read_tag(&mut self) -> Result<u8> {
        self.read_byte()
    }

    /// Consume a length field.
    pub fn read_length(&mut self) -> Result<usize> {
        let (len, consumed) = decode_length(&self.data[self.offset..], self.offset)?;
        self.offset += consumed;
        Ok(len)
    }

    /// Consume `len` raw bytes as a refcounted slice of the input.
    pub fn read_bytes(&mut self, len: usize) -> Result<Bytes> {
        // A huge len could wrap offset + len; saturate so the bounds
        // check still fires
        if self.offset.saturating_add(len) > self.data.len() {
            tracing::debug!(
                target: "snmp_ber",
                offset = self.offset,
                needed = len,
                available = self.remaining(),
                "insufficient data"
            );
            return Err(Error::decode(self.offset, DecodeErrorKind::BadLength));
        }
        let bytes = self.data.slice(self.offset..self.offset + len);
        self.offset += len;
        Ok(bytes)
    }

    /// Require the next tag to be `expected`; consume the header and
    /// return the content length.
    pub fn expect_tag(&mut self, expected: u8) -> Result<usize> {
        let offset = self.offset;
        let actual = self.read_tag()?;
        if actual != expected {
            tracing::debug!(
                target: "snmp_ber",
                offset,
                "unexpected tag: expected 0x{expected:02X}, got 0x{actual:02X}"
            );
            return Err(Error::decode(
                offset,
                DecodeErrorKind::UnsupportedType { tag: actual },
            ));
        }
        self.read_length()
    }

    /// Consume a complete INTEGER element (signed, up to 64-bit).
    pub fn read_integer(&mut self) -> Result<i64> {
        let len = self.expect_tag(tag::universal::INTEGER)?;
        self.read_integer_value(len)
    }

    /// Consume a signed integer payload of `len` bytes.
    ///
    /// The accumulator starts at the sign fill (-1 or 0 depending on the
    /// first payload byte's high bit) and shifts each byte in, which
    /// yields the mathematically correct signed reading for any payload
    /// up to 8 bytes.
    pub fn read_integer_value(&mut self, len: usize) -> Result<i64> {
        if len == 0 {
            tracing::debug!(target: "snmp_ber", offset = self.offset, "zero-length integer");
            return Err(Error::decode(self.offset, DecodeErrorKind::BadLength));
        }
        if len > 8 {
            tracing::debug!(target: "snmp_ber", offset = self.offset, length = len, "integer too long");
            return Err(Error::decode(
                self.offset,
                DecodeErrorKind::IntegerOverflow { length: len, max: 8 },
            ));
        }

        let bytes = self.read_bytes(len)?;

        let is_negative = bytes[0] & 0x80 != 0;
        let mut value: i64 = if is_negative { -1 } else { 0 };

        for &byte in bytes.iter() {
            value = (value << 8) | (byte as i64);
        }

        Ok(value)
    }

    /// Consume a complete INTEGER constrained to 32 bits (PDU header
    /// fields).
    pub fn read_integer32(&mut self) -> Result<i32> {
        let len = self.expect_tag(tag::universal::INTEGER)?;
        self.read_integer32_value(len)
    }

    /// Consume a signed 32-bit integer payload of `len` bytes.
    pub fn read_integer32_value(&mut self, len: usize) -> Result<i32> {
        if len > 4 {
            tracing::debug!(target: "snmp_ber", offset = self.offset, length = len, "integer32 too long");
            return Err(Error::decode(
                self.offset,
                DecodeErrorKind::IntegerOverflow { length: len, max: 4 },
            ));
        }
        self.read_integer_value(len).map(|v| v as i32)
    }

    /// Consume an unsigned 32-bit payload (Counter32, Gauge32,
    /// TimeTicks) of `len` bytes. Payloads of 1-4 bytes are zero-extended
    /// on the left; longer payloads overflow.
    pub fn read_unsigned32_value(&mut self, len: usize) -> Result<u32> {
        if len == 0 {
            tracing::debug!(target: "snmp_ber", offset = self.offset, "zero-length integer");
            return Err(Error::decode(self.offset, DecodeErrorKind::BadLength));
        }
        if len > 4 {
            tracing::debug!(target: "snmp_ber", offset = self.offset, length = len, "unsigned32 too long");
            return Err(Error::decode(
                self.offset,
                DecodeErrorKind::IntegerOverflow { length: len, max: 4 },
            ));
        }

        let bytes = self.read_bytes(len)?;
        let mut value: u32 = 0;

        for &byte in bytes.iter() {
            value = (value << 8) | (byte as u32);
        }

        Ok(value)
    }

    /// Consume an unsigned 64-bit payload (Counter64) of `len` bytes.
    pub fn read_unsigned64_value(&mut self, len: usize) -> Result<u64> {
        if len == 0 {
            tracing::debug!(target: "snmp_ber", offset = self.offset, "zero-length integer");
            return Err(Error::decode(self.offset, DecodeErrorKind::BadLength));
        }
        if len > 8 {
            tracing::debug!(target: "snmp_ber", offset = self.offset, length = len, "unsigned64 too long");
            return Err(Error::decode(
                self.offset,
                DecodeErrorKind::IntegerOverflow { length: len, max: 8 },
            ));
        }

        let bytes = self.read_bytes(len)?;
        let mut value: u64 = 0;

        for &byte in bytes.iter() {
            value = (value << 8) | (byte as u64);
        }

        Ok(value)
    }

    /// Consume a complete OCTET STRING element.
    pub fn read_octet_string(&mut self) -> Result<Bytes> {
        let len = self.expect_tag(tag::universal::OCTET_STRING)?;
        self.read_bytes(len)
    }

    /// Consume a complete NULL element.
    pub fn read_null(&mut self) -> Result<()> {
        let len = self.expect_tag(tag::universal::NULL)?;
        if len != 0 {
            tracing::debug!(target: "snmp_ber", offset = self.offset, length = len, "NULL with non-zero length");
            return Err(Error::decode(self.offset, DecodeErrorKind::BadLength));
        }
        Ok(())
    }

    /// Consume a complete OBJECT IDENTIFIER element.
    pub fn read_oid(&mut self) -> Result<Oid> {
        let len = self.expect_tag(tag::universal::OBJECT_IDENTIFIER)?;
        self.read_oid_value(len)
    }

    /// Consume an OID body whose length was already read.
    pub fn read_oid_value(&mut self, len: usize) -> Result<Oid> {
        let base = self.offset;
        let bytes = self.read_bytes(len)?;
        Oid::from_ber(&bytes).map_err(|e| e.with_offset_base(base))
    }

    /// Consume a SEQUENCE header and return a decoder scoped to its body.
    ///
    /// Both 0x30 and the mis-emitted primitive form 0x10 are accepted.
    pub fn read_sequence(&mut self) -> Result<Decoder> {
        let offset = self.offset;
        let actual = self.read_tag()?;
        if actual != tag::universal::SEQUENCE && actual != tag::universal::SEQUENCE_PRIMITIVE {
            tracing::debug!(target: "snmp_ber", offset, "expected SEQUENCE, got 0x{actual:02X}");
            return Err(Error::decode(
                offset,
                DecodeErrorKind::UnsupportedType { tag: actual },
            ));
        }
        let len = self.read_length()?;
        self.sub_decoder(len)
    }

    /// Consume a complete IpAddress element. The header must be the
    /// two-byte short form and the payload exactly four bytes.
    pub fn read_ip_address(&mut self) -> Result<[u8; 4]> {
        let offset = self.offset;
        let actual = self.read_tag()?;
        if actual != tag::application::IP_ADDRESS {
            tracing::debug!(target: "snmp_ber", offset, "expected IpAddress, got 0x{actual:02X}");
            return Err(Error::decode(
                offset,
                DecodeErrorKind::UnsupportedType { tag: actual },
            ));
        }
        let len = self.read_length()?;
        if self.offset - offset != 2 {
            tracing::debug!(target: "snmp_ber", offset, "IP address requires short-form length");
            return Err(Error::decode(offset, DecodeErrorKind::BadLength));
        }
        self.read_ip_address_value(len)
    }

    /// Consume an IpAddress payload whose length was already read.
    pub fn read_ip_address_value(&mut self, len: usize) -> Result<[u8; 4]> {
        if len != 4 {
            tracing::debug!(target: "snmp_ber", offset = self.offset, length = len, "IP address must be 4 bytes");
            return Err(Error::decode(self.offset, DecodeErrorKind::BadLength));
        }
        let bytes = self.read_bytes(4)?;
        Ok([bytes[0], bytes[1], bytes[2], bytes[3]])
    }

    /// Split off the next `len` bytes as a child decoder.
    ///
    /// The child sees only its own body, so an element inside it cannot
    /// read past the enclosing length. The reporter is inherited.
    pub fn sub_decoder(&mut self, len: usize) -> Result<Decoder> {
        let content = self.read_bytes(len)?;
        Ok(Decoder {
            data: content,
            offset: 0,
            reporter: self.reporter.clone(),
        })
    }

    /// View the unconsumed remainder of the buffer.
    pub fn remaining_slice(&self) -> &[u8] {
        &self.data[self.offset..]
    }
}
