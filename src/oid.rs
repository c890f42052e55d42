//! Object identifiers.
//!
//! An [`Oid`] is the arc sequence itself; the BER body codec
//! ([`from_ber`](Oid::from_ber) / [`to_ber`](Oid::to_ber)) lives
//! alongside it because the first two arcs and the base-128 digit
//! packing make OIDs the one type whose payload is not a plain
//! big-endian number. Arcs sit inline in a `SmallVec` sized so that
//! ordinary MIB names never touch the heap.

use crate::ber::length_encoded_len;
use crate::error::{DecodeErrorKind, Error, OidErrorKind, Result};
use smallvec::SmallVec;
use std::fmt;

/// Hard cap on decoded arc counts.
///
/// RFC 2578 Section 3.5 bounds an OBJECT IDENTIFIER value at 128
/// subidentifiers, and a datagram claiming more is either broken or
/// hostile, so [`Oid::from_ber`] stops there. [`Oid::validate`] applies
/// the same bound to OIDs built in memory.
pub const MAX_OID_LEN: usize = 128;

/// Object identifier: a sequence of non-negative arcs.
///
/// Sixteen arcs fit inline before the backing `SmallVec` spills; the
/// deepest OIDs in common MIBs (table cells with long indexes) sit just
/// around that size.
///
/// A wire OID always carries at least two arcs, because BER folds the
/// first two into one subidentifier (X.690 Section 8.19).
/// [`validate()`](Self::validate) checks that invariant together with
/// the leading-arc range rules.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Oid {
    arcs: SmallVec<[u32; 16]>,
}

impl Oid {
    /// Build an OID from any iterator of arcs.
    ///
    /// Nothing is validated here; run [`validate()`](Self::validate)
    /// before encoding OIDs that come from untrusted input.
    ///
    /// # Examples
    ///
    /// ```
    /// use snmp_ber::oid::Oid;
    ///
    /// let enterprises = Oid::new(vec![1, 3, 6, 1, 4, 1]);
    /// assert_eq!(enterprises.arcs(), &[1, 3, 6, 1, 4, 1]);
    /// ```
    pub fn new(arcs: impl IntoIterator<Item = u32>) -> Self {
        Self {
            arcs: arcs.into_iter().collect(),
        }
    }

    /// Build an OID by copying a slice of arcs.
    pub fn from_slice(arcs: &[u32]) -> Self {
        Self {
            arcs: SmallVec::from_slice(arcs),
        }
    }

    /// Parse dotted notation such as `"1.3.6.1.2.1.1.1.0"`.
    ///
    /// Only the syntax is checked; a string like `"9.1"` parses even
    /// though no such OID can exist. Chain with
    /// [`validate()`](Self::validate) or encode through
    /// [`to_ber_checked()`](Self::to_ber_checked) when the arc rules
    /// matter.
    pub fn parse(s: &str) -> Result<Self> {
        let mut arcs = SmallVec::new();

        for part in s.split('.') {
            if part.is_empty() {
                continue;
            }

            let arc: u32 = part
                .parse()
                .map_err(|_| Error::invalid_oid_with_input(OidErrorKind::InvalidArc, s))?;

            arcs.push(arc);
        }

        Ok(Self { arcs })
    }

    /// The arc values.
    pub fn arcs(&self) -> &[u32] {
        &self.arcs
    }

    /// Number of arcs.
    pub fn len(&self) -> usize {
        self.arcs.len()
    }

    /// True when there are no arcs at all.
    pub fn is_empty(&self) -> bool {
        self.arcs.is_empty()
    }

    /// True when `other` is a prefix of (or equal to) this OID.
    ///
    /// This is the subtree test: an instance lies under a MIB object iff
    /// the instance's name starts with the object's.
    ///
    /// # Examples
    ///
    /// ```
    /// use snmp_ber::oid::Oid;
    ///
    /// let if_oper_status = Oid::parse("1.3.6.1.2.1.2.2.1.8.3").unwrap();
    /// let if_table = Oid::parse("1.3.6.1.2.1.2.2").unwrap();
    ///
    /// assert!(if_oper_status.starts_with(&if_table));
    /// assert!(!if_table.starts_with(&if_oper_status));
    /// ```
    pub fn starts_with(&self, other: &Oid) -> bool {
        self.arcs.len() >= other.arcs.len() && self.arcs[..other.arcs.len()] == other.arcs[..]
    }

    /// The OID one level up, or `None` at the root.
    pub fn parent(&self) -> Option<Oid> {
        if self.arcs.is_empty() {
            None
        } else {
            Some(Oid {
                arcs: SmallVec::from_slice(&self.arcs[..self.arcs.len() - 1]),
            })
        }
    }

    /// This OID with one more arc appended.
    pub fn child(&self, arc: u32) -> Oid {
        let mut arcs = self.arcs.clone();
        arcs.push(arc);
        Oid { arcs }
    }

    /// Check that this OID can legally appear on the wire.
    ///
    /// The rules, from X.690 Section 8.19 and RFC 2578 Section 3.5:
    ///
    /// - at least 2 arcs, at most [`MAX_OID_LEN`]
    /// - arc 1 is 0, 1, or 2
    /// - arc 2 stays below 40 when arc 1 is 0 or 1
    /// - when arc 1 is 2, `80 + arc2` must still fit in u32 so the
    ///   packed first subidentifier is representable
    ///
    /// # Examples
    ///
    /// ```
    /// use snmp_ber::oid::Oid;
    ///
    /// assert!(Oid::parse("1.3.6.1.6.3.1.1.4.1.0").unwrap().validate().is_ok());
    /// assert!(Oid::from_slice(&[3, 0]).validate().is_err());
    /// assert!(Oid::from_slice(&[0, 40]).validate().is_err());
    /// assert!(Oid::from_slice(&[2, 999]).validate().is_ok());
    /// assert!(Oid::from_slice(&[1]).validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        if self.arcs.len() < 2 {
            return Err(Error::invalid_oid(OidErrorKind::TooShort));
        }
        if self.arcs.len() > MAX_OID_LEN {
            return Err(Error::invalid_oid(OidErrorKind::TooManyArcs {
                count: self.arcs.len(),
                max: MAX_OID_LEN,
            }));
        }

        let arc1 = self.arcs[0];
        let arc2 = self.arcs[1];

        if arc1 > 2 {
            return Err(Error::invalid_oid(OidErrorKind::InvalidFirstArc(arc1)));
        }

        if arc1 < 2 {
            if arc2 >= 40 {
                return Err(Error::invalid_oid(OidErrorKind::InvalidSecondArc {
                    first: arc1,
                    second: arc2,
                }));
            }
        } else if arc2 > u32::MAX - 80 {
            return Err(Error::invalid_oid(OidErrorKind::SubidentifierOverflow));
        }

        Ok(())
    }

    /// Encode the BER body (no tag or length) into a stack buffer.
    ///
    /// Arcs 1 and 2 fold into a single subidentifier of
    /// `40 * arc1 + arc2`; every subidentifier then becomes base-128
    /// digits, high bit set on all but the last. The fold is computed in
    /// u64, so an OID that fails [`validate()`](Self::validate) still
    /// encodes deterministically rather than wrapping; it just will not
    /// survive a round-trip.
    pub fn to_ber_smallvec(&self) -> SmallVec<[u8; 64]> {
        let mut bytes = SmallVec::new();

        if self.arcs.is_empty() {
            return bytes;
        }

        let first_subid = if self.arcs.len() >= 2 {
            u64::from(self.arcs[0]) * 40 + u64::from(self.arcs[1])
        } else {
            u64::from(self.arcs[0]) * 40
        };
        encode_subidentifier(&mut bytes, first_subid);

        for &arc in self.arcs.iter().skip(2) {
            encode_subidentifier(&mut bytes, u64::from(arc));
        }

        bytes
    }

    /// Encode the BER body into a `Vec<u8>`.
    pub fn to_ber(&self) -> Vec<u8> {
        self.to_ber_smallvec().to_vec()
    }

    /// Validate, then encode the BER body.
    pub fn to_ber_checked(&self) -> Result<Vec<u8>> {
        self.validate()?;
        Ok(self.to_ber())
    }

    /// Decode a BER body (no tag or length) into an OID.
    ///
    /// `MalformedOid` covers every way a body can go wrong: nothing at
    /// all, a final byte still carrying the continuation bit, an arc
    /// wider than u32, or more than [`MAX_OID_LEN`] arcs.
    pub fn from_ber(data: &[u8]) -> Result<Self> {
        if data.is_empty() {
            tracing::debug!(target: "snmp_ber", "empty OID body");
            return Err(Error::decode(0, DecodeErrorKind::MalformedOid));
        }

        let mut arcs = SmallVec::new();

        // Unfold the combined first subidentifier into arcs 1 and 2;
        // it can span several bytes when arc1 is 2 and arc2 is large
        let (first_subid, consumed) = decode_subidentifier(data, 0)?;

        if first_subid < 40 {
            arcs.push(0);
            arcs.push(first_subid);
        } else if first_subid < 80 {
            arcs.push(1);
            arcs.push(first_subid - 40);
        } else {
            arcs.push(2);
            arcs.push(first_subid - 80);
        }

        let mut i = consumed;
        while i < data.len() {
            let (arc, bytes_consumed) = decode_subidentifier(&data[i..], i)?;
            arcs.push(arc);
            i += bytes_consumed;

            // RFC 2578 Section 3.5 arc-count bound
            if arcs.len() > MAX_OID_LEN {
                tracing::debug!(target: "snmp_ber", count = arcs.len(), "OID exceeds arc limit");
                return Err(Error::decode(i, DecodeErrorKind::MalformedOid));
            }
        }

        Ok(Self { arcs })
    }

    /// Exact size of the full TLV encoding, computed without encoding.
    pub fn ber_encoded_len(&self) -> usize {
        let content: usize = if self.arcs.is_empty() {
            0
        } else {
            let first_subid = if self.arcs.len() >= 2 {
                u64::from(self.arcs[0]) * 40 + u64::from(self.arcs[1])
            } else {
                u64::from(self.arcs[0]) * 40
            };
            subid_encoded_len(first_subid)
                + self
                    .arcs
                    .iter()
                    .skip(2)
                    .map(|&a| subid_encoded_len(u64::from(a)))
                    .sum::<usize>()
        };
        1 + length_encoded_len(content) + content
    }
}

/// How many base-128 digits a subidentifier needs.
#[inline]
fn subid_encoded_len(value: u64) -> usize {
    if value == 0 {
        return 1;
    }
    let mut temp = value;
    let mut count = 0;
    while temp > 0 {
        count += 1;
        temp >>= 7;
    }
    count
}

/// Emit one subidentifier as base-128 digits, most-significant first.
///
/// The zero arc is the single byte 0x00.
#[inline]
fn encode_subidentifier(bytes: &mut SmallVec<[u8; 64]>, value: u64) {
    if value == 0 {
        bytes.push(0);
        return;
    }

    let count = subid_encoded_len(value);

    for i in (0..count).rev() {
        let mut byte = ((value >> (i * 7)) & 0x7F) as u8;
        if i > 0 {
            byte |= 0x80;
        }
        bytes.push(byte);
    }
}

/// Read one subidentifier, returning `(value, bytes_consumed)`.
fn decode_subidentifier(data: &[u8], base_offset: usize) -> Result<(u32, usize)> {
    let mut value: u32 = 0;
    let mut i = 0;

    loop {
        if i >= data.len() {
            tracing::debug!(target: "snmp_ber", offset = base_offset + i, "OID ends mid-continuation");
            return Err(Error::decode(base_offset + i, DecodeErrorKind::MalformedOid));
        }

        let byte = data[i];
        i += 1;

        // Another 7-bit shift would push set bits off the top of u32
        if value > (u32::MAX >> 7) {
            tracing::debug!(target: "snmp_ber", offset = base_offset + i, "OID arc overflows u32");
            return Err(Error::decode(base_offset + i, DecodeErrorKind::MalformedOid));
        }

        value = (value << 7) | ((byte & 0x7F) as u32);

        if byte & 0x80 == 0 {
            break;
        }
    }

    Ok((value, i))
}

impl fmt::Debug for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Oid({self})")
    }
}

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for arc in &self.arcs {
            if !first {
                write!(f, ".")?;
            }
            write!(f, "{arc}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::str::FromStr for Oid {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<&[u32]> for Oid {
    fn from(arcs: &[u32]) -> Self {
        Self::from_slice(arcs)
    }
}

impl<const N: usize> From<[u32; N]> for Oid {
    fn from(arcs: [u32; N]) -> Self {
        Self::new(arcs)
    }
}

impl PartialOrd for Oid {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Oid {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.arcs.cmp(&other.arcs)
    }
}

/// Build an [`Oid`] from arc literals.
///
/// Skips the dotted-string detour entirely, so OID constants cost one
/// `SmallVec` copy and nothing else.
///
/// # Examples
///
/// ```
/// use snmp_ber::oid;
///
/// let sys_contact = oid!(1, 3, 6, 1, 2, 1, 1, 4, 0);
/// assert_eq!(sys_contact.to_string(), "1.3.6.1.2.1.1.4.0");
/// ```
#[macro_export]
macro_rules! oid {
    ($($arc:expr),* $(,)?) => {
        $crate::oid::Oid::from_slice(&[$($arc),*])
    };
}
