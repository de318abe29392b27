//! OBJECT IDENTIFIER values.

use core::{convert::TryFrom, fmt};
use crate::{tag::NOT_LAST_OCTET_FLAG, Error, ErrorKind, Result, Tlv};

/// Borrowed, validated BER encoding of an OBJECT IDENTIFIER.
///
/// The first subidentifier packs the first two arcs as `40 * X + Y`, every further
/// subidentifier is one arc in base 128, bit 8 set on all octets but the last.
/// Displays as dotted decimal, e.g. `1.3.6.1.2.1`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ObjectIdentifier<'a> {
    bytes: &'a [u8],
}

impl<'a> ObjectIdentifier<'a> {
    /// Validate content octets: non-empty, no arc cut short, every arc within `u64`.
    pub fn new(bytes: &'a [u8]) -> Result<Self> {
        if bytes.is_empty() {
            return Err(ErrorKind::MalformedOid.into());
        }
        let mut rest = bytes;
        while !rest.is_empty() {
            rest = subidentifier(rest)?.1;
        }
        Ok(Self { bytes })
    }

    /// Borrow the content octets.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    pub fn arcs(&self) -> Arcs<'a> {
        Arcs { bytes: self.bytes, pending: None, started: false }
    }

    /// Is `prefix` a leading sequence of arcs of this OID (or equal to it)?
    pub fn starts_with(&self, prefix: &[u64]) -> bool {
        let mut arcs = self.arcs();
        prefix.iter().all(|arc| arcs.next() == Some(*arc))
    }
}

impl<'a> TryFrom<Tlv<'a>> for ObjectIdentifier<'a> {
    type Error = Error;

    fn try_from(tlv: Tlv<'a>) -> Result<Self> {
        Self::new(tlv.value())
    }
}

impl PartialEq<[u64]> for ObjectIdentifier<'_> {
    fn eq(&self, other: &[u64]) -> bool {
        self.arcs().eq(other.iter().copied())
    }
}

impl<const N: usize> PartialEq<[u64; N]> for ObjectIdentifier<'_> {
    fn eq(&self, other: &[u64; N]) -> bool {
        *self == other[..]
    }
}

impl fmt::Display for ObjectIdentifier<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, arc) in self.arcs().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", arc)?;
        }
        Ok(())
    }
}

/// Iterator over the arcs of an [`ObjectIdentifier`].
#[derive(Clone, Debug)]
pub struct Arcs<'a> {
    bytes: &'a [u8],
    /// second arc, split off the first subidentifier
    pending: Option<u64>,
    started: bool,
}

impl Iterator for Arcs<'_> {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        if let Some(arc) = self.pending.take() {
            return Some(arc);
        }
        // content was validated on construction
        let (subid, rest) = subidentifier(self.bytes).ok()?;
        self.bytes = rest;

        if self.started {
            return Some(subid);
        }
        self.started = true;
        let (first, second) = match subid {
            0..=39 => (0, subid),
            40..=79 => (1, subid - 40),
            _ => (2, subid - 80),
        };
        self.pending = Some(second);
        Some(first)
    }
}

impl core::iter::FusedIterator for Arcs<'_> {}

/// Split one base-128 subidentifier off the front of `bytes`.
fn subidentifier(bytes: &[u8]) -> Result<(u64, &[u8])> {
    let mut value = 0u64;
    for (i, byte) in bytes.iter().enumerate() {
        if value > u64::MAX >> 7 {
            return Err(ErrorKind::MalformedOid.into());
        }
        value = (value << 7) | u64::from(byte & !NOT_LAST_OCTET_FLAG);
        if byte & NOT_LAST_OCTET_FLAG == 0 {
            return Ok((value, &bytes[i + 1..]));
        }
    }
    Err(ErrorKind::MalformedOid.into())
}
