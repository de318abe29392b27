//! Single-value decoders.
//!
//! Each function walks all of `bytes` and reinterprets the value of the first
//! primitive data object; type byte and tag are not checked. A buffer that fails to
//! walk fails the decoder, even past the data object used. A buffer without any
//! primitive data object is [`ErrorKind::Truncated`]. Conversion errors are
//! positioned at the start of the value.

use core::{convert::{Infallible, TryFrom}, ops::ControlFlow};
use crate::{walk, ErrorKind, Integer, Ipv4Address, Ipv6Address, Length, ObjectIdentifier, Result, Tlv};

#[cfg(feature = "heapless")]
use {core::fmt, crate::Error};

/// First primitive data object of `bytes`, descending into constructed ones.
pub fn first<'a>(bytes: &'a [u8]) -> Result<Tlv<'a>> {
    locate(bytes).map(|(tlv, _)| tlv)
}

/// First primitive data object and the offset of its value within `bytes`.
fn locate<'a>(bytes: &'a [u8]) -> Result<(Tlv<'a>, Length)> {
    let mut found = None;
    let consumed = match walk(bytes, |tlv: Tlv<'a>| {
        found.get_or_insert(tlv);
        ControlFlow::<Infallible>::Continue(())
    })? {
        ControlFlow::Continue(consumed) => consumed,
        ControlFlow::Break(never) => match never {},
    };

    match found {
        Some(tlv) => {
            // values are subslices of `bytes`
            let offset = tlv.value().as_ptr() as usize - bytes.as_ptr() as usize;
            Ok((tlv, Length::try_from(offset)?))
        }
        None => Err(ErrorKind::Truncated.at(Length::try_from(consumed)?)),
    }
}

fn convert<'a, T>(bytes: &'a [u8], f: impl FnOnce(Tlv<'a>) -> Result<T>) -> Result<T> {
    let (tlv, offset) = locate(bytes)?;
    f(tlv).map_err(|e| e.nested(offset))
}

/// Raw value octets (OCTET STRING, DisplayString, Opaque, ...), without any
/// character set validation.
pub fn decode_str(bytes: &[u8]) -> Result<&[u8]> {
    first(bytes).map(|tlv| tlv.value())
}

pub fn decode_oid(bytes: &[u8]) -> Result<ObjectIdentifier<'_>> {
    convert(bytes, ObjectIdentifier::try_from)
}

/// Exactly four value octets.
pub fn decode_ip4(bytes: &[u8]) -> Result<Ipv4Address> {
    convert(bytes, Ipv4Address::try_from)
}

/// Exactly sixteen value octets.
pub fn decode_ip6(bytes: &[u8]) -> Result<Ipv6Address> {
    convert(bytes, Ipv6Address::try_from)
}

/// Two's complement integer of at most eight octets.
pub fn decode_s64(bytes: &[u8]) -> Result<i64> {
    convert(bytes, |tlv| i64::from_be_slice(tlv.value()))
}

/// Unsigned integer (Counter64, ...) of at most eight octets.
pub fn decode_u64(bytes: &[u8]) -> Result<u64> {
    convert(bytes, |tlv| u64::from_be_slice(tlv.value()))
}

/// Render a decoded value (OID, address) into a fixed-capacity string.
///
/// A rendering longer than `N` bytes is [`ErrorKind::Overlength`].
#[cfg(feature = "heapless")]
#[cfg_attr(docsrs, doc(cfg(feature = "heapless")))]
pub fn render<const N: usize>(value: &impl fmt::Display) -> Result<heapless::String<N>> {
    use core::fmt::Write;

    let mut rendered = heapless::String::new();
    write!(rendered, "{}", value).map_err(|_| Error::from(ErrorKind::Overlength))?;
    Ok(rendered)
}
