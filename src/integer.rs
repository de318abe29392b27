//! Unpacking of BER INTEGER-family values into fixed-width integers.
//!
//! INTEGER, Integer32, Unsigned32, Counter32, Counter64, Gauge32 and TimeTicks all
//! encode their value as the minimal big-endian byte sequence; signed types in two's
//! complement.

use core::mem::size_of;
use crate::{ErrorKind, Result, Tlv};

/// Sign bit of the most significant content byte.
const SIGN_BIT: u8 = 0x80;

/// Fixed-width integer which BER integer contents can be unpacked into.
pub trait Integer: Copy + Sized {
    /// Whether content is sign-extended (vs zero-extended) to the full width.
    const SIGNED: bool;

    /// Keep the low `size_of::<Self>()` bytes of `raw`.
    fn truncate_from(raw: u64) -> Self;

    /// Unpack big-endian content bytes.
    ///
    /// Empty content is `0`. More bytes than the width of `Self` is
    /// [`ErrorKind::Overflow`], whatever their value.
    fn from_be_slice(bytes: &[u8]) -> Result<Self> {
        if bytes.len() > size_of::<Self>() {
            return Err(ErrorKind::Overflow.into());
        }

        let negative = Self::SIGNED && matches!(bytes.first(), Some(byte) if byte & SIGN_BIT != 0);
        let extension = if negative { u64::MAX } else { 0 };

        let raw = bytes
            .iter()
            .fold(extension, |raw, byte| (raw << 8) | u64::from(*byte));
        Ok(Self::truncate_from(raw))
    }
}

macro_rules! impl_integer {
    ($($int:ty => $signed:expr),* $(,)?) => {
        $(
            impl Integer for $int {
                const SIGNED: bool = $signed;

                fn truncate_from(raw: u64) -> Self {
                    raw as $int
                }
            }
        )*
    };
}

impl_integer! {
    i8 => true,
    i16 => true,
    i32 => true,
    i64 => true,
    u8 => false,
    u16 => false,
    u32 => false,
    u64 => false,
}

/// Unpack the value of a data object into an integer of width `T`.
///
/// Type byte and tag are not checked; any primitive value is read as integer content.
pub fn unpack<T: Integer>(tlv: &Tlv<'_>) -> Result<T> {
    T::from_be_slice(tlv.value())
}

/// Like [`unpack`], writing into a caller-provided destination.
///
/// A missing destination is [`ErrorKind::NullDestination`], and nothing is decoded.
pub fn unpack_into<T: Integer>(tlv: &Tlv<'_>, result: Option<&mut T>) -> Result<()> {
    let result = result.ok_or(ErrorKind::NullDestination)?;
    *result = unpack(tlv)?;
    Ok(())
}
