//! Length calculations for BER-encoded values

use crate::{Decodable, Decoder, Error, ErrorKind, Result};
use core::{convert::TryFrom, fmt, ops::Add};

/// Flag on the first length octet announcing the long form.
const LONG_FORM_FLAG: u8 = 0x80;

/// BER-encoded length, also used for positions inside a message.
///
/// By definition of this crate, in the range `0..=u32::MAX`
///
/// - If bit 8 of the first byte is clear, the remaining seven bits are the length.
/// - Otherwise the remaining seven bits count the subsequent length bytes, which
///   encode the length big-endian. A count of zero is the indefinite form and is rejected.
#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct Length(u32);

impl Length {
    /// Return a length of `0`.
    pub const fn zero() -> Self {
        Length(0)
    }

    /// Get the maximum length supported by this crate
    pub const fn max() -> usize {
        u32::MAX as usize
    }

    /// Convert length to `usize`
    pub fn to_usize(self) -> usize {
        self.0 as usize
    }
}

impl Add for Length {
    type Output = Result<Self>;

    fn add(self, other: Self) -> Result<Self> {
        self.0
            .checked_add(other.0)
            .map(Length)
            .ok_or_else(|| ErrorKind::Overlength.into())
    }
}

impl Add<u8> for Length {
    type Output = Result<Self>;

    fn add(self, other: u8) -> Result<Self> {
        self + Length::from(other)
    }
}

impl Add<usize> for Length {
    type Output = Result<Self>;

    fn add(self, other: usize) -> Result<Self> {
        self + Length::try_from(other)?
    }
}

impl Add<Length> for Result<Length> {
    type Output = Self;

    fn add(self, other: Length) -> Self {
        self? + other
    }
}

impl From<u8> for Length {
    fn from(len: u8) -> Length {
        Length(len.into())
    }
}

impl From<u16> for Length {
    fn from(len: u16) -> Length {
        Length(len.into())
    }
}

impl From<u32> for Length {
    fn from(len: u32) -> Length {
        Length(len)
    }
}

impl From<Length> for u32 {
    fn from(len: Length) -> u32 {
        len.0
    }
}

impl From<Length> for usize {
    fn from(len: Length) -> usize {
        len.to_usize()
    }
}

impl TryFrom<usize> for Length {
    type Error = Error;

    fn try_from(len: usize) -> Result<Length> {
        u32::try_from(len)
            .map(Length)
            .map_err(|_| ErrorKind::Overlength.into())
    }
}

impl Decodable<'_> for Length {
    fn decode(decoder: &mut Decoder<'_>) -> Result<Length> {
        match decoder.byte()? {
            len if len & LONG_FORM_FLAG == 0 => Ok(len.into()),
            LONG_FORM_FLAG => {
                debug!("indefinite length at {}", decoder.position());
                decoder.error(ErrorKind::IndefiniteLength)
            }
            first => {
                let count = first & !LONG_FORM_FLAG;
                let be_len = decoder.bytes(count)?;
                // leading zero octets are valid BER, only the value must fit
                let mut len = 0u32;
                for byte in be_len {
                    if len > u32::MAX >> 8 {
                        return decoder.error(ErrorKind::Overlength);
                    }
                    len = (len << 8) | u32::from(*byte);
                }
                Ok(Length(len))
            }
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::Length;
    use crate::{Decodable, ErrorKind};

    #[test]
    fn decode() {
        assert_eq!(Length::zero(), Length::from_bytes(&[0x00]).unwrap());

        assert_eq!(Length::from(0x7Fu8), Length::from_bytes(&[0x7F]).unwrap());
        assert_eq!(Length::from(0x7Fu8), Length::from_bytes(&[0x81, 0x7F]).unwrap());
        assert_eq!(Length::from(0x80u8), Length::from_bytes(&[0x81, 0x80]).unwrap());
        assert_eq!(Length::from(0xFFu8), Length::from_bytes(&[0x81, 0xFF]).unwrap());

        // non-minimal encodings are valid BER
        assert_eq!(Length::from(5u8), Length::from_bytes(&[0x82, 0x00, 0x05]).unwrap());

        assert_eq!(
            Length::from(0x100u16),
            Length::from_bytes(&[0x82, 0x01, 0x00]).unwrap()
        );

        assert_eq!(
            Length::from(0x0102_0304u32),
            Length::from_bytes(&[0x84, 0x01, 0x02, 0x03, 0x04]).unwrap()
        );

        assert_eq!(
            Length::from(u32::MAX),
            Length::from_bytes(&[0x84, 0xFF, 0xFF, 0xFF, 0xFF]).unwrap()
        );

        // more than four octets, as long as the leading ones are zero
        assert_eq!(Length::from(1u8), Length::from_bytes(&[0x85, 0, 0, 0, 0, 1]).unwrap());
        assert_eq!(
            Length::from(u32::MAX),
            Length::from_bytes(&[0x88, 0, 0, 0, 0, 0xFF, 0xFF, 0xFF, 0xFF]).unwrap()
        );
    }

    #[test]
    fn decode_errors() {
        assert_eq!(Length::from_bytes(&[]).unwrap_err().kind(), ErrorKind::Truncated);
        assert_eq!(Length::from_bytes(&[0x81]).unwrap_err().kind(), ErrorKind::Truncated);
        assert_eq!(Length::from_bytes(&[0x82, 0x12]).unwrap_err().kind(), ErrorKind::Truncated);
        assert_eq!(Length::from_bytes(&[0x80]).unwrap_err().kind(), ErrorKind::IndefiniteLength);
        assert_eq!(
            Length::from_bytes(&[0x85, 1, 0, 0, 0, 0]).unwrap_err().kind(),
            ErrorKind::Overlength
        );
        assert_eq!(
            Length::from_bytes(&[0x85, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]).unwrap_err().kind(),
            ErrorKind::Overlength
        );
        assert!(matches!(
            Length::from_bytes(&[0x05, 0x00]).unwrap_err().kind(),
            ErrorKind::TrailingData { .. }
        ));
    }

    #[test]
    fn add() {
        assert_eq!((Length::from(3u8) + Length::from(4u8)).unwrap(), Length::from(7u8));
        assert_eq!(
            (Length::from(u32::MAX) + 1u8).unwrap_err().kind(),
            ErrorKind::Overlength
        );
    }
}
