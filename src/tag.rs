use core::{convert::TryFrom, fmt};
use crate::{Decodable, Decoder, Error, ErrorKind, Result};

const CLASS_OFFSET: usize = 6;
const CONSTRUCTED_OFFSET: usize = 5;

/// Indicator bit for constructed form encoding (i.e. vs primitive form)
pub(crate) const CONSTRUCTED_FLAG: u8 = 1u8 << CONSTRUCTED_OFFSET;

/// Low five bits of the type byte all set: the tag number follows in subsequent octets
const LONG_TAG_NUMBER: u8 = 0x1F;

/// Continuation bit of base-128 tag number octets (and OID subidentifiers)
pub(crate) const NOT_LAST_OCTET_FLAG: u8 = 1u8 << 7;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[repr(u8)]
/// Class of BER tag.
pub enum Class {
    Universal = 0b00,
    Application = 0b01,
    Context = 0b10,
    Private = 0b11,
}

impl Class {
    /// Class from the two top bits of a type byte.
    pub const fn from_type_byte(type_byte: u8) -> Self {
        match type_byte >> CLASS_OFFSET {
            0b00 => Class::Universal,
            0b01 => Class::Application,
            0b10 => Class::Context,
            _ => Class::Private,
        }
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Class::Universal => "UNIVERSAL",
            Class::Application => "APPLICATION",
            Class::Context => "CONTEXT",
            Class::Private => "PRIVATE",
        })
    }
}

/// BER tag: class, primitive/constructed form and tag number.
///
/// The number is canonical, i.e. independent of how many octets encoded it.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Tag {
    pub class: Class,
    pub constructed: bool,
    pub number: u64,
}

impl Tag {
    pub const BOOLEAN: Self = Self::universal(0x1);
    pub const INTEGER: Self = Self::universal(0x2);
    pub const BIT_STRING: Self = Self::universal(0x3);
    pub const OCTET_STRING: Self = Self::universal(0x4);
    pub const NULL: Self = Self::universal(0x5);
    pub const OBJECT_IDENTIFIER: Self = Self::universal(0x6);
    pub const UTF8_STRING: Self = Self::universal(0xC);
    pub const SEQUENCE: Self = Self::universal(0x10).constructed();
    pub const SET: Self = Self::universal(0x11).constructed();

    // SNMPv2-SMI application types (RFC 2578)
    pub const IP_ADDRESS: Self = Self::application(0x0);
    pub const COUNTER32: Self = Self::application(0x1);
    pub const GAUGE32: Self = Self::application(0x2);
    pub const UNSIGNED32: Self = Self::GAUGE32;
    pub const TIMETICKS: Self = Self::application(0x3);
    pub const OPAQUE: Self = Self::application(0x4);
    pub const COUNTER64: Self = Self::application(0x6);

    // SNMPv2 varbind exceptions (RFC 3416)
    pub const NO_SUCH_OBJECT: Self = Self::context(0x0);
    pub const NO_SUCH_INSTANCE: Self = Self::context(0x1);
    pub const END_OF_MIB_VIEW: Self = Self::context(0x2);

    pub const fn from(class: Class, constructed: bool, number: u64) -> Self {
        Self { class, constructed, number }
    }

    pub const fn universal(number: u64) -> Self {
        Self { class: Class::Universal, constructed: false, number }
    }

    pub const fn application(number: u64) -> Self {
        Self { class: Class::Application, constructed: false, number }
    }

    pub const fn context(number: u64) -> Self {
        Self { class: Class::Context, constructed: false, number }
    }

    pub const fn private(number: u64) -> Self {
        Self { class: Class::Private, constructed: false, number }
    }

    pub const fn constructed(self) -> Self {
        let Self { class, constructed: _, number } = self;
        Self { class, constructed: true, number }
    }

    /// Type byte of the shortest encoding of this tag.
    pub const fn type_byte(&self) -> u8 {
        let low = if self.number < LONG_TAG_NUMBER as u64 {
            self.number as u8
        } else {
            LONG_TAG_NUMBER
        };
        ((self.class as u8) << CLASS_OFFSET) | ((self.constructed as u8) << CONSTRUCTED_OFFSET) | low
    }

    /// Decode a tag, also returning the type byte exactly as encoded.
    pub(crate) fn decode_with_type_byte(decoder: &mut Decoder<'_>) -> Result<(u8, Self)> {
        let type_byte = decoder.byte()?;
        let class = Class::from_type_byte(type_byte);
        let constructed = type_byte & CONSTRUCTED_FLAG != 0;
        // remove class and primitive/constructed bits
        let number = match type_byte & LONG_TAG_NUMBER {
            LONG_TAG_NUMBER => {
                let mut number = 0u64;
                loop {
                    let byte = decoder.byte()?;
                    if number > u64::MAX >> 7 {
                        return decoder.error(ErrorKind::TagOverflow);
                    }
                    number = (number << 7) | u64::from(byte & !NOT_LAST_OCTET_FLAG);
                    if byte & NOT_LAST_OCTET_FLAG == 0 {
                        break number;
                    }
                }
            }
            number => number.into(),
        };
        Ok((type_byte, Self { class, constructed, number }))
    }
}

impl TryFrom<&'_ [u8]> for Tag {
    type Error = Error;
    fn try_from(encoding: &[u8]) -> Result<Self> {
        Self::from_bytes(encoding)
    }
}

impl TryFrom<u8> for Tag {
    type Error = Error;
    fn try_from(type_byte: u8) -> Result<Self> {
        Self::from_bytes(&[type_byte])
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} {}]", self.class, self.number)?;
        if self.constructed {
            f.write_str(" constructed")?;
        }
        Ok(())
    }
}

impl Decodable<'_> for Tag {
    fn decode(decoder: &mut Decoder<'_>) -> Result<Self> {
        Self::decode_with_type_byte(decoder).map(|(_, tag)| tag)
    }
}

#[cfg(test)]
mod tests {
    use core::convert::TryFrom;
    use crate::{Class, Decodable, ErrorKind, Tag};

    #[test]
    fn single_byte() {
        assert_eq!(Tag::try_from(0x02u8).unwrap(), Tag::INTEGER);
        assert_eq!(Tag::try_from(0x30u8).unwrap(), Tag::SEQUENCE);
        assert_eq!(Tag::try_from(0x41u8).unwrap(), Tag::COUNTER32);
        assert_eq!(Tag::try_from(0x46u8).unwrap(), Tag::COUNTER64);
        assert_eq!(Tag::try_from(0x80u8).unwrap(), Tag::NO_SUCH_OBJECT);
        assert_eq!(
            Tag::try_from(0xA2u8).unwrap(),
            Tag::from(Class::Context, true, 2)
        );
        assert_eq!(Tag::try_from(0xDEu8).unwrap(), Tag::private(30));
    }

    #[test]
    fn multi_byte() {
        assert_eq!(Tag::from_bytes(&[0x1F, 0x1F]).unwrap(), Tag::universal(31));
        assert_eq!(Tag::from_bytes(&[0x1F, 0x81, 0x2A]).unwrap(), Tag::universal(0xAA));
        assert_eq!(
            Tag::from_bytes(&[0x7F, 0x81, 0x80, 0x00]).unwrap(),
            Tag::application(0x4000).constructed()
        );

        // non-minimal encodings resolve to the same number
        assert_eq!(Tag::from_bytes(&[0x1F, 0x80, 0x1F]).unwrap(), Tag::universal(31));
        assert_eq!(Tag::from_bytes(&[0x1F, 0x05]).unwrap(), Tag::universal(5));

        let max = [0x1Fu8, 0x81, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x7F];
        assert_eq!(Tag::from_bytes(&max).unwrap(), Tag::universal(u64::MAX));
    }

    #[test]
    fn multi_byte_errors() {
        assert_eq!(Tag::from_bytes(&[0x1F]).unwrap_err().kind(), ErrorKind::Truncated);
        assert_eq!(Tag::from_bytes(&[0x1F, 0x81]).unwrap_err().kind(), ErrorKind::Truncated);

        let too_big = [0x1Fu8, 0x82, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x00];
        assert_eq!(Tag::from_bytes(&too_big).unwrap_err().kind(), ErrorKind::TagOverflow);
    }

    #[test]
    fn type_byte() {
        assert_eq!(Tag::SEQUENCE.type_byte(), 0x30);
        assert_eq!(Tag::IP_ADDRESS.type_byte(), 0x40);
        assert_eq!(Tag::context(3).constructed().type_byte(), 0xA3);
        assert_eq!(Tag::application(0xAA).type_byte(), 0x5F);
    }
}
