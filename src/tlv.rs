//! Borrowed BER data objects.

use crate::{Decodable, Decoder, Header, Length, Result, Tag};
use core::convert::TryFrom;

/// One decoded BER data object, borrowing its value from the input buffer.
///
/// This is what a [`Visitor`](crate::Visitor) receives for every primitive
/// element of a walk.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Tlv<'a> {
    type_byte: u8,
    tag: Tag,
    value: &'a [u8],
}

impl<'a> Tlv<'a> {
    pub(crate) fn new(type_byte: u8, tag: Tag, value: &'a [u8]) -> Self {
        Self { type_byte, tag, value }
    }

    /// First identifier octet, as encoded.
    pub fn type_byte(&self) -> u8 {
        self.type_byte
    }

    pub fn tag(&self) -> Tag {
        self.tag
    }

    /// Borrow the value bytes.
    pub fn value(&self) -> &'a [u8] {
        self.value
    }

    /// Get the length of the value.
    pub fn length(&self) -> Length {
        // values are sliced out by a `Length`, so this cannot truncate
        Length::try_from(self.value.len()).unwrap_or_default()
    }

    /// Is the value empty?
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn is_constructed(&self) -> bool {
        self.tag.constructed
    }

    /// Iterate over the data objects contained in the value.
    ///
    /// Only meaningful for constructed data objects.
    pub fn children(&self) -> Tlvs<'a> {
        Tlvs::new(self.value)
    }
}

impl<'a> Decodable<'a> for Tlv<'a> {
    fn decode(decoder: &mut Decoder<'a>) -> Result<Tlv<'a>> {
        let header = Header::decode(decoder)?;
        let value = decoder.bytes(header.length)?;
        Ok(Self::new(header.type_byte, header.tag, value))
    }
}

impl AsRef<[u8]> for Tlv<'_> {
    fn as_ref(&self) -> &[u8] {
        self.value
    }
}

/// Lazy iterator over the sibling data objects of one level.
///
/// Constructed data objects are yielded as a whole, see [`Tlv::children`].
/// After the first error the iterator is exhausted.
#[derive(Clone, Debug)]
pub struct Tlvs<'a> {
    decoder: Decoder<'a>,
}

impl<'a> Tlvs<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { decoder: Decoder::new(bytes) }
    }
}

impl<'a> Iterator for Tlvs<'a> {
    type Item = Result<Tlv<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.decoder.is_failed() || self.decoder.is_finished() {
            return None;
        }
        Some(self.decoder.decode())
    }
}

impl core::iter::FusedIterator for Tlvs<'_> {}
