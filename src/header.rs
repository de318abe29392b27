//! BER-TLV headers.

use crate::{Decodable, Decoder, Length, Result, Tag};

/// BER-TLV headers: identifier + length component of TLV-encoded values
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Header {
    /// First identifier octet, exactly as encoded
    pub type_byte: u8,

    /// Tag representing the type of the encoded value
    pub tag: Tag,

    /// Length of the encoded value
    pub length: Length,
}

impl Decodable<'_> for Header {
    fn decode(decoder: &mut Decoder<'_>) -> Result<Header> {
        let (type_byte, tag) = Tag::decode_with_type_byte(decoder)?;
        let length = Length::decode(decoder)?;

        trace!(
            "header type={:02x} tag={} length={} end={}",
            type_byte,
            tag.number,
            length,
            decoder.position()
        );

        Ok(Self { type_byte, tag, length })
    }
}
