//! Recursive traversal of BER buffers.

use core::ops::ControlFlow;
use crate::{Decoder, ErrorKind, Header, Result, Tlv};

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

/// Nesting limit of [`Walker::new`] and [`walk`].
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Visits primitive data objects. Return [`ControlFlow::Break`] to stop the walk.
///
/// Implemented for every `FnMut(Tlv<'a>) -> ControlFlow<B>`.
pub trait Visitor<'a> {
    /// Value handed back to the caller of the walk on early termination
    type Break;

    fn visit(&mut self, tlv: Tlv<'a>) -> ControlFlow<Self::Break>;
}

impl<'a, B, F> Visitor<'a> for F
where
    F: FnMut(Tlv<'a>) -> ControlFlow<B>,
{
    type Break = B;

    fn visit(&mut self, tlv: Tlv<'a>) -> ControlFlow<B> {
        self(tlv)
    }
}

/// Walks BER buffers with configurable limits.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Walker {
    max_depth: usize,
}

impl Default for Walker {
    fn default() -> Self {
        Self::new()
    }
}

impl Walker {
    pub const fn new() -> Self {
        Self { max_depth: DEFAULT_MAX_DEPTH }
    }

    /// Limit how many constructed data objects may enclose a visited one.
    ///
    /// With a limit of `0` only top-level primitive data objects are accepted.
    pub const fn with_max_depth(self, max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Visit every primitive data object in `bytes`, in encoded order, descending
    /// into constructed data objects before moving on to their next sibling.
    ///
    /// Returns `Continue` with the number of bytes consumed if the whole buffer was
    /// walked, or `Break` with the visitor's own value if it stopped the walk.
    /// An empty buffer holds no data objects and is walked successfully.
    pub fn walk<'a, V>(&self, bytes: &'a [u8], mut visitor: V) -> Result<ControlFlow<V::Break, usize>>
    where
        V: Visitor<'a>,
    {
        match self.walk_level(bytes, &mut visitor, 0)? {
            ControlFlow::Continue(()) => Ok(ControlFlow::Continue(bytes.len())),
            ControlFlow::Break(value) => Ok(ControlFlow::Break(value)),
        }
    }

    fn walk_level<'a, V>(&self, bytes: &'a [u8], visitor: &mut V, depth: usize) -> Result<ControlFlow<V::Break>>
    where
        V: Visitor<'a>,
    {
        let mut decoder = Decoder::new(bytes);

        while !decoder.is_finished() {
            let header: Header = decoder.decode()?;
            let value_position = decoder.position();
            let value = decoder.bytes(header.length)?;

            if header.tag.constructed {
                if depth >= self.max_depth {
                    debug!("nesting limit {} reached at {}", self.max_depth, value_position);
                    return decoder.error(ErrorKind::NestingTooDeep { max: self.max_depth });
                }
                let flow = self
                    .walk_level(value, visitor, depth + 1)
                    .map_err(|e| e.nested(value_position))?;
                if flow.is_break() {
                    return Ok(flow);
                }
            } else if let ControlFlow::Break(stop) = visitor.visit(Tlv::new(header.type_byte, header.tag, value)) {
                return Ok(ControlFlow::Break(stop));
            }
        }

        Ok(ControlFlow::Continue(()))
    }
}

/// [`Walker::walk`] with the default limits.
///
/// ```
/// use core::ops::ControlFlow;
/// use berwalk::{walk, Tag, Tlv};
///
/// // SEQUENCE { Counter32 7, Gauge32 9 }
/// let bytes = [0x30, 0x06, 0x41, 0x01, 0x07, 0x42, 0x01, 0x09];
/// let flow = walk(&bytes, |tlv: Tlv<'_>| {
///     if tlv.tag() == Tag::GAUGE32 {
///         ControlFlow::Break(tlv.value()[0])
///     } else {
///         ControlFlow::Continue(())
///     }
/// });
/// assert_eq!(flow, Ok(ControlFlow::Break(9)));
/// ```
pub fn walk<'a, V>(bytes: &'a [u8], visitor: V) -> Result<ControlFlow<V::Break, usize>>
where
    V: Visitor<'a>,
{
    Walker::new().walk(bytes, visitor)
}

/// Collect all primitive data objects of `bytes`, in walk order.
#[cfg(feature = "alloc")]
#[cfg_attr(docsrs, doc(cfg(feature = "alloc")))]
pub fn collect<'a>(bytes: &'a [u8]) -> Result<Vec<Tlv<'a>>> {
    let mut tlvs = Vec::new();
    match walk(bytes, |tlv: Tlv<'a>| {
        tlvs.push(tlv);
        ControlFlow::<core::convert::Infallible>::Continue(())
    })? {
        ControlFlow::Continue(_) => Ok(tlvs),
        ControlFlow::Break(never) => match never {},
    }
}

#[cfg(test)]
mod tests {
    use core::ops::ControlFlow;
    use super::Walker;
    use crate::{walk, ErrorKind, Length, Tag, Tlv};
    use hex_literal::hex;

    #[test]
    fn empty() {
        let flow = walk(&[], |_: Tlv<'_>| ControlFlow::Break(()));
        assert_eq!(flow, Ok(ControlFlow::Continue(0)));
    }

    #[test]
    fn nested_in_order() {
        // SEQUENCE { INTEGER 1, OCTET STRING "x" }, NULL
        let bytes = hex!("30 06 02 01 01 04 01 78 05 00");
        let mut seen = [0u8; 3];
        let mut count = 0;
        let flow = walk(&bytes, |tlv: Tlv<'_>| {
            seen[count] = tlv.type_byte();
            count += 1;
            ControlFlow::<()>::Continue(())
        });
        assert_eq!(flow, Ok(ControlFlow::Continue(bytes.len())));
        assert_eq!(count, 3);
        assert_eq!(seen, [0x02, 0x04, 0x05]);
    }

    #[test]
    fn break_stops_walk() {
        let bytes = hex!("30 06 02 01 01 02 01 02 02 01 03");
        let mut count = 0;
        let flow = walk(&bytes, |tlv: Tlv<'_>| {
            count += 1;
            if tlv.value() == [1] {
                ControlFlow::Break(-7)
            } else {
                ControlFlow::Continue(())
            }
        });
        assert_eq!(flow, Ok(ControlFlow::Break(-7)));
        assert_eq!(count, 1);
    }

    #[test]
    fn break_skips_malformed_remainder() {
        // the visitor stops before the truncated second element is reached
        let bytes = hex!("02 01 01 02 09");
        let flow = walk(&bytes, |_: Tlv<'_>| ControlFlow::Break(()));
        assert_eq!(flow, Ok(ControlFlow::Break(())));
    }

    #[test]
    fn nested_error_position() {
        // SEQUENCE { SEQUENCE { INTEGER with 3 of 2 bytes } }
        let bytes = hex!("30 06 30 04 02 03 01 02");
        let err = walk(&bytes, |_: Tlv<'_>| ControlFlow::<()>::Continue(())).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Truncated);
        assert_eq!(err.position(), Some(Length::from(6u8)));
    }

    #[test]
    fn depth_limit() {
        let bytes = hex!("30 04 30 02 05 00");

        let walker = Walker::new().with_max_depth(2);
        assert!(walker.walk(&bytes, |_: Tlv<'_>| ControlFlow::<()>::Continue(())).is_ok());

        let walker = Walker::new().with_max_depth(1);
        let err = walker.walk(&bytes, |_: Tlv<'_>| ControlFlow::<()>::Continue(())).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NestingTooDeep { max: 1 });
        assert_eq!(err.position(), Some(Length::from(6u8)));

        let walker = Walker::new().with_max_depth(0);
        let err = walker.walk(&bytes, |_: Tlv<'_>| ControlFlow::<()>::Continue(())).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NestingTooDeep { max: 0 });
        assert!(walker.walk(&hex!("05 00"), |_: Tlv<'_>| ControlFlow::<()>::Continue(())).is_ok());
    }

    #[test]
    fn constructed_class_independent() {
        // [APPLICATION 1] constructed and [CONTEXT 2] primitive
        let bytes = hex!("61 03 82 01 2A");
        let mut tags = [None; 2];
        let mut count = 0;
        let flow = walk(&bytes, |tlv: Tlv<'_>| {
            tags[count] = Some(tlv.tag());
            count += 1;
            ControlFlow::<()>::Continue(())
        });
        assert_eq!(flow, Ok(ControlFlow::Continue(bytes.len())));
        assert_eq!(count, 1);
        assert_eq!(tags[0], Some(Tag::context(2)));
    }

    #[test]
    fn indefinite_length_rejected() {
        let bytes = hex!("30 80 02 01 01 00 00");
        let err = walk(&bytes, |_: Tlv<'_>| ControlFlow::<()>::Continue(())).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IndefiniteLength);
        assert_eq!(err.code(), -4);
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn collect() {
        let bytes = hex!("30 06 02 01 01 04 01 78 05 00");
        let tlvs = super::collect(&bytes).unwrap();
        assert_eq!(tlvs.len(), 3);
        assert_eq!(tlvs[1].value(), b"x");
    }
}
