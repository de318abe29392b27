//! # berwalk
//!
//! Decoding of BER-TLV (ITU-T X.690) as used by SNMP and other ASN.1 protocols,
//! without allocations and without building a parse tree.
//!
//! ### Encoding
//! Each BER data object consists of an identifier (type byte plus optional tag number
//! octets), a length field and a value field.
//! - The type byte packs the class (bits 8-7), the constructed flag (bit 6) and the
//!   tag number (bits 5-1). A tag number of 31 in the low bits means the number follows
//!   in base-128 octets, bit 8 set on all but the last.
//! - The length field is either a single byte below 0x80, or 0x80 | N followed by N
//!   big-endian length bytes. The indefinite form (0x80) is not supported.
//! - The value of a constructed data object is itself a sequence of data objects.
//!
//! ## Walking
//! [`walk`] visits every primitive data object of a buffer in encoded order,
//! descending into constructed ones. The [`Visitor`] decides whether to continue via
//! [`core::ops::ControlFlow`]; a break value is handed back unmodified and is never
//! confused with a decoding [`Error`].
//!
//! ```
//! use core::ops::ControlFlow;
//!
//! // SEQUENCE { INTEGER 5, OCTET STRING "hi" }
//! let bytes = [0x30, 0x07, 0x02, 0x01, 0x05, 0x04, 0x02, b'h', b'i'];
//! let mut seen = 0;
//! let flow = berwalk::walk(&bytes, |_tlv: berwalk::Tlv<'_>| {
//!     seen += 1;
//!     ControlFlow::<()>::Continue(())
//! }).unwrap();
//! assert_eq!(flow, ControlFlow::Continue(bytes.len()));
//! assert_eq!(seen, 2);
//! ```
//!
//! ## Values
//! The [`values`] functions decode the first primitive data object of a buffer and
//! reinterpret it as an octet string, an IP address, an OBJECT IDENTIFIER or a 64-bit
//! integer. Integers of other widths go through [`unpack`].
//!
//! ## Origin
//! This library is a remix of `flexiber`, itself derived from `RustCrypto/utils/der`,
//! with a view towards:
//! - streaming decoding via a visitor instead of typed messages
//! - SNMP-style value types (Counter32, IpAddress, ...) on top of the raw byte slices

#![no_std]
#![forbid(unsafe_code)]
// #![warn(missing_docs, rust_2018_idioms)]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

delog::generate_macros!();

mod address;
mod decoder;
mod error;
mod header;
mod integer;
mod length;
mod oid;
mod tag;
mod tlv;
mod traits;
pub mod values;
mod walk;

pub use address::{Ipv4Address, Ipv6Address};
pub use decoder::Decoder;
pub use error::{Error, ErrorKind, Result};
pub(crate) use header::Header;
pub use integer::{unpack, unpack_into, Integer};
pub use length::Length;
pub use oid::{Arcs, ObjectIdentifier};
pub use tag::{Class, Tag};
pub use tlv::{Tlv, Tlvs};
pub use traits::Decodable;
pub use values::{decode_ip4, decode_ip6, decode_oid, decode_s64, decode_str, decode_u64};
#[cfg(feature = "alloc")]
pub use walk::collect;
pub use walk::{walk, Visitor, Walker, DEFAULT_MAX_DEPTH};
