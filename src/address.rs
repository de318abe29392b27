//! IP address values (SNMP `IpAddress`, and IPv6 carried as 16 octets).

use core::{convert::{TryFrom, TryInto}, fmt};
use crate::{Error, ErrorKind, Length, Result, Tlv};

fn fixed<const N: usize>(bytes: &[u8]) -> Result<[u8; N]> {
    bytes.try_into().map_err(|_| {
        ErrorKind::UnexpectedLength {
            expected: Length::try_from(N).unwrap_or_default(),
            actual: Length::try_from(bytes.len()).unwrap_or_default(),
        }
        .into()
    })
}

/// IPv4 address from exactly four value octets. Displays as dotted decimal.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Ipv4Address([u8; 4]);

impl Ipv4Address {
    pub const fn new(octets: [u8; 4]) -> Self {
        Self(octets)
    }

    pub const fn octets(&self) -> [u8; 4] {
        self.0
    }
}

impl TryFrom<&[u8]> for Ipv4Address {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        fixed(bytes).map(Self)
    }
}

impl TryFrom<Tlv<'_>> for Ipv4Address {
    type Error = Error;

    fn try_from(tlv: Tlv<'_>) -> Result<Self> {
        Self::try_from(tlv.value())
    }
}

impl fmt::Display for Ipv4Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.0;
        write!(f, "{}.{}.{}.{}", a, b, c, d)
    }
}

#[cfg(feature = "std")]
impl From<Ipv4Address> for std::net::Ipv4Addr {
    fn from(address: Ipv4Address) -> Self {
        address.0.into()
    }
}

/// IPv6 address from exactly sixteen value octets.
///
/// Displays as eight colon-separated lowercase hextets without zero compression,
/// e.g. `fe80:0:0:0:0:0:0:1`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Ipv6Address([u8; 16]);

impl Ipv6Address {
    pub const fn new(octets: [u8; 16]) -> Self {
        Self(octets)
    }

    pub const fn octets(&self) -> [u8; 16] {
        self.0
    }

    /// The eight 16-bit groups, most significant first.
    pub fn segments(&self) -> [u16; 8] {
        let mut segments = [0u16; 8];
        for (segment, pair) in segments.iter_mut().zip(self.0.chunks_exact(2)) {
            *segment = u16::from_be_bytes([pair[0], pair[1]]);
        }
        segments
    }
}

impl TryFrom<&[u8]> for Ipv6Address {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        fixed(bytes).map(Self)
    }
}

impl TryFrom<Tlv<'_>> for Ipv6Address {
    type Error = Error;

    fn try_from(tlv: Tlv<'_>) -> Result<Self> {
        Self::try_from(tlv.value())
    }
}

impl fmt::Display for Ipv6Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments().iter().enumerate() {
            if i > 0 {
                f.write_str(":")?;
            }
            write!(f, "{:x}", segment)?;
        }
        Ok(())
    }
}

#[cfg(feature = "std")]
impl From<Ipv6Address> for std::net::Ipv6Addr {
    fn from(address: Ipv6Address) -> Self {
        address.0.into()
    }
}
