//! Error types.

use crate::Length;
use core::{convert::Infallible, fmt};

/// Result type.
pub type Result<T> = core::result::Result<T, Error>;

/// Error type
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Error {
    /// Kind of error
    kind: ErrorKind,

    /// Position inside of message where error occurred
    position: Option<Length>,
}

impl Error {
    /// Create a new [`Error`]
    pub fn new(kind: ErrorKind, position: Length) -> Error {
        Error {
            kind,
            position: Some(position),
        }
    }

    /// Get the [`ErrorKind`] which occurred.
    pub fn kind(self) -> ErrorKind {
        self.kind
    }

    /// Get the position inside of the message where the error occurred.
    pub fn position(self) -> Option<Length> {
        self.position
    }

    /// Stable negative code of the [`ErrorKind`], see [`ErrorKind::code`].
    pub fn code(self) -> i32 {
        self.kind.code()
    }

    /// For errors occurring inside of a nested message, extend the position
    /// count by the location where the nested message occurs.
    pub fn nested(self, nested_position: Length) -> Self {
        let position = (nested_position + self.position.unwrap_or_default()).ok();

        Self {
            kind: self.kind,
            position,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;

        if let Some(pos) = self.position {
            write!(f, " at BER byte {}", pos)?;
        }

        Ok(())
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            kind,
            position: None,
        }
    }
}

impl From<Infallible> for Error {
    fn from(_: Infallible) -> Error {
        unreachable!()
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ErrorKind {}

/// Error type.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Operation failed due to previous error
    Failed,

    /// Buffer holds fewer bytes than the encoding requires
    Truncated,

    /// Integer encoding has more bytes than the target width
    Overflow,

    /// No destination supplied for an unpacked integer
    NullDestination,

    /// Length octet 0x80, the indefinite form
    IndefiniteLength,

    /// Length field longer than four octets, or a length beyond `u32`
    Overlength,

    /// Tag number does not fit into 64 bits
    TagOverflow,

    /// Constructed data objects nested deeper than the configured limit
    NestingTooDeep {
        /// Configured maximum depth
        max: usize,
    },

    /// OBJECT IDENTIFIER value is empty, ends inside an arc, or has an arc beyond `u64`
    MalformedOid,

    /// Value length does not match the fixed length of its interpretation
    UnexpectedLength {
        /// Required value length
        expected: Length,

        /// Length actually encoded
        actual: Length,
    },

    /// Undecoded trailing data at end of message
    TrailingData {
        /// Length of the decoded data
        decoded: Length,

        /// Total length of the remaining data left in the buffer
        remaining: Length,
    },
}

impl ErrorKind {
    /// Annotate an [`ErrorKind`] with context about where it occurred,
    /// returning an error.
    pub fn at(self, position: Length) -> Error {
        Error::new(self, position)
    }

    /// Stable negative integer for callers that report errors as codes.
    ///
    /// `-1` is reserved for [`ErrorKind::Truncated`], the failure to decode a header
    /// or value for lack of bytes.
    pub fn code(self) -> i32 {
        match self {
            ErrorKind::Truncated => -1,
            ErrorKind::Overflow => -2,
            ErrorKind::NullDestination => -3,
            ErrorKind::IndefiniteLength => -4,
            ErrorKind::Overlength => -5,
            ErrorKind::TagOverflow => -6,
            ErrorKind::NestingTooDeep { .. } => -7,
            ErrorKind::MalformedOid => -8,
            ErrorKind::UnexpectedLength { .. } => -9,
            ErrorKind::TrailingData { .. } => -10,
            ErrorKind::Failed => -11,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Failed => write!(f, "operation failed"),
            ErrorKind::Truncated => write!(f, "BER message is truncated"),
            ErrorKind::Overflow => write!(f, "too many bytes for target integer width"),
            ErrorKind::NullDestination => write!(f, "no destination for unpacked value"),
            ErrorKind::IndefiniteLength => write!(f, "indefinite length is not supported"),
            ErrorKind::Overlength => write!(f, "length greater than protocol maximum"),
            ErrorKind::TagOverflow => write!(f, "tag number exceeds 64 bits"),
            ErrorKind::NestingTooDeep { max } => {
                write!(f, "constructed values nested deeper than {}", max)
            }
            ErrorKind::MalformedOid => write!(f, "malformed OBJECT IDENTIFIER"),
            ErrorKind::UnexpectedLength { expected, actual } => write!(
                f,
                "unexpected value length: expected {}, got {}",
                expected, actual
            ),
            ErrorKind::TrailingData { decoded, remaining } => {
                write!(
                    f,
                    "trailing data at end of BER message: decoded {} bytes, {} bytes remaining",
                    decoded, remaining
                )
            }
        }
    }
}
