use thiserror::Error;

/// Any error that might occur while reading a value from a
/// [`SerialBuffer`](crate::SerialBuffer).
#[derive(Clone, Debug, Error, PartialEq)]
pub enum DecodeError {
    /// The buffer ran out before the value was complete.
    #[error("unexpected end of buffer: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEnd {
        /// The number of bytes the read required.
        needed: usize,
        /// The number of unread bytes left in the buffer.
        remaining: usize,
    },
    /// The encoded version is not one this implementation understands.
    #[error("unsupported version {0}")]
    UnsupportedVersion(u16),
    /// The encoded transaction type is not one this implementation understands.
    #[error("unsupported transaction type {0}")]
    UnsupportedTransactionType(u8),
    /// An encoded 64-bit integer was not a non-negative integral double within
    /// [`MAX_SAFE_U64`](crate::MAX_SAFE_U64).
    #[error("invalid encoding for a 64-bit unsigned integer: {0}")]
    InvalidUint64(f64),
    /// Bytes remained after a value that must span the whole input.
    #[error("{0} trailing bytes after decoded value")]
    TrailingBytes(usize),
}

/// Failed to parse a fixed-width value from its base64 form.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ParseError {
    /// The string is not valid padded standard base64.
    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    /// The decoded bytes have the wrong length.
    #[error("expected {expected} bytes, found {found}")]
    Length {
        /// The required number of bytes.
        expected: usize,
        /// The number of bytes actually decoded.
        found: usize,
    },
}

/// A 64-bit value is too large to survive the wire encoding.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("{0} exceeds the largest integer representable on the wire")]
pub struct Uint64OutOfRange(pub u64);
