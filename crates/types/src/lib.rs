//! Wire primitives shared by the Lumen block core.
//!
//! Every type that travels on the wire implements [`Serial`], giving it exactly
//! one canonical big-endian encoding written to and read from a [`SerialBuffer`].

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub use buffer::{SerialBuffer, MAX_SAFE_U64};
pub use bytes::{Address, Hash, PublicKey, Signature};
pub use error::{DecodeError, ParseError, Uint64OutOfRange};
pub use transaction::Transaction;

pub mod buffer;
mod bytes;
mod error;
pub mod transaction;

/// A value with a canonical binary encoding.
pub trait Serial: Sized {
    /// The exact number of bytes written by [`Serial::serialize_into`].
    fn serialized_size(&self) -> usize;

    /// Append the encoding of `self` to the given buffer.
    fn serialize_into(&self, buf: &mut SerialBuffer);

    /// Read a value from the buffer's read position, advancing it past the
    /// consumed bytes.
    fn unserialize(buf: &mut SerialBuffer) -> Result<Self, DecodeError>;

    /// Encode `self` into a freshly allocated buffer sized exactly to
    /// [`Serial::serialized_size`].
    fn serialize(&self) -> SerialBuffer {
        let mut buf = SerialBuffer::with_capacity(self.serialized_size());
        self.serialize_into(&mut buf);
        buf
    }
}

/// Decode a value that must span the whole of `bytes`.
pub fn from_bytes<T: Serial>(bytes: &[u8]) -> Result<T, DecodeError> {
    let mut buf = SerialBuffer::from(bytes.to_vec());
    let value = T::unserialize(&mut buf)?;
    match buf.remaining() {
        0 => Ok(value),
        n => Err(DecodeError::TrailingBytes(n)),
    }
}
