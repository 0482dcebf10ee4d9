//! The byte cursor used for every encode and decode in the block core.

use crate::{DecodeError, Uint64OutOfRange};


/// The largest 64-bit unsigned integer the wire format can carry.
///
/// 64-bit integers are encoded as big-endian IEEE-754 doubles, so only the
/// integers a double represents exactly (up to `2^53 - 1`) survive a round-trip.
pub const MAX_SAFE_U64: u64 = (1 << 53) - 1;

/// A growable byte buffer with a read cursor.
///
/// Writes always append to the end of the buffer. Reads consume bytes from the
/// current read position and leave anything after the value untouched for the
/// next reader.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SerialBuffer {
    bytes: Vec<u8>,
    read_pos: usize,
}

impl SerialBuffer {
    /// An empty buffer that can hold `capacity` bytes without reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
            read_pos: 0,
        }
    }

    /// The offset of the next byte to be read.
    pub fn read_pos(&self) -> usize {
        self.read_pos
    }

    /// The number of bytes not yet read.
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.read_pos
    }

    /// The total number of bytes written to the buffer.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether nothing has been written to the buffer.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// All bytes in the buffer, regardless of the read position.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume the buffer, returning all of its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Append a single byte.
    pub fn write_u8(&mut self, value: u8) {
        self.bytes.push(value);
    }

    /// Append a big-endian `u16`.
    pub fn write_u16(&mut self, value: u16) {
        self.write_bytes(&value.to_be_bytes());
    }

    /// Append a big-endian `u32`.
    pub fn write_u32(&mut self, value: u32) {
        self.write_bytes(&value.to_be_bytes());
    }

    /// Append a `u64` in its wire form, a big-endian double.
    ///
    /// Callers must only pass values checked with [`safe_u64`].
    pub fn write_u64(&mut self, value: u64) {
        debug_assert!(value <= MAX_SAFE_U64, "unchecked 64-bit value {value}");
        self.write_bytes(&(value as f64).to_be_bytes());
    }

    /// Append raw bytes.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }

    /// Read the next `len` bytes.
    pub fn read_bytes(&mut self, len: usize) -> Result<&[u8], DecodeError> {
        let remaining = self.remaining();
        if len > remaining {
            return Err(DecodeError::UnexpectedEnd {
                needed: len,
                remaining,
            });
        }
        let start = self.read_pos;
        self.read_pos += len;
        Ok(&self.bytes[start..self.read_pos])
    }

    /// Read the next `N` bytes into an array.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let mut array = [0u8; N];
        array.copy_from_slice(self.read_bytes(N)?);
        Ok(array)
    }

    /// Read a single byte.
    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        self.read_array().map(u8::from_be_bytes)
    }

    /// Read a big-endian `u16`.
    pub fn read_u16(&mut self) -> Result<u16, DecodeError> {
        self.read_array().map(u16::from_be_bytes)
    }

    /// Read a big-endian `u32`.
    pub fn read_u32(&mut self) -> Result<u32, DecodeError> {
        self.read_array().map(u32::from_be_bytes)
    }

    /// Read a `u64` from its wire form.
    ///
    /// The cursor is left in place if the double does not hold a valid value.
    pub fn read_u64(&mut self) -> Result<u64, DecodeError> {
        let start = self.read_pos;
        let double = f64::from_be_bytes(self.read_array()?);
        match u64_from_double(double) {
            Some(value) => Ok(value),
            None => {
                self.read_pos = start;
                Err(DecodeError::InvalidUint64(double))
            }
        }
    }
}

impl From<Vec<u8>> for SerialBuffer {
    fn from(bytes: Vec<u8>) -> Self {
        Self { bytes, read_pos: 0 }
    }
}

impl AsRef<[u8]> for SerialBuffer {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// Check that `value` can be carried by [`SerialBuffer::write_u64`].
pub fn safe_u64(value: u64) -> Result<u64, Uint64OutOfRange> {
    if value <= MAX_SAFE_U64 {
        Ok(value)
    } else {
        Err(Uint64OutOfRange(value))
    }
}

fn u64_from_double(double: f64) -> Option<u64> {
    let valid = double.is_finite()
        && double >= 0.0
        && double.fract() == 0.0
        && double <= MAX_SAFE_U64 as f64;
    valid.then_some(double as u64)
}
