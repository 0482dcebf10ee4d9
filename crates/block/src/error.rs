use lumen_types::DecodeError;
use thiserror::Error;

/// Failed to decode a [`Block`](crate::Block).
///
/// The variant names the stage that failed. The sub-decoder's error is carried
/// unchanged.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum BlockDecodeError {
    /// The header could not be decoded.
    #[error("malformed header: {0}")]
    MalformedHeader(#[source] DecodeError),
    /// The header decoded but the body could not.
    #[error("malformed body: {0}")]
    MalformedBody(#[source] DecodeError),
    /// Bytes remained after a block that must span the whole input.
    #[error("{0} trailing bytes after block")]
    TrailingBytes(usize),
}

/// The offloaded hashing task failed to complete.
#[derive(Debug, Error)]
#[error("failed to join hashing task: {0}")]
pub struct HashError(#[from] pub tokio::task::JoinError);

/// A body's transaction count must fit the `u16` count prefix.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("{0} transactions exceed the per-block maximum of {max}", max = u16::MAX)]
pub struct TooManyTransactions(pub usize);
