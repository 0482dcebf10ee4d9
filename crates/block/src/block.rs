//! The `Block` aggregate.

use crate::{target::Target, BlockDecodeError, Body, HashError, Header};
use lumen_types::{Address, Hash, Serial, SerialBuffer, Transaction};
use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;

#[cfg(test)]
mod tests;

/// An immutable block: one header and one body.
///
/// Every derived accessor forwards to the header or body and never hashes.
/// The identity hash is computed at most once per instance and then cached.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Block {
    header: Header,
    body: Body,
    #[serde(skip)]
    hash: OnceCell<Hash>,
}

impl Block {
    /// Bind a header to a body.
    ///
    /// No consensus validation happens here; in particular the header's body
    /// hash is not checked against the body.
    pub fn new(header: Header, body: Body) -> Self {
        Self {
            header,
            body,
            hash: OnceCell::new(),
        }
    }

    /// Decode a block from the buffer's read position.
    ///
    /// On success the cursor sits directly after the body; any following bytes
    /// are left for the caller.
    pub fn unserialize(buf: &mut SerialBuffer) -> Result<Self, BlockDecodeError> {
        let header = Header::unserialize(buf).map_err(BlockDecodeError::MalformedHeader)?;
        let body = Body::unserialize(buf).map_err(BlockDecodeError::MalformedBody)?;
        Ok(Self::new(header, body))
    }

    /// Decode a block that must span the whole of `bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, BlockDecodeError> {
        let mut buf = SerialBuffer::from(bytes.to_vec());
        let block = Self::unserialize(&mut buf)?;
        match buf.remaining() {
            0 => Ok(block),
            n => Err(BlockDecodeError::TrailingBytes(n)),
        }
    }

    /// Encode the block into a buffer sized exactly to
    /// [`Block::serialized_size`].
    pub fn serialize(&self) -> SerialBuffer {
        let mut buf = SerialBuffer::with_capacity(self.serialized_size());
        self.serialize_into(&mut buf);
        buf
    }

    /// Append the header encoding followed by the body encoding.
    pub fn serialize_into(&self, buf: &mut SerialBuffer) {
        self.header.serialize_into(buf);
        self.body.serialize_into(buf);
    }

    /// The number of bytes the block encodes to.
    pub fn serialized_size(&self) -> usize {
        self.header.serialized_size() + self.body.serialized_size()
    }

    /// The block's identity: the hash of its header encoding.
    ///
    /// The first successful result is cached, so later calls return
    /// immediately with an equal value.
    pub async fn hash(&self) -> Result<Hash, HashError> {
        self.hash
            .get_or_try_init(|| self.header.hash())
            .await
            .copied()
    }

    /// The identity hash, if it has already been computed.
    pub fn cached_hash(&self) -> Option<Hash> {
        self.hash.get().copied()
    }

    /// The header.
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// The body.
    pub fn body(&self) -> &Body {
        &self.body
    }

    /// Take the block apart.
    pub fn into_parts(self) -> (Header, Body) {
        (self.header, self.body)
    }

    /// See [`Header::prev_hash`].
    pub fn prev_hash(&self) -> &Hash {
        self.header.prev_hash()
    }

    /// See [`Header::body_hash`].
    pub fn body_hash(&self) -> &Hash {
        self.header.body_hash()
    }

    /// See [`Header::accounts_hash`].
    pub fn accounts_hash(&self) -> &Hash {
        self.header.accounts_hash()
    }

    /// See [`Header::n_bits`].
    pub fn n_bits(&self) -> u32 {
        self.header.n_bits()
    }

    /// See [`Header::target`].
    pub fn target(&self) -> Target {
        self.header.target()
    }

    /// See [`Header::difficulty`].
    pub fn difficulty(&self) -> f64 {
        self.header.difficulty()
    }

    /// See [`Header::height`].
    pub fn height(&self) -> u32 {
        self.header.height()
    }

    /// See [`Header::timestamp`].
    pub fn timestamp(&self) -> u32 {
        self.header.timestamp()
    }

    /// See [`Header::nonce`].
    pub fn nonce(&self) -> u64 {
        self.header.nonce()
    }

    /// See [`Body::miner_addr`].
    pub fn miner_addr(&self) -> &Address {
        self.body.miner_addr()
    }

    /// See [`Body::transactions`].
    pub fn transactions(&self) -> &[Transaction] {
        self.body.transactions()
    }

    /// See [`Body::transaction_count`].
    pub fn transaction_count(&self) -> usize {
        self.body.transaction_count()
    }
}

impl From<(Header, Body)> for Block {
    fn from((header, body): (Header, Body)) -> Self {
        Self::new(header, body)
    }
}

// The cached hash is derived from the header, so equality ignores it.
impl PartialEq for Block {
    fn eq(&self, other: &Self) -> bool {
        self.header == other.header && self.body == other.body
    }
}

impl Eq for Block {}
