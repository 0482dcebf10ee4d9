//! The block header and its encoding.

use crate::{target, HashError, Target};
use lumen_types::{buffer::safe_u64, DecodeError, Hash, Serial, SerialBuffer, Uint64OutOfRange};
use serde::{Deserialize, Deserializer, Serialize};

/// Chain linkage, commitments and proof-of-work parameters of a block.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Header {
    prev_hash: Hash,
    body_hash: Hash,
    accounts_hash: Hash,
    n_bits: u32,
    height: u32,
    timestamp: u32,
    #[serde(deserialize_with = "deserialize_nonce")]
    nonce: u64,
}

impl Header {
    /// The only encoding version understood.
    pub const VERSION: u16 = 1;
    /// The encoded size of every header.
    pub const SIZE: usize = 2 + 3 * Hash::SIZE + 4 + 4 + 4 + 8;

    /// Assemble a header.
    ///
    /// Fails if `nonce` cannot be carried by the wire encoding.
    pub fn new(
        prev_hash: Hash,
        body_hash: Hash,
        accounts_hash: Hash,
        n_bits: u32,
        height: u32,
        timestamp: u32,
        nonce: u64,
    ) -> Result<Self, Uint64OutOfRange> {
        Ok(Self {
            prev_hash,
            body_hash,
            accounts_hash,
            n_bits,
            height,
            timestamp,
            nonce: safe_u64(nonce)?,
        })
    }

    /// The hash of the previous block.
    pub fn prev_hash(&self) -> &Hash {
        &self.prev_hash
    }

    /// The merkle root committing to the body.
    pub fn body_hash(&self) -> &Hash {
        &self.body_hash
    }

    /// The root of the accounts tree after applying the block.
    pub fn accounts_hash(&self) -> &Hash {
        &self.accounts_hash
    }

    /// The proof-of-work target in compact form.
    pub fn n_bits(&self) -> u32 {
        self.n_bits
    }

    /// The proof-of-work target.
    pub fn target(&self) -> Target {
        target::compact_to_target(self.n_bits)
    }

    /// The difficulty implied by the target.
    pub fn difficulty(&self) -> f64 {
        target::target_to_difficulty(&self.target())
    }

    /// The block height.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Seconds since the UNIX epoch.
    pub fn timestamp(&self) -> u32 {
        self.timestamp
    }

    /// The proof-of-work nonce.
    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    /// Hash the header encoding on the current thread.
    pub fn compute_hash(&self) -> Hash {
        lumen_hash::hash(self)
    }

    /// Hash the header encoding on the blocking thread pool.
    pub async fn hash(&self) -> Result<Hash, HashError> {
        let bytes = Serial::serialize(self).into_bytes();
        Ok(lumen_hash::hash_bytes_offloaded(bytes).await?)
    }
}

impl Serial for Header {
    fn serialized_size(&self) -> usize {
        Self::SIZE
    }

    fn serialize_into(&self, buf: &mut SerialBuffer) {
        buf.write_u16(Self::VERSION);
        self.prev_hash.serialize_into(buf);
        self.body_hash.serialize_into(buf);
        self.accounts_hash.serialize_into(buf);
        buf.write_u32(self.n_bits);
        buf.write_u32(self.height);
        buf.write_u32(self.timestamp);
        buf.write_u64(self.nonce);
    }

    fn unserialize(buf: &mut SerialBuffer) -> Result<Self, DecodeError> {
        let version = buf.read_u16()?;
        if version != Self::VERSION {
            return Err(DecodeError::UnsupportedVersion(version));
        }
        Ok(Self {
            prev_hash: Hash::unserialize(buf)?,
            body_hash: Hash::unserialize(buf)?,
            accounts_hash: Hash::unserialize(buf)?,
            n_bits: buf.read_u32()?,
            height: buf.read_u32()?,
            timestamp: buf.read_u32()?,
            nonce: buf.read_u64()?,
        })
    }
}

fn deserialize_nonce<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    safe_u64(u64::deserialize(deserializer)?).map_err(serde::de::Error::custom)
}
