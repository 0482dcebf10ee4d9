//! The hash function of the Lumen block core.
//!
//! All hashing is SHA-256 over canonical encodings. Block identity hashing may
//! be expensive, so [`hash_bytes_offloaded`] runs it on tokio's blocking pool
//! and lets the caller suspend until it completes.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

use lumen_types::{Hash, Serial};
use sha2::{Digest, Sha256};
use tokio::task::JoinError;

/// Hash the given bytes.
pub fn hash_bytes(bytes: &[u8]) -> Hash {
    Hash(Sha256::digest(bytes).into())
}

/// Hash the canonical encoding of a value.
pub fn hash<T: Serial>(value: &T) -> Hash {
    hash_bytes(value.serialize().as_bytes())
}

/// Hash the concatenation of two hashes.
pub fn hash_pair(left: &Hash, right: &Hash) -> Hash {
    let mut hasher = Sha256::new();
    hasher.update(left);
    hasher.update(right);
    Hash(hasher.finalize().into())
}

/// The merkle root of the given leaf hashes.
///
/// An empty tree hashes the empty byte string and a single leaf is its own
/// root. Larger trees split with the extra leaf on the left.
pub fn merkle_root(leaves: &[Hash]) -> Hash {
    match leaves {
        [] => hash_bytes(&[]),
        [leaf] => *leaf,
        _ => {
            let mid = leaves.len().div_ceil(2);
            let (left, right) = leaves.split_at(mid);
            hash_pair(&merkle_root(left), &merkle_root(right))
        }
    }
}

/// Hash the given bytes on tokio's blocking thread pool.
///
/// Must be called from within a tokio runtime. Fails only if the hashing task
/// panics or the runtime is shutting down.
pub async fn hash_bytes_offloaded(bytes: Vec<u8>) -> Result<Hash, JoinError> {
    tokio::task::spawn_blocking(move || hash_bytes(&bytes)).await
}
