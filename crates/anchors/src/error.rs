use lumen_block::HashError;
use lumen_types::Hash;
use thiserror::Error;

/// Failed to resolve the hash of a trust anchor.
///
/// Either variant leaves the anchor pending.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The hash could not be computed.
    #[error("failed to hash anchor block: {0}")]
    Hash(#[from] HashError),
    /// The configured hash disagrees with the hash of the configured block.
    #[error(
        "anchor block at height {height} hashes to {computed}, but its configured hash is {placeholder}"
    )]
    PlaceholderMismatch {
        /// Height of the anchor block.
        height: u32,
        /// The configured hash.
        placeholder: Hash,
        /// The hash computed from the block.
        computed: Hash,
    },
}
