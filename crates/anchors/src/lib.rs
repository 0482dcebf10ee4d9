//! The trust anchors of the Lumen block core.
//!
//! A node treats a small set of blocks and hashes as correct without
//! validating them: the genesis block, a recent checkpoint block with the
//! cumulative work up to it, and the hashes of earlier checkpoints.
//!
//! [`TrustAnchors`] is built once at startup from an [`AnchorsConfig`] and
//! passed to whatever needs it. Each anchor's hash is resolved exactly once by
//! hashing its block; until then the configured hash is served.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub use anchor::{Anchor, Checkpoint, Genesis};
pub use config::{AnchorsConfig, CheckpointConfig, GenesisConfig};
pub use error::ResolveError;
pub use old::OldCheckpoints;
pub use resolve::{Resolution, ResolveOnce};

use lumen_types::Hash;

mod anchor;
mod config;
mod error;
mod old;
pub mod resolve;

/// The default trust anchors configuration.
pub const DEFAULT_ANCHORS: &str = include_str!("../../../anchors.yml");

/// The genesis, checkpoint and old checkpoint anchors.
#[derive(Debug)]
pub struct TrustAnchors {
    genesis: Genesis,
    checkpoint: Checkpoint,
    old_checkpoints: OldCheckpoints,
}

impl Default for AnchorsConfig {
    fn default() -> Self {
        serde_yaml::from_str(DEFAULT_ANCHORS)
            .expect("default `anchors.yml` must be valid (checked in tests)")
    }
}

impl TrustAnchors {
    /// Build the anchors with their hashes pending.
    pub fn new(config: AnchorsConfig) -> Self {
        let AnchorsConfig {
            genesis,
            checkpoint,
            old_checkpoints,
        } = config;
        #[cfg(feature = "tracing")]
        tracing::debug!("{} old checkpoints", old_checkpoints.len());
        Self {
            genesis: Genesis::new(genesis),
            checkpoint: Checkpoint::new(checkpoint),
            old_checkpoints: OldCheckpoints::new(old_checkpoints),
        }
    }

    /// Build the anchors and resolve their hashes.
    pub async fn init(config: AnchorsConfig) -> Result<Self, ResolveError> {
        let anchors = Self::new(config);
        anchors.resolve().await?;
        Ok(anchors)
    }

    /// Hash the genesis and checkpoint blocks concurrently and resolve both
    /// anchors.
    ///
    /// Fails if either block hashes to something other than its configured
    /// hash. An anchor that failed stays pending; the other may still resolve.
    pub async fn resolve(&self) -> Result<(), ResolveError> {
        let (genesis, checkpoint) =
            tokio::join!(self.genesis.resolve(), self.checkpoint.resolve());
        genesis?;
        checkpoint?;
        Ok(())
    }

    /// Whether both the genesis and checkpoint hashes are resolved.
    pub fn is_resolved(&self) -> bool {
        self.genesis.is_resolved() && self.checkpoint.is_resolved()
    }

    /// The genesis anchor.
    pub fn genesis(&self) -> &Genesis {
        &self.genesis
    }

    /// The checkpoint anchor.
    pub fn checkpoint(&self) -> &Checkpoint {
        &self.checkpoint
    }

    /// The old checkpoint hashes.
    pub fn old_checkpoints(&self) -> &OldCheckpoints {
        &self.old_checkpoints
    }

    /// Whether `hash` belongs to the genesis, the checkpoint or an old
    /// checkpoint.
    pub fn is_checkpoint(&self, hash: &Hash) -> bool {
        self.genesis.hash() == *hash
            || self.checkpoint.hash().as_ref() == Some(hash)
            || self.old_checkpoints.contains(hash)
    }
}
