//! The serializable description of the trust anchors.

use lumen_block::Block;
use lumen_types::Hash;
use serde::{Deserialize, Serialize};

/// Describes the blocks and hashes a node trusts without validation.
///
/// The default configuration is bundled from `anchors.yml` at the repository
/// root. See [`DEFAULT_ANCHORS`](crate::DEFAULT_ANCHORS).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnchorsConfig {
    /// The first block of the chain.
    pub genesis: GenesisConfig,
    /// The most recent trusted block.
    pub checkpoint: CheckpointConfig,
    /// Hashes of earlier checkpoint blocks, oldest first.
    ///
    /// No blocks are kept for these. They are only compared against.
    pub old_checkpoints: Vec<Hash>,
}

/// The genesis block and its known hash.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenesisConfig {
    /// The genesis block.
    pub block: Block,
    /// The hash of `block`, served until the computed hash is available.
    pub hash: Hash,
}

/// The checkpoint block and the work it carries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CheckpointConfig {
    /// The checkpoint block.
    pub block: Block,
    /// The cumulative chain work up to and including `block`.
    pub total_work: f64,
    /// The hash of `block`, if known ahead of time.
    ///
    /// If `None`, the checkpoint has no hash until it is resolved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<Hash>,
}
