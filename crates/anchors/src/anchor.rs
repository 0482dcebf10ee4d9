//! Blocks trusted by construction.

use crate::{
    resolve::{Resolution, ResolveOnce},
    CheckpointConfig, GenesisConfig, ResolveError,
};
use lumen_block::Block;
use lumen_types::Hash;
use std::ops::Deref;

/// A trusted block and its hash.
///
/// The hash starts out pending, holding the configured hash if there is one.
/// [`Anchor::resolve`] replaces it with the hash computed from the block,
/// once. Neither the block nor the resolved hash can change afterwards.
#[derive(Debug)]
pub struct Anchor {
    block: Block,
    hash: ResolveOnce<Hash>,
}

/// The genesis anchor. Its hash is always available.
#[derive(Debug)]
pub struct Genesis {
    anchor: Anchor,
    placeholder: Hash,
}

/// The checkpoint anchor.
#[derive(Debug)]
pub struct Checkpoint {
    anchor: Anchor,
    total_work: f64,
}

impl Anchor {
    fn new(block: Block, placeholder: Option<Hash>) -> Self {
        Self {
            block,
            hash: ResolveOnce::new(placeholder),
        }
    }

    /// The anchored block.
    pub fn block(&self) -> &Block {
        &self.block
    }

    /// The resolved hash, or the configured hash while pending.
    pub fn hash(&self) -> Option<Hash> {
        self.hash.value()
    }

    /// The full hash state.
    pub fn resolution(&self) -> Resolution<Hash> {
        self.hash.get()
    }

    /// Whether the hash has been computed from the block.
    pub fn is_resolved(&self) -> bool {
        self.hash.is_resolved()
    }

    /// Wait until the hash has been computed from the block.
    pub async fn resolved_hash(&self) -> Hash {
        self.hash.resolved().await
    }

    /// Compute the block hash and resolve the anchor with it.
    ///
    /// A computed hash that differs from the configured hash is an error and
    /// leaves the anchor pending. Resolving an already resolved anchor
    /// recomputes nothing.
    pub async fn resolve(&self) -> Result<Hash, ResolveError> {
        let placeholder = match self.hash.get() {
            Resolution::Resolved(hash) => return Ok(hash),
            Resolution::Pending(placeholder) => placeholder,
        };
        let computed = self.block.hash().await?;
        if let Some(placeholder) = placeholder {
            if placeholder != computed {
                #[cfg(feature = "tracing")]
                tracing::error!(
                    "Anchor block at height {} hashes to {computed}, expected {placeholder}",
                    self.block.height()
                );
                return Err(ResolveError::PlaceholderMismatch {
                    height: self.block.height(),
                    placeholder,
                    computed,
                });
            }
        }
        if self.hash.resolve(computed) {
            #[cfg(feature = "tracing")]
            tracing::info!(
                "Resolved anchor at height {} to {computed}",
                self.block.height()
            );
        }
        Ok(computed)
    }
}

impl Deref for Anchor {
    type Target = Block;
    fn deref(&self) -> &Self::Target {
        &self.block
    }
}

impl Genesis {
    /// A pending genesis anchor serving the configured hash.
    pub fn new(config: GenesisConfig) -> Self {
        #[cfg(feature = "tracing")]
        tracing::debug!("Genesis anchor with placeholder {}", config.hash);
        Self {
            anchor: Anchor::new(config.block, Some(config.hash)),
            placeholder: config.hash,
        }
    }

    /// The resolved hash, or the configured hash while pending.
    pub fn hash(&self) -> Hash {
        self.anchor.hash().unwrap_or(self.placeholder)
    }

    /// The underlying anchor.
    pub fn anchor(&self) -> &Anchor {
        &self.anchor
    }
}

impl Deref for Genesis {
    type Target = Anchor;
    fn deref(&self) -> &Self::Target {
        &self.anchor
    }
}

impl Checkpoint {
    /// A pending checkpoint anchor.
    pub fn new(config: CheckpointConfig) -> Self {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            "Checkpoint anchor at height {} with total work {}",
            config.block.height(),
            config.total_work
        );
        Self {
            anchor: Anchor::new(config.block, config.hash),
            total_work: config.total_work,
        }
    }

    /// The cumulative chain work up to and including the checkpoint block.
    pub fn total_work(&self) -> f64 {
        self.total_work
    }

    /// The underlying anchor.
    pub fn anchor(&self) -> &Anchor {
        &self.anchor
    }
}

impl Deref for Checkpoint {
    type Target = Anchor;
    fn deref(&self) -> &Self::Target {
        &self.anchor
    }
}
