use lumen_types::Hash;
use std::collections::HashMap;

/// Hashes of earlier checkpoints, oldest first.
#[derive(Clone, Debug, Default)]
pub struct OldCheckpoints {
    hashes: Vec<Hash>,
    index: HashMap<Hash, usize>,
}

impl OldCheckpoints {
    /// Index the given hashes. Duplicates resolve to their first position.
    pub fn new(hashes: Vec<Hash>) -> Self {
        let mut index = HashMap::with_capacity(hashes.len());
        for (i, hash) in hashes.iter().enumerate() {
            index.entry(*hash).or_insert(i);
        }
        Self { hashes, index }
    }

    /// The hash at position `i`.
    pub fn get(&self, i: usize) -> Option<&Hash> {
        self.hashes.get(i)
    }

    /// The position of `hash`, if it is an old checkpoint.
    pub fn position(&self, hash: &Hash) -> Option<usize> {
        self.index.get(hash).copied()
    }

    /// Whether `hash` is an old checkpoint.
    pub fn contains(&self, hash: &Hash) -> bool {
        self.index.contains_key(hash)
    }

    /// The number of old checkpoints.
    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    /// Whether there are no old checkpoints.
    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }

    /// The hashes, oldest first.
    pub fn iter(&self) -> std::slice::Iter<'_, Hash> {
        self.hashes.iter()
    }

    /// The hashes as a slice.
    pub fn as_slice(&self) -> &[Hash] {
        &self.hashes
    }
}

impl<'a> IntoIterator for &'a OldCheckpoints {
    type Item = &'a Hash;
    type IntoIter = std::slice::Iter<'a, Hash>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
