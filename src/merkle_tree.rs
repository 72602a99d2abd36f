use crate::{
    common::HashInput,
    error::Error,
    hash::{
        HashAlgorithm,
        Hasher,
    },
    proof::Sibling,
};

use bytes::Bytes;

type Level = Vec<Bytes>;

/// An append-only Merkle tree over an ordered leaf set.
///
/// Leaves are collected first; an explicit [`make_tree`](Self::make_tree) or
/// [`make_btc_tree`](Self::make_btc_tree) call then materializes the full
/// level stack, from the leaf level at the bottom up to a single-node root.
/// Any mutation of the leaf set invalidates the built state, and proofs and
/// the root are only readable while the tree is ready.
///
/// No internal locking is provided: callers interleaving mutation with reads
/// from multiple threads must serialize access themselves.
pub struct MerkleTree {
    hasher: Hasher,
    leaves: Vec<Bytes>,
    // Index 0 is the root level once built; the last index is the leaf
    // level. Empty until a build completes.
    levels: Vec<Level>,
    ready: bool,
}

impl MerkleTree {
    pub fn new(algorithm: HashAlgorithm) -> Self {
        Self {
            hasher: Hasher::new(algorithm),
            leaves: Vec::new(),
            levels: Vec::new(),
            ready: false,
        }
    }

    pub fn hasher(&self) -> &Hasher {
        &self.hasher
    }

    /// Coerce `value` to canonical bytes and append it to the leaf set,
    /// hashing it first when `pre_hash` is set. Clears readiness. A failed
    /// coercion propagates without mutating the tree.
    pub fn add_leaf(
        &mut self,
        value: impl Into<HashInput>,
        pre_hash: bool,
    ) -> Result<(), Error> {
        let bytes = value.into().into_bytes()?;
        let leaf = if pre_hash {
            self.hasher.digest(&bytes)
        } else {
            bytes
        };
        self.leaves.push(leaf);
        self.ready = false;
        Ok(())
    }

    /// Append each value in order. Stops at the first coercion failure;
    /// leaves appended before the failure remain.
    pub fn add_leaves<I, T>(&mut self, values: I, pre_hash: bool) -> Result<(), Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<HashInput>,
    {
        for value in values {
            self.add_leaf(value, pre_hash)?;
        }
        Ok(())
    }

    /// The leaf at `index`, or `None` when out of bounds.
    pub fn get_leaf(&self, index: usize) -> Option<&Bytes> {
        self.leaves.get(index)
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves.len()
    }

    /// Whether a build has completed since the last mutation.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Build the level stack with the standard pairing rule: adjacent nodes
    /// are concatenated and hashed (twice when `double_hash` is set), and an
    /// odd level's trailing node is promoted to the next level unchanged,
    /// without rehashing.
    pub fn make_tree(&mut self, double_hash: bool) {
        self.levels.clear();
        if !self.leaves.is_empty() {
            self.levels.push(self.leaves.clone());
            while self.levels[0].len() > 1 {
                let next = Self::next_level_standard(&self.hasher, &self.levels[0], double_hash);
                self.levels.insert(0, next);
            }
        }
        self.ready = true;
    }

    /// Build the level stack Bitcoin-style: an odd level is first extended
    /// by duplicating its last node, then every pair is concatenated and
    /// hashed. There is no unhashed promotion.
    ///
    /// The duplicate is kept in the stored level so that proofs over the
    /// final node record it as a right-hand sibling.
    pub fn make_btc_tree(&mut self, double_hash: bool) {
        self.levels.clear();
        if !self.leaves.is_empty() {
            self.levels.push(self.leaves.clone());
            while self.levels[0].len() > 1 {
                let top = &mut self.levels[0];
                if top.len() % 2 == 1 {
                    let duplicate = top[top.len() - 1].clone();
                    top.push(duplicate);
                }
                let next = Self::next_level_btc(&self.hasher, &self.levels[0], double_hash);
                self.levels.insert(0, next);
            }
        }
        self.ready = true;
    }

    /// The single node of the root level. `None` when the tree is not ready
    /// or was built over zero leaves.
    pub fn root(&self) -> Option<&Bytes> {
        if !self.ready {
            return None;
        }
        self.levels.first()?.first()
    }

    /// Hex-encoded form of [`root`](Self::root).
    pub fn root_hex(&self) -> Option<String> {
        self.root().map(hex::encode)
    }

    /// Sibling path from the leaf at `index` up to the root's child level,
    /// ordered bottom-to-top. `None` when the tree is not ready or `index`
    /// is out of bounds of the leaf level. A single-leaf tree yields an
    /// empty proof.
    pub fn get_proof(&self, index: usize) -> Option<Vec<Sibling>> {
        if !self.ready || self.levels.is_empty() {
            return None;
        }
        let leaf_level = self.levels.last()?;
        if index >= leaf_level.len() {
            return None;
        }

        let mut proof = Vec::new();
        let mut index = index;
        // Walk upward from the leaf level, stopping short of the root
        // level.
        for level in self.levels[1..].iter().rev() {
            if level.len() % 2 == 1 && index == level.len() - 1 {
                // The unpaired trailing node was promoted without a
                // sibling at this height.
                index /= 2;
                continue;
            }
            let sibling = if index % 2 == 1 {
                Sibling::left(hex::encode(&level[index - 1]))
            } else {
                Sibling::right(hex::encode(&level[index + 1]))
            };
            proof.push(sibling);
            index /= 2;
        }
        Some(proof)
    }

    /// Replay `proof` against this tree's configured hash. See
    /// [`validate_proof`](crate::proof::validate_proof).
    pub fn validate_proof(
        &self,
        proof: &[Sibling],
        target_hash: impl Into<HashInput>,
        merkle_root: impl Into<HashInput>,
        double_hash: bool,
    ) -> Result<bool, Error> {
        crate::proof::validate_proof(&self.hasher, proof, target_hash, merkle_root, double_hash)
    }

    /// Discard all leaves and levels and return to the initial, not-ready
    /// state.
    pub fn reset(&mut self) {
        self.leaves.clear();
        self.levels.clear();
        self.ready = false;
    }

    fn next_level_standard(hasher: &Hasher, level: &Level, double_hash: bool) -> Level {
        let pairs = level.len() / 2;
        let mut next = Level::with_capacity((level.len() + 1) / 2);
        for i in 0..pairs {
            let concatenated =
                [level[2 * i].as_ref(), level[2 * i + 1].as_ref()].concat();
            next.push(hasher.sum(&concatenated, double_hash));
        }
        if level.len() % 2 == 1 {
            // The lone trailing node is carried up as-is, never rehashed.
            next.push(level[level.len() - 1].clone());
        }
        next
    }

    // Callers guarantee an even `level`.
    fn next_level_btc(hasher: &Hasher, level: &Level, double_hash: bool) -> Level {
        let mut next = Level::with_capacity(level.len() / 2);
        for pair in level.chunks(2) {
            let concatenated = [pair[0].as_ref(), pair[1].as_ref()].concat();
            next.push(hasher.sum(&concatenated, double_hash));
        }
        next
    }
}

impl Default for MerkleTree {
    fn default() -> Self {
        Self::new(HashAlgorithm::default())
    }
}
