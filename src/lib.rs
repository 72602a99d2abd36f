//! Binary hash trees over an ordered leaf set, with compact inclusion proofs
//! and standalone proof verification against a published Merkle root.
//!
//! Leaves are collected first, then an explicit build step materializes the
//! full level stack. Two build variants are provided: the standard rule
//! promotes an odd level's trailing node upward unhashed, while the
//! Bitcoin-style rule duplicates it and hashes every pair.

mod common;
mod error;
mod hash;
mod merkle_tree;
mod proof;


pub use common::{
    is_hex,
    strip_hex_prefix,
    with_hex_prefix,
    HashInput,
};
pub use error::Error;
pub use hash::{
    HashAlgorithm,
    Hasher,
};
pub use merkle_tree::MerkleTree;
pub use proof::{
    validate_proof,
    Proof,
    Sibling,
};
