use crate::{
    common::HashInput,
    error::Error,
    hash::Hasher,
};

/// One step of an inclusion proof: the hex-encoded sibling hash at that
/// height, tagged by the side it sits on relative to the running hash.
///
/// Exactly one side is populated by the [`left`](Self::left) and
/// [`right`](Self::right) constructors. A record carrying neither side is
/// representable but proves nothing: it fails verification rather than
/// raising an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sibling {
    pub left: Option<String>,
    pub right: Option<String>,
}

impl Sibling {
    pub fn left(hash: impl Into<String>) -> Self {
        Self {
            left: Some(hash.into()),
            right: None,
        }
    }

    pub fn right(hash: impl Into<String>) -> Self {
        Self {
            left: None,
            right: Some(hash.into()),
        }
    }
}

/// Sibling hashes ordered from the leaf's level upward to the root's child
/// level. Detached from the tree that produced it; remains valid after the
/// tree is mutated or reset.
pub type Proof = Vec<Sibling>;

/// Replay `proof` from `target_hash` and compare the recomputed running hash
/// to `merkle_root`, byte for byte.
///
/// An empty proof reduces to a direct comparison of target and root, which
/// covers the single-leaf tree. A malformed sibling record, undecodable
/// sibling hex, or a final mismatch all yield `Ok(false)`; only the coercion
/// of `target_hash` or `merkle_root` can error.
pub fn validate_proof(
    hasher: &Hasher,
    proof: &[Sibling],
    target_hash: impl Into<HashInput>,
    merkle_root: impl Into<HashInput>,
    double_hash: bool,
) -> Result<bool, Error> {
    let target = target_hash.into().into_bytes()?;
    let root = merkle_root.into().into_bytes()?;

    if proof.is_empty() {
        return Ok(target == root);
    }

    let mut running = target;
    for sibling in proof {
        let concatenated = if let Some(left) = &sibling.left {
            let Ok(left) = hex::decode(left) else {
                return Ok(false);
            };
            [left.as_slice(), running.as_ref()].concat()
        } else if let Some(right) = &sibling.right {
            let Ok(right) = hex::decode(right) else {
                return Ok(false);
            };
            [running.as_ref(), right.as_slice()].concat()
        } else {
            return Ok(false);
        };
        running = hasher.sum(&concatenated, double_hash);
    }

    Ok(running == root)
}
