//! # Membership Merkle Tree
//!
//! Root computation for the incremental binary Poseidon tree rooms use as
//! their membership set. Empty positions hold a per-group zero value,
//! `hash_to_field(group_id as 32-byte big-endian)`, so two rooms with the same
//! members still have different roots.
//!
//! Only the root is needed by the relay, so no tree is kept: each level is
//! hashed pairwise and padded with the precomputed zero subtree of that level.

use crate::errors::CryptoError;
use crate::field::FieldElement;
use crate::hashing::hash_to_field;
use ark_bn254::Fr;
use light_poseidon::{Poseidon, PoseidonHasher};
use primitive_types::U256;

/// Depth rooms are created with.
pub const DEFAULT_TREE_DEPTH: usize = 20;

/// Deepest supported tree.
pub const MAX_TREE_DEPTH: usize = 32;

/// Zero subtrees of a group's membership tree.
#[derive(Clone, Debug)]
pub struct MembershipTree {
    depth: usize,
    /// `zeros[d]` is the root of an empty subtree of height `d`.
    zeros: Vec<FieldElement>,
}

impl MembershipTree {
    /// Precompute the zero subtrees for `group_id`.
    pub fn new(group_id: &U256, depth: usize) -> Result<Self, CryptoError> {
        if depth == 0 || depth > MAX_TREE_DEPTH {
            return Err(CryptoError::InvalidTreeDepth(depth));
        }

        let mut bytes = [0u8; 32];
        group_id.to_big_endian(&mut bytes);
        let zero = FieldElement::from_u256(&hash_to_field(&bytes))?;

        let mut hasher = pair_hasher()?;
        let mut zeros = Vec::with_capacity(depth + 1);
        zeros.push(zero);
        for level in 0..depth {
            let below = zeros[level];
            zeros.push(hash_pair(&mut hasher, below, below)?);
        }

        Ok(Self { depth, zeros })
    }

    /// Tree depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Value of an empty leaf.
    pub fn zero_value(&self) -> FieldElement {
        self.zeros[0]
    }

    /// Maximum number of leaves.
    pub fn capacity(&self) -> u64 {
        1u64 << self.depth
    }

    /// Root over `leaves` inserted left to right.
    pub fn root(&self, leaves: &[U256]) -> Result<FieldElement, CryptoError> {
        if leaves.len() as u64 > self.capacity() {
            return Err(CryptoError::TreeFull {
                depth: self.depth,
                leaves: leaves.len(),
            });
        }

        let mut level = leaves
            .iter()
            .map(FieldElement::from_u256)
            .collect::<Result<Vec<_>, _>>()?;

        let mut hasher = pair_hasher()?;
        for height in 0..self.depth {
            let zero = self.zeros[height];
            let mut next = Vec::with_capacity(level.len().div_ceil(2));
            for pair in level.chunks(2) {
                let right = pair.get(1).copied().unwrap_or(zero);
                next.push(hash_pair(&mut hasher, pair[0], right)?);
            }
            level = next;
        }

        Ok(level.first().copied().unwrap_or(self.zeros[self.depth]))
    }
}

/// One-shot membership root for `group_id` over `leaves`.
pub fn membership_root(
    group_id: &U256,
    depth: usize,
    leaves: &[U256],
) -> Result<FieldElement, CryptoError> {
    MembershipTree::new(group_id, depth)?.root(leaves)
}

fn pair_hasher() -> Result<Poseidon<Fr>, CryptoError> {
    Poseidon::<Fr>::new_circom(2).map_err(|e| CryptoError::Poseidon(e.to_string()))
}

fn hash_pair(
    hasher: &mut Poseidon<Fr>,
    left: FieldElement,
    right: FieldElement,
) -> Result<FieldElement, CryptoError> {
    hasher
        .hash(&[left.inner(), right.inner()])
        .map(FieldElement::from)
        .map_err(|e| CryptoError::Poseidon(e.to_string()))
}
