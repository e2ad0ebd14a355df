//! Crypto error types.

use thiserror::Error;

/// Errors from field conversion, hashing and secret recovery.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CryptoError {
    /// Value is not a canonical BN254 scalar.
    #[error("Value is not in the scalar field: {0}")]
    NotInField(String),

    /// Poseidon rejected its input.
    #[error("Poseidon hash failed: {0}")]
    Poseidon(String),

    /// Two shares with the same `x` do not determine a line.
    #[error("Shares share an x coordinate; line is undetermined")]
    DegenerateShares,

    /// More leaves than the tree can hold.
    #[error("Tree of depth {depth} cannot hold {leaves} leaves")]
    TreeFull {
        /// Tree depth
        depth: usize,
        /// Number of leaves supplied
        leaves: usize,
    },

    /// Depth outside the supported range.
    #[error("Unsupported tree depth: {0}")]
    InvalidTreeDepth(usize),
}
