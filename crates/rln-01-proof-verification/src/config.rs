//! Proof verifier configuration.

use shared_crypto::DEFAULT_TREE_DEPTH;
use std::time::Duration;

/// Epochs accepted on either side of the current one.
pub const DEFAULT_EPOCH_ERROR_RANGE: u64 = 1;

/// Tunables for [`crate::ProofVerificationService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifierConfig {
    /// Epoch tolerance `E`
    pub epoch_error_range: u64,

    /// Upper bound on a single SNARK verification; `None` waits forever
    pub snark_timeout: Option<Duration>,

    /// Depth of room membership trees
    pub merkle_depth: usize,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            epoch_error_range: DEFAULT_EPOCH_ERROR_RANGE,
            snark_timeout: None,
            merkle_depth: DEFAULT_TREE_DEPTH,
        }
    }
}
