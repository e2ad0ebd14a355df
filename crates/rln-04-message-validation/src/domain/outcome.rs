//! Final decision for one inbound message.

use rln_01_proof_verification::ProofRejection;
use shared_types::U256;

/// Outcome of running a message through the pipeline.
///
/// Rejections are normal results, not errors. Only collaborator failures
/// surface as [`crate::ValidationError`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// Proof valid and first use of the nullifier.
    Accepted,

    /// Malformed input or a proof that failed a gate.
    RejectedInvalidProof(ProofRejection),

    /// Second message under the nullifier; the sender is now banned.
    RejectedBanned {
        identity_commitment: U256,
        rate_commitment: U256,
    },

    /// Exact resubmission of an earlier message.
    RejectedDuplicate,
}

impl ValidationOutcome {
    /// Whether the message should be relayed.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    /// Metric label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Accepted => "accepted",
            Self::RejectedInvalidProof(_) => "invalid_proof",
            Self::RejectedBanned { .. } => "banned",
            Self::RejectedDuplicate => "duplicate",
        }
    }
}
