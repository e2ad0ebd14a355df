//! # Proof Rejections
//!
//! Why a message failed verification. Every variant is either a malformed
//! input or an invalid proof; none of them bans anyone.

use shared_types::{Epoch, WireError, U256};
use thiserror::Error;

/// Reason a message was rejected by the proof verifier.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProofRejection {
    /// Required fields missing or proof not decodable
    #[error("Malformed message: {0}")]
    Malformed(#[from] WireError),

    /// Message addressed to a different room
    #[error("Message for room {actual} submitted to room {expected}")]
    RoomMismatch { expected: U256, actual: U256 },

    /// Epoch outside the accepted window
    #[error("Epoch {epoch} outside [{lower}, {upper}]")]
    EpochOutOfRange {
        epoch: Epoch,
        lower: Epoch,
        upper: Epoch,
    },

    /// `x` does not bind the message content
    #[error("Message hash mismatch: expected {expected}, proof has {actual}")]
    HashMismatch { expected: U256, actual: U256 },

    /// Message id disagrees with the proof's nullifier
    #[error("Message nullifier does not match proof nullifier")]
    NullifierMismatch,

    /// Proof generated for another application
    #[error("Proof RLN identifier {actual} does not match room {expected}")]
    RlnIdentifierMismatch { expected: U256, actual: U256 },

    /// Proof generated for another epoch
    #[error("Proof epoch {proof_epoch} does not match message epoch {message_epoch}")]
    ProofEpochMismatch { proof_epoch: U256, message_epoch: Epoch },

    /// External nullifier not derived from this room and epoch
    #[error("External nullifier mismatch")]
    ExternalNullifierMismatch,

    /// A signal or identifier is not a field element
    #[error("Value outside scalar field: {0}")]
    FieldConversion(String),

    /// SNARK verifier returned false
    #[error("SNARK proof rejected")]
    SnarkRejected,

    /// SNARK verifier failed
    #[error("SNARK verifier error: {0}")]
    SnarkFailed(String),

    /// SNARK verifier exceeded its time budget
    #[error("SNARK verification timed out")]
    SnarkTimeout,
}

impl ProofRejection {
    /// Stable label for metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Malformed(_) => "malformed",
            Self::RoomMismatch { .. } => "room_mismatch",
            Self::EpochOutOfRange { .. } => "epoch_out_of_range",
            Self::HashMismatch { .. } => "hash_mismatch",
            Self::NullifierMismatch => "nullifier_mismatch",
            Self::RlnIdentifierMismatch { .. } => "rln_identifier_mismatch",
            Self::ProofEpochMismatch { .. } => "proof_epoch_mismatch",
            Self::ExternalNullifierMismatch => "external_nullifier_mismatch",
            Self::FieldConversion(_) => "field_conversion",
            Self::SnarkRejected => "snark_rejected",
            Self::SnarkFailed(_) => "snark_failed",
            Self::SnarkTimeout => "snark_timeout",
        }
    }

    /// Whether the input was malformed rather than cryptographically wrong.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed(_))
    }
}
