//! # Revocation Entities
//!
//! Commitment derivation, the ban notice, and the revocation result types.

use crate::ports::outbound::{BanStatus, ExternalGroupError, MembershipError};
use shared_crypto::{identity_commitment, rate_commitment, CryptoError, FieldElement};
use shared_types::{Room, U256};
use thiserror::Error;
use tokio::task::JoinHandle;

/// Identity commitment and rate commitment of a banned identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BannedCommitments {
    pub identity_commitment: U256,
    pub rate_commitment: U256,
}

/// Recompute the commitments the client built from `secret` for `room`.
pub fn derive_commitments(room: &Room, secret: FieldElement) -> Result<BannedCommitments, CryptoError> {
    let idc = identity_commitment(secret)?;
    let rc = rate_commitment(idc, room.effective_user_message_limit())?;
    Ok(BannedCommitments {
        identity_commitment: idc.to_u256(),
        rate_commitment: rc.to_u256(),
    })
}

/// Text of the system notice recorded after a ban.
pub fn ban_notice(commitments: &BannedCommitments) -> String {
    format!(
        "User {} has been banned (rate commitment {}) from the room.",
        commitments.identity_commitment, commitments.rate_commitment
    )
}

/// Handle to the detached external-group removal.
pub type ExternalRemoval = JoinHandle<Result<(), ExternalGroupError>>;

/// What a revocation did.
#[derive(Debug)]
pub struct RevocationOutcome {
    /// Commitments that were banned.
    pub commitments: BannedCommitments,
    /// Effect on the local membership store.
    pub status: BanStatus,
    /// Whether a system notice was written.
    pub notice_recorded: bool,
    /// External removal task, for rooms backed by an external group.
    /// Dropping it does not cancel the removal.
    pub external_removal: Option<ExternalRemoval>,
}

impl RevocationOutcome {
    /// Banned identity commitment.
    pub fn identity_commitment(&self) -> U256 {
        self.commitments.identity_commitment
    }
}

/// Errors that prevent the local ban.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RevocationError {
    /// Recovered secret could not be hashed into commitments
    #[error("Commitment derivation failed: {0}")]
    Derivation(#[from] CryptoError),

    /// Membership store rejected the ban
    #[error("Ban failed: {0}")]
    Membership(#[from] MembershipError),
}
