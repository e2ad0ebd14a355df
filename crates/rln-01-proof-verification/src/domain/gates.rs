//! # Verification Gates
//!
//! Pure, ordered checks a message must pass before its SNARK proof is worth
//! verifying. Each gate is a fast reject; the caller runs them in order and
//! stops at the first failure.

use crate::domain::epoch::EpochWindow;
use crate::domain::errors::ProofRejection;
use shared_crypto::{external_nullifier, signal_hash, CryptoError, FieldElement, MembershipTree};
use shared_types::{Message, Room, U256};

/// Result of the advisory membership-root comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RootCheck {
    /// Room has no explicit identity set.
    Skipped,
    /// Proof root equals the room's current root.
    Matched,
    /// Proof was generated against a different membership snapshot.
    Mismatched { expected: U256, actual: U256 },
    /// The room's leaves could not be hashed into a root.
    Unavailable(String),
}

/// Gate 1: the message is addressed to this room.
pub fn check_room(room: &Room, message: &Message) -> Result<(), ProofRejection> {
    if message.room_id != room.room_id {
        return Err(ProofRejection::RoomMismatch {
            expected: room.room_id,
            actual: message.room_id,
        });
    }
    Ok(())
}

/// Gate 2: the claimed epoch lies inside the window.
pub fn check_epoch(window: &EpochWindow, message: &Message) -> Result<(), ProofRejection> {
    if !window.contains(message.epoch) {
        return Err(ProofRejection::EpochOutOfRange {
            epoch: message.epoch,
            lower: window.lower(),
            upper: window.upper(),
        });
    }
    Ok(())
}

/// Gate 4: `x` is the hash of the content, and the message id is the
/// proof's nullifier.
pub fn check_binding(message: &Message) -> Result<(), ProofRejection> {
    let signals = message.proof.signals();

    let expected = signal_hash(&message.content);
    if expected != signals.x {
        return Err(ProofRejection::HashMismatch {
            expected,
            actual: signals.x,
        });
    }

    if message.nullifier != signals.nullifier {
        return Err(ProofRejection::NullifierMismatch);
    }

    Ok(())
}

/// Gate 5: compare the proof root with the room's current membership root.
///
/// Never rejects. Membership held by an external group may lag the proof's
/// snapshot by an update cycle.
pub fn check_membership_root(room: &Room, message: &Message, depth: usize) -> RootCheck {
    if !room.has_identity_set() {
        return RootCheck::Skipped;
    }

    let root = MembershipTree::new(&room.room_id, depth)
        .and_then(|tree| tree.root(&room.rate_commitments));

    match root {
        Ok(root) => {
            let expected = root.to_u256();
            let actual = message.proof.signals().root;
            if expected == actual {
                RootCheck::Matched
            } else {
                RootCheck::Mismatched { expected, actual }
            }
        }
        Err(e) => RootCheck::Unavailable(e.to_string()),
    }
}

/// Gate 6, public part: the proof was generated for this room and epoch.
pub fn check_proof_context(room: &Room, message: &Message) -> Result<(), ProofRejection> {
    let proof = &message.proof;

    if proof.rln_identifier != room.room_id {
        return Err(ProofRejection::RlnIdentifierMismatch {
            expected: room.room_id,
            actual: proof.rln_identifier,
        });
    }

    if proof.epoch != U256::from(message.epoch) {
        return Err(ProofRejection::ProofEpochMismatch {
            proof_epoch: proof.epoch,
            message_epoch: message.epoch,
        });
    }

    let expected = expected_external_nullifier(room, message).map_err(field_rejection)?;
    if expected != proof.signals().external_nullifier {
        return Err(ProofRejection::ExternalNullifierMismatch);
    }

    Ok(())
}

/// `Poseidon(epoch, room_id)` for this message.
pub fn expected_external_nullifier(room: &Room, message: &Message) -> Result<U256, CryptoError> {
    let epoch = FieldElement::from_u64(message.epoch);
    let rln_identifier = FieldElement::from_u256(&room.room_id)?;
    external_nullifier(epoch, rln_identifier).map(|n| n.to_u256())
}

fn field_rejection(error: CryptoError) -> ProofRejection {
    ProofRejection::FieldConversion(error.to_string())
}
