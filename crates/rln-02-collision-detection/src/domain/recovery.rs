//! # Collision Classification
//!
//! Two messages under one nullifier are two points on the sender's line.
//! Distinct `x` values reveal the line's intercept, which is the sender's
//! identity secret. Equal `x` values mean the same content was sent twice
//! and nothing can be recovered.

use shared_crypto::{recover_secret, CryptoError, FieldElement, Share};
use shared_types::{Message, RoomId, U256};

/// A secret recovered from a rate-limit violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveredSecret {
    /// The offender's identity secret.
    pub secret: FieldElement,
    /// Room the violation happened in.
    pub room_id: RoomId,
    /// Nullifier both messages share.
    pub nullifier: U256,
}

/// Outcome of collision detection for one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollisionResult {
    /// First sighting of this nullifier.
    NoCollision,
    /// Quota exceeded and the secret recovered.
    RateLimitViolation {
        secret: RecoveredSecret,
        conflicting: Box<Message>,
    },
    /// Same point submitted again; no secret recoverable.
    DuplicateResubmission { conflicting: Box<Message> },
}

impl CollisionResult {
    /// Whether a prior message was found.
    pub fn is_collision(&self) -> bool {
        !matches!(self, Self::NoCollision)
    }
}

/// Classify a collision between `incoming` and the earlier `prior`.
pub fn classify(incoming: &Message, prior: Message) -> CollisionResult {
    match recover_from(incoming, &prior) {
        Ok(secret) => CollisionResult::RateLimitViolation {
            secret: RecoveredSecret {
                secret,
                room_id: incoming.room_id,
                nullifier: incoming.nullifier,
            },
            conflicting: Box::new(prior),
        },
        Err(_) => CollisionResult::DuplicateResubmission {
            conflicting: Box::new(prior),
        },
    }
}

fn recover_from(incoming: &Message, prior: &Message) -> Result<FieldElement, CryptoError> {
    let new_share = share_of(incoming)?;
    let old_share = share_of(prior)?;
    recover_secret(new_share, old_share)
}

fn share_of(message: &Message) -> Result<Share, CryptoError> {
    let (x, y) = message.share();
    Ok((FieldElement::from_u256(&x)?, FieldElement::from_u256(&y)?))
}
