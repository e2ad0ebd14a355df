//! # Message Validation Service
//!
//! Drives one message through the relay's anti-spam pipeline:
//!
//! ```text
//! Received ──proof invalid──────────────────────→ RejectedInvalidProof
//!    │
//!    └─proof valid─→ collision check
//!                      ├─ none ──→ persist* ─────→ Accepted ─→ broadcast
//!                      ├─ duplicate ─────────────→ RejectedDuplicate
//!                      └─ violation ─→ revoke ───→ RejectedBanned
//!
//! * skipped for ephemeral rooms
//! ```
//!
//! Collaborator failures abort with an error and never yield `Accepted`.

use crate::domain::{ValidationError, ValidationOutcome};
use crate::ports::inbound::MessageValidationApi;
use crate::ports::outbound::{MessageStore, RelaySink, RoomDirectory};
use async_trait::async_trait;
use rln_01_proof_verification::{ProofRejection, ProofVerificationApi};
use rln_02_collision_detection::{CollisionDetectionApi, CollisionResult};
use rln_03_revocation::RevocationApi;
use rln_telemetry::{metric_inc, MESSAGES_VALIDATED, PROOF_REJECTIONS};
use shared_types::{Message, RawMessage, Room, WireError};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Message Validation Service.
pub struct MessageValidationService {
    verifier: Arc<dyn ProofVerificationApi>,
    detector: Arc<dyn CollisionDetectionApi>,
    revocation: Arc<dyn RevocationApi>,
    store: Arc<dyn MessageStore>,
    rooms: Arc<dyn RoomDirectory>,
    relay: Arc<dyn RelaySink>,
}

impl MessageValidationService {
    /// Create a new validation service.
    pub fn new(
        verifier: Arc<dyn ProofVerificationApi>,
        detector: Arc<dyn CollisionDetectionApi>,
        revocation: Arc<dyn RevocationApi>,
        store: Arc<dyn MessageStore>,
        rooms: Arc<dyn RoomDirectory>,
        relay: Arc<dyn RelaySink>,
    ) -> Self {
        Self {
            verifier,
            detector,
            revocation,
            store,
            rooms,
            relay,
        }
    }

    async fn run(&self, room: &Room, message: &Message) -> Result<ValidationOutcome, ValidationError> {
        if let Err(rejection) = self.verifier.check(room, message).await {
            return Ok(ValidationOutcome::RejectedInvalidProof(rejection));
        }

        match self.detector.detect(room, message).await? {
            CollisionResult::NoCollision => {
                if !room.ephemeral {
                    self.store.persist_message(&room.room_id, message).await?;
                }
                Ok(ValidationOutcome::Accepted)
            }
            CollisionResult::DuplicateResubmission { .. } => {
                info!(
                    room_id = %room.room_id,
                    nullifier = %message.nullifier,
                    "Duplicate message dropped"
                );
                Ok(ValidationOutcome::RejectedDuplicate)
            }
            CollisionResult::RateLimitViolation { secret, .. } => {
                warn!(
                    room_id = %room.room_id,
                    epoch = message.epoch,
                    nullifier = %message.nullifier,
                    "Rate limit exceeded; revoking sender"
                );
                let outcome = self
                    .revocation
                    .on_secret_recovered(room, secret.secret)
                    .await?;
                // Dropping the handle detaches the external removal.
                Ok(ValidationOutcome::RejectedBanned {
                    identity_commitment: outcome.commitments.identity_commitment,
                    rate_commitment: outcome.commitments.rate_commitment,
                })
            }
        }
    }

    fn record(result: &Result<ValidationOutcome, ValidationError>) {
        let label = match result {
            Ok(outcome) => outcome.label(),
            Err(e) => e.label(),
        };
        metric_inc!(MESSAGES_VALIDATED, &[label]);
    }

    fn malformed(error: WireError) -> ValidationOutcome {
        let rejection = ProofRejection::from(error);
        metric_inc!(PROOF_REJECTIONS, &[rejection.reason()]);
        debug!(reason = %rejection, "Malformed message rejected");
        ValidationOutcome::RejectedInvalidProof(rejection)
    }
}

#[async_trait]
impl MessageValidationApi for MessageValidationService {
    async fn validate(
        &self,
        room: &Room,
        message: &Message,
    ) -> Result<ValidationOutcome, ValidationError> {
        let result = self.run(room, message).await;
        Self::record(&result);

        match &result {
            Ok(outcome) => debug!(
                room_id = %room.room_id,
                epoch = message.epoch,
                outcome = outcome.label(),
                "Message validated"
            ),
            Err(e) => error!(
                room_id = %room.room_id,
                epoch = message.epoch,
                error = %e,
                "Message validation aborted"
            ),
        }

        result
    }

    async fn handle_inbound(&self, raw: RawMessage) -> Result<ValidationOutcome, ValidationError> {
        let Some(room_id) = raw.room_id else {
            let outcome = Self::malformed(WireError::MissingField("roomId"));
            Self::record(&Ok(outcome.clone()));
            return Ok(outcome);
        };

        let room = match self.rooms.current_membership_snapshot(&room_id).await {
            Ok(room) => room,
            Err(e) => {
                let result = Err(ValidationError::from(e));
                Self::record(&result);
                return result;
            }
        };

        let message = match raw.into_message() {
            Ok(message) => message,
            Err(e) => {
                let outcome = Self::malformed(e);
                Self::record(&Ok(outcome.clone()));
                return Ok(outcome);
            }
        };

        let outcome = self.validate(&room, &message).await?;

        if outcome.is_accepted() {
            // Already persisted: a failed fan-out does not undo acceptance.
            if let Err(e) = self.relay.broadcast(&room.room_id, &message).await {
                warn!(
                    room_id = %room.room_id,
                    nullifier = %message.nullifier,
                    error = %e,
                    "Broadcast of accepted message failed"
                );
            }
        }

        Ok(outcome)
    }
}
