//! # Proof Verification Service
//!
//! Application service layer that implements the `ProofVerificationApi` trait.
//!
//! ## Architecture
//!
//! This is the hexagonal "application service" that:
//! - Implements the inbound port (`ProofVerificationApi`)
//! - Reads the clock through `TimeSource`
//! - Delegates the final verdict to the `SnarkVerifier` outbound port
//!
//! Gates run in order and stop at the first failure:
//!
//! 1. room id
//! 2. epoch window
//! 3. hash binding and nullifier consistency
//! 4. membership root (advisory, logged only)
//! 5. RLN identifier, proof epoch, external nullifier
//! 6. SNARK verification, bounded by the configured timeout

use crate::config::VerifierConfig;
use crate::domain::epoch::EpochWindow;
use crate::domain::errors::ProofRejection;
use crate::domain::gates::{self, RootCheck};
use crate::ports::inbound::ProofVerificationApi;
use crate::ports::outbound::{SnarkVerifier, TimeSource};
use async_trait::async_trait;
use rln_telemetry::PROOF_REJECTIONS;
use shared_types::{Message, Room};
use std::sync::Arc;
use tracing::{debug, warn};

/// Proof Verification Service.
pub struct ProofVerificationService {
    snark: Arc<dyn SnarkVerifier>,
    clock: Arc<dyn TimeSource>,
    config: VerifierConfig,
}

impl ProofVerificationService {
    /// Create a new proof verification service.
    pub fn new(
        snark: Arc<dyn SnarkVerifier>,
        clock: Arc<dyn TimeSource>,
        config: VerifierConfig,
    ) -> Self {
        Self {
            snark,
            clock,
            config,
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    /// Epoch window for `room` right now.
    pub fn window_for(&self, room: &Room) -> EpochWindow {
        EpochWindow::at(
            self.clock.now_ms(),
            room.effective_rate_limit_ms(),
            self.config.epoch_error_range,
        )
    }

    async fn run_gates(&self, room: &Room, message: &Message) -> Result<(), ProofRejection> {
        gates::check_room(room, message)?;
        gates::check_epoch(&self.window_for(room), message)?;
        gates::check_binding(message)?;

        match gates::check_membership_root(room, message, self.config.merkle_depth) {
            RootCheck::Mismatched { expected, actual } => warn!(
                room_id = %room.room_id,
                %expected,
                %actual,
                "Membership root mismatch; group may be stale, deferring to SNARK verifier"
            ),
            RootCheck::Unavailable(reason) => warn!(
                room_id = %room.room_id,
                %reason,
                "Could not compute membership root"
            ),
            RootCheck::Matched | RootCheck::Skipped => {}
        }

        gates::check_proof_context(room, message)?;
        self.verify_snark(room, message).await
    }

    async fn verify_snark(&self, room: &Room, message: &Message) -> Result<(), ProofRejection> {
        let verification = self.snark.verify(&room.room_id, &message.proof);

        let verdict = match self.config.snark_timeout {
            Some(limit) => tokio::time::timeout(limit, verification)
                .await
                .map_err(|_| ProofRejection::SnarkTimeout)?,
            None => verification.await,
        };

        match verdict {
            Ok(true) => Ok(()),
            Ok(false) => Err(ProofRejection::SnarkRejected),
            Err(e) => Err(ProofRejection::SnarkFailed(e.to_string())),
        }
    }
}

#[async_trait]
impl ProofVerificationApi for ProofVerificationService {
    async fn check(&self, room: &Room, message: &Message) -> Result<(), ProofRejection> {
        let result = self.run_gates(room, message).await;

        match &result {
            Ok(()) => debug!(
                room_id = %room.room_id,
                epoch = message.epoch,
                nullifier = %message.nullifier,
                "Proof verified"
            ),
            Err(rejection) => {
                PROOF_REJECTIONS
                    .with_label_values(&[rejection.reason()])
                    .inc();
                warn!(
                    room_id = %room.room_id,
                    epoch = message.epoch,
                    nullifier = %message.nullifier,
                    reason = rejection.reason(),
                    "Proof rejected: {}",
                    rejection
                );
            }
        }

        result
    }
}
