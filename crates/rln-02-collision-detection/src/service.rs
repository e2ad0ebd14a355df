//! # Collision Detector
//!
//! Implements `CollisionDetectionApi` on top of the persisted history and
//! the shared ephemeral cache.
//!
//! ## Order of operations
//!
//! 1. Query persisted history (suspends; no locks held)
//! 2. Atomically look up and record in the ephemeral cache
//! 3. Surface a history failure only after recording, so a retry of the same
//!    message still collides
//! 4. Prefer the ephemeral match: it is the most recent sighting

use crate::domain::cache::EphemeralMessageCache;
use crate::domain::errors::CollisionError;
use crate::domain::recovery::{classify, CollisionResult};
use crate::ports::inbound::CollisionDetectionApi;
use crate::ports::outbound::MessageHistory;
use async_trait::async_trait;
use shared_types::{Message, Room};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Collision Detection Service.
pub struct CollisionDetector {
    cache: Arc<EphemeralMessageCache>,
    history: Arc<dyn MessageHistory>,
}

impl CollisionDetector {
    /// Create a detector over a shared cache.
    pub fn new(cache: Arc<EphemeralMessageCache>, history: Arc<dyn MessageHistory>) -> Self {
        Self { cache, history }
    }

    /// The cache this detector records into.
    pub fn cache(&self) -> &Arc<EphemeralMessageCache> {
        &self.cache
    }
}

#[async_trait]
impl CollisionDetectionApi for CollisionDetector {
    async fn detect(
        &self,
        room: &Room,
        message: &Message,
    ) -> Result<CollisionResult, CollisionError> {
        let persisted = self
            .history
            .find_prior_by_nullifier(&room.room_id, &message.nullifier)
            .await;

        let ephemeral = self.cache.lookup_and_record(room, message);

        let persisted = persisted.map_err(|e| {
            error!(
                room_id = %room.room_id,
                nullifier = %message.nullifier,
                error = %e,
                "History lookup failed; refusing to treat message as collision-free"
            );
            CollisionError::HistoryUnavailable(e.to_string())
        })?;

        let Some(prior) = ephemeral.or(persisted) else {
            debug!(
                room_id = %room.room_id,
                epoch = message.epoch,
                nullifier = %message.nullifier,
                "No collision"
            );
            return Ok(CollisionResult::NoCollision);
        };

        let result = classify(message, prior);
        match &result {
            CollisionResult::RateLimitViolation { .. } => warn!(
                room_id = %room.room_id,
                epoch = message.epoch,
                nullifier = %message.nullifier,
                "Rate limit exceeded; secret recovered"
            ),
            CollisionResult::DuplicateResubmission { .. } => warn!(
                room_id = %room.room_id,
                epoch = message.epoch,
                nullifier = %message.nullifier,
                "Duplicate resubmission; no secret recoverable"
            ),
            CollisionResult::NoCollision => {}
        }
        Ok(result)
    }
}
