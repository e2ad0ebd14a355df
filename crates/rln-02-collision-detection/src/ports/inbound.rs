//! # Inbound Ports (Driving Ports / API)

use crate::domain::{CollisionError, CollisionResult};
use async_trait::async_trait;
use shared_types::{Message, Room};

/// Collision Detection API.
///
/// Callers must only pass messages whose proof already verified.
#[async_trait]
pub trait CollisionDetectionApi: Send + Sync {
    /// Look for an earlier message under the same nullifier, record this
    /// one, and classify the result.
    async fn detect(&self, room: &Room, message: &Message)
        -> Result<CollisionResult, CollisionError>;
}
