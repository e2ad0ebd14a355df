//! # Outbound Ports (Driven Ports / SPI)

use async_trait::async_trait;
use shared_types::{Message, RoomId, U256};
use thiserror::Error;

/// Error from the persisted message history.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HistoryError {
    /// Storage unreachable or timed out
    #[error("History backend unavailable: {0}")]
    Unavailable(String),

    /// Stored message could not be decoded
    #[error("Corrupt history record: {0}")]
    Corrupt(String),
}

/// Read access to persisted room messages.
#[async_trait]
pub trait MessageHistory: Send + Sync {
    /// A persisted message in `room_id` carrying `nullifier`, if any.
    async fn find_prior_by_nullifier(
        &self,
        room_id: &RoomId,
        nullifier: &U256,
    ) -> Result<Option<Message>, HistoryError>;
}
