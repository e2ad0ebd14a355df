//! # Inbound Ports (Driving Ports / API)

use crate::domain::{ValidationError, ValidationOutcome};
use async_trait::async_trait;
use shared_types::{Message, RawMessage, Room};

/// Message Validation API.
#[async_trait]
pub trait MessageValidationApi: Send + Sync {
    /// Decide the fate of a parsed message against a room snapshot.
    ///
    /// Accepted messages are persisted (unless the room is ephemeral) before
    /// this returns.
    async fn validate(
        &self,
        room: &Room,
        message: &Message,
    ) -> Result<ValidationOutcome, ValidationError>;

    /// Full inbound path: resolve the room, parse, validate, and broadcast
    /// accepted messages.
    async fn handle_inbound(&self, raw: RawMessage) -> Result<ValidationOutcome, ValidationError>;
}
