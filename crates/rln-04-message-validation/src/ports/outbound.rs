//! # Outbound Ports (Driven Ports / SPI)
//!
//! Persistence, room lookup and fan-out used by the orchestrator.

use async_trait::async_trait;
use shared_types::{Message, Room, RoomId};
use thiserror::Error;

/// Error from the message store.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Message store write failed: {0}")]
pub struct StoreError(pub String);

/// Durable storage for accepted messages.
///
/// Whatever is written here must be visible to
/// [`rln_02_collision_detection::MessageHistory`] afterwards.
#[async_trait]
pub trait MessageStore: Send + Sync {
    async fn persist_message(&self, room_id: &RoomId, message: &Message) -> Result<(), StoreError>;
}

/// Error from the room directory.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DirectoryError {
    /// No such room
    #[error("Room not found: {0}")]
    RoomNotFound(RoomId),

    /// Directory unreachable
    #[error("Room directory unavailable: {0}")]
    Unavailable(String),
}

/// Source of room configuration and membership.
#[async_trait]
pub trait RoomDirectory: Send + Sync {
    /// Current snapshot, including bans applied so far.
    async fn current_membership_snapshot(&self, room_id: &RoomId) -> Result<Room, DirectoryError>;
}

/// Error from the relay sink.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Broadcast failed: {0}")]
pub struct RelayError(pub String);

/// Fan-out of accepted messages to room subscribers.
#[async_trait]
pub trait RelaySink: Send + Sync {
    async fn broadcast(&self, room_id: &RoomId, message: &Message) -> Result<(), RelayError>;
}
