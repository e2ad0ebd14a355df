//! # Outbound Ports (Driven Ports / SPI)
//!
//! Stores and services the revocation handler writes to.

use async_trait::async_trait;
use shared_types::{ExternalGroup, RoomId, U256};
use thiserror::Error;

/// Effect of a ban request on the membership store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BanStatus {
    /// Slots were zeroed by this call.
    Banned,
    /// This identity was banned here before; nothing changed.
    AlreadyBanned,
    /// The local set holds no slot for this identity (open rooms, or a
    /// mirror lagging its external group). Recorded as a fresh ban.
    NotMember,
}

impl BanStatus {
    /// Whether this call is the first ban of the identity in the room.
    pub fn is_fresh(self) -> bool {
        !matches!(self, BanStatus::AlreadyBanned)
    }
}

/// Error from the membership store.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MembershipError {
    /// Room does not exist
    #[error("Room not found: {0}")]
    RoomNotFound(RoomId),

    /// Store unreachable or write failed
    #[error("Membership store unavailable: {0}")]
    Unavailable(String),
}

/// Room membership storage.
#[async_trait]
pub trait MembershipStore: Send + Sync {
    /// Replace the identity's slot and its rate-commitment slot with zero.
    ///
    /// Must be idempotent: banning a banned identity returns
    /// [`BanStatus::AlreadyBanned`], never an error. An identity with no slot
    /// to zero is [`BanStatus::NotMember`] the first time and
    /// [`BanStatus::AlreadyBanned`] after that. Set size never changes.
    async fn ban_identity(
        &self,
        room_id: &RoomId,
        identity_commitment: &U256,
        rate_commitment: &U256,
    ) -> Result<BanStatus, MembershipError>;
}

/// Error from the external group service.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExternalGroupError {
    /// Room has no admin API key configured
    #[error("No API key configured for group {0}")]
    MissingApiKey(String),

    /// Service could not be reached
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Request failed before a response arrived
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Service answered with a non-success status
    #[error("Group service returned {status}: {body}")]
    Status { status: u16, body: String },
}

/// Membership mirror on an external group service.
#[async_trait]
pub trait ExternalGroupClient: Send + Sync {
    /// Remove `rate_commitment` from `group`.
    async fn remove_member(
        &self,
        group: &ExternalGroup,
        rate_commitment: &U256,
    ) -> Result<(), ExternalGroupError>;
}

/// Error from the system notice sink.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Failed to record system notice: {0}")]
pub struct NoticeError(pub String);

/// Writes relay-authored messages into a room.
#[async_trait]
pub trait SystemNoticeSink: Send + Sync {
    async fn record_system_message(&self, room_id: &RoomId, text: &str) -> Result<(), NoticeError>;
}
