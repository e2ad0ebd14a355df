use crate::ports::outbound::{DirectoryError, StoreError};
use rln_02_collision_detection::CollisionError;
use rln_03_revocation::RevocationError;
use shared_types::RoomId;
use thiserror::Error;

/// Failures that stop the pipeline without a verdict.
///
/// No variant ever means "accepted": callers must drop the message.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Message names a room the directory does not know
    #[error("Unknown room: {0}")]
    UnknownRoom(RoomId),

    /// A backing store or service could not be reached
    #[error("{collaborator} unavailable: {reason}")]
    CollaboratorUnavailable {
        collaborator: &'static str,
        reason: String,
    },

    /// Secret recovered but the ban could not be derived
    #[error("Revocation failed: {0}")]
    Revocation(String),

    /// Pipeline could not be assembled
    #[error("Startup failed: {0}")]
    Startup(String),
}

impl ValidationError {
    /// Metric label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::UnknownRoom(_) => "unknown_room",
            Self::CollaboratorUnavailable { .. } => "unavailable",
            Self::Revocation(_) => "revocation_failed",
            Self::Startup(_) => "startup_failed",
        }
    }
}

impl From<CollisionError> for ValidationError {
    fn from(e: CollisionError) -> Self {
        match e {
            CollisionError::HistoryUnavailable(reason) => Self::CollaboratorUnavailable {
                collaborator: "message history",
                reason,
            },
        }
    }
}

impl From<RevocationError> for ValidationError {
    fn from(e: RevocationError) -> Self {
        match e {
            RevocationError::Membership(inner) => Self::CollaboratorUnavailable {
                collaborator: "membership store",
                reason: inner.to_string(),
            },
            RevocationError::Derivation(inner) => Self::Revocation(inner.to_string()),
        }
    }
}

impl From<StoreError> for ValidationError {
    fn from(e: StoreError) -> Self {
        Self::CollaboratorUnavailable {
            collaborator: "message store",
            reason: e.to_string(),
        }
    }
}

impl From<DirectoryError> for ValidationError {
    fn from(e: DirectoryError) -> Self {
        match e {
            DirectoryError::RoomNotFound(room_id) => Self::UnknownRoom(room_id),
            DirectoryError::Unavailable(reason) => Self::CollaboratorUnavailable {
                collaborator: "room directory",
                reason,
            },
        }
    }
}
