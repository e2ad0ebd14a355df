//! # Collision Detection Errors

use thiserror::Error;

/// Errors that prevent a collision verdict.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CollisionError {
    /// Persisted history could not be queried; the message must not be
    /// treated as collision-free.
    #[error("Message history unavailable: {0}")]
    HistoryUnavailable(String),
}
