//! # Inbound Ports (Driving Ports / API)
//!
//! Traits that define the public API of this subsystem.

use crate::domain::errors::ProofRejection;
use async_trait::async_trait;
use shared_types::{Message, Room};

/// Primary Proof Verification API.
///
/// Verification is a predicate: it never faults. Implementations must be
/// thread-safe (`Send + Sync`).
#[async_trait]
pub trait ProofVerificationApi: Send + Sync {
    /// Run every gate and report the first rejection.
    async fn check(&self, room: &Room, message: &Message) -> Result<(), ProofRejection>;

    /// `true` iff [`check`](Self::check) passes.
    async fn verify(&self, room: &Room, message: &Message) -> bool {
        self.check(room, message).await.is_ok()
    }
}
