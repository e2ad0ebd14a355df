//! # Inbound Ports (Driving Ports / API)

use crate::domain::{RevocationError, RevocationOutcome};
use async_trait::async_trait;
use shared_crypto::FieldElement;
use shared_types::Room;

/// Revocation API.
#[async_trait]
pub trait RevocationApi: Send + Sync {
    /// Ban the identity whose secret is `secret` from `room`.
    ///
    /// The result reflects the local ban only; external removal and the
    /// system notice are best-effort.
    async fn on_secret_recovered(
        &self,
        room: &Room,
        secret: FieldElement,
    ) -> Result<RevocationOutcome, RevocationError>;
}
