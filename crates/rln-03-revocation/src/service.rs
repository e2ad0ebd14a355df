//! # Revocation Handler
//!
//! Turns a recovered secret into a ban.
//!
//! 1. Derive the identity commitment and rate commitment
//! 2. Zero both slots in the membership store (authoritative)
//! 3. Repeat bans stop here
//! 4. External group rooms: remove the member remotely on a detached task
//! 5. Persistent rooms: record a system notice

use crate::domain::{ban_notice, derive_commitments, RevocationError, RevocationOutcome};
use crate::ports::inbound::RevocationApi;
use crate::ports::outbound::{BanStatus, ExternalGroupClient, MembershipStore, SystemNoticeSink};
use async_trait::async_trait;
use rln_telemetry::IDENTITIES_BANNED;
use shared_crypto::FieldElement;
use shared_types::Room;
use std::sync::Arc;
use tracing::{info, warn};

/// Revocation Service.
pub struct RevocationHandler {
    membership: Arc<dyn MembershipStore>,
    external_groups: Arc<dyn ExternalGroupClient>,
    notices: Arc<dyn SystemNoticeSink>,
}

impl RevocationHandler {
    /// Create a new revocation handler.
    pub fn new(
        membership: Arc<dyn MembershipStore>,
        external_groups: Arc<dyn ExternalGroupClient>,
        notices: Arc<dyn SystemNoticeSink>,
    ) -> Self {
        Self {
            membership,
            external_groups,
            notices,
        }
    }
}

#[async_trait]
impl RevocationApi for RevocationHandler {
    async fn on_secret_recovered(
        &self,
        room: &Room,
        secret: FieldElement,
    ) -> Result<RevocationOutcome, RevocationError> {
        let commitments = derive_commitments(room, secret)?;
        let idc = commitments.identity_commitment;
        let rc = commitments.rate_commitment;

        let status = self.membership.ban_identity(&room.room_id, &idc, &rc).await?;
        match status {
            BanStatus::Banned => info!(
                room_id = %room.room_id,
                identity_commitment = %idc,
                rate_commitment = %rc,
                "Identity banned"
            ),
            BanStatus::NotMember => info!(
                room_id = %room.room_id,
                identity_commitment = %idc,
                rate_commitment = %rc,
                "Identity banned with no local slot"
            ),
            BanStatus::AlreadyBanned => info!(
                room_id = %room.room_id,
                identity_commitment = %idc,
                "Identity already banned"
            ),
        }
        if !status.is_fresh() {
            return Ok(RevocationOutcome {
                commitments,
                status,
                notice_recorded: false,
                external_removal: None,
            });
        }
        IDENTITIES_BANNED.inc();

        let external_removal = room.external_group().cloned().map(|group| {
            let client = Arc::clone(&self.external_groups);
            let room_id = room.room_id;
            tokio::spawn(async move {
                let result = client.remove_member(&group, &rc).await;
                if let Err(e) = &result {
                    warn!(
                        %room_id,
                        group_id = %group.group_id,
                        rate_commitment = %rc,
                        error = %e,
                        "External group removal failed; local ban stands"
                    );
                }
                result
            })
        });

        let mut notice_recorded = false;
        if !room.ephemeral {
            match self
                .notices
                .record_system_message(&room.room_id, &ban_notice(&commitments))
                .await
            {
                Ok(()) => notice_recorded = true,
                Err(e) => warn!(room_id = %room.room_id, error = %e, "Ban notice not recorded"),
            }
        }

        Ok(RevocationOutcome {
            commitments,
            status,
            notice_recorded,
            external_removal,
        })
    }
}
