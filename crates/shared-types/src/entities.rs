//! # Core Domain Entities
//!
//! Rooms and messages as seen by the validation core.
//!
//! ## Ownership
//!
//! - **Room**: owned by external storage; the core only reads snapshots.
//! - **Message**: produced by [`crate::RawMessage::into_message`] at the
//!   boundary, then persisted or relayed by external collaborators.

use crate::field::DecimalField;
use crate::proof::RlnFullProof;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;

// Re-export U256 from primitive-types for use across all subsystems
pub use primitive_types::U256;

/// Room identifier; also the RLN identifier of proofs posted to the room.
pub type RoomId = U256;

/// Discrete rate-limit window index.
pub type Epoch = u64;

/// Epoch length used when a room does not configure one.
pub const DEFAULT_RATE_LIMIT_MS: u64 = 1000;

/// Messages per identity per epoch when a room does not configure a limit.
pub const DEFAULT_USER_MESSAGE_LIMIT: u64 = 1;

/// How a room decides who may post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MembershipType {
    /// No explicit member list.
    #[default]
    Open,
    /// Members are kept in the room's own identity list.
    IdentityList,
    /// Members are mirrored from an external group service.
    #[serde(alias = "BANDADA_GROUP")]
    ExternalGroup,
}

/// Coordinates of a room's group on an external group service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalGroup {
    /// Service host, e.g. `api.groups.example`.
    pub address: String,
    /// Group id on that service.
    pub group_id: String,
    /// Admin API key for membership changes.
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
}

/// Snapshot of a room's configuration and membership.
///
/// `rate_commitments` are the Merkle leaves; `identity_commitments` is the
/// parallel list of raw identity commitments. Bans replace a slot with zero
/// instead of removing it, so the indices of other members never move.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    /// Unique room id.
    #[serde_as(as = "DecimalField")]
    pub room_id: RoomId,
    /// Epoch length in milliseconds.
    #[serde(default = "default_rate_limit_ms", alias = "rateLimit")]
    pub rate_limit_ms: u64,
    /// Messages allowed per identity per epoch.
    #[serde(default = "default_user_message_limit")]
    pub user_message_limit: u64,
    /// Membership policy.
    #[serde(default)]
    pub membership_type: MembershipType,
    /// Merkle leaves: `Poseidon(identity_commitment, user_message_limit)`.
    #[serde_as(as = "Vec<DecimalField>")]
    #[serde(default, alias = "identities")]
    pub rate_commitments: Vec<U256>,
    /// Raw identity commitments, parallel to `rate_commitments`.
    #[serde_as(as = "Vec<DecimalField>")]
    #[serde(default, alias = "semaphoreIdentities")]
    pub identity_commitments: Vec<U256>,
    /// External group backing this room, when `membership_type` says so.
    #[serde(default)]
    pub external_group: Option<ExternalGroup>,
    /// Ephemeral rooms relay messages but never persist them.
    #[serde(default)]
    pub ephemeral: bool,
}

fn default_rate_limit_ms() -> u64 {
    DEFAULT_RATE_LIMIT_MS
}

fn default_user_message_limit() -> u64 {
    DEFAULT_USER_MESSAGE_LIMIT
}

impl Room {
    /// Create a room with default limits and open membership.
    pub fn new(room_id: RoomId) -> Self {
        Self {
            room_id,
            rate_limit_ms: DEFAULT_RATE_LIMIT_MS,
            user_message_limit: DEFAULT_USER_MESSAGE_LIMIT,
            membership_type: MembershipType::Open,
            rate_commitments: Vec::new(),
            identity_commitments: Vec::new(),
            external_group: None,
            ephemeral: false,
        }
    }

    /// Epoch length, falling back to the default for a zero value.
    pub fn effective_rate_limit_ms(&self) -> u64 {
        if self.rate_limit_ms == 0 {
            DEFAULT_RATE_LIMIT_MS
        } else {
            self.rate_limit_ms
        }
    }

    /// Per-epoch quota, never below one.
    pub fn effective_user_message_limit(&self) -> u64 {
        self.user_message_limit.max(1)
    }

    /// Whether the room keeps an explicit membership set.
    pub fn has_identity_set(&self) -> bool {
        matches!(
            self.membership_type,
            MembershipType::IdentityList | MembershipType::ExternalGroup
        )
    }

    /// External group coordinates, only for rooms backed by one.
    pub fn external_group(&self) -> Option<&ExternalGroup> {
        match self.membership_type {
            MembershipType::ExternalGroup => self.external_group.as_ref(),
            _ => None,
        }
    }
}

/// A message that passed boundary parsing.
///
/// The `nullifier` is the RLN nullifier for `(identity secret, epoch)` and is
/// the collision key; clients send it as `messageId`.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Target room.
    #[serde_as(as = "DecimalField")]
    pub room_id: RoomId,
    /// Epoch the sender claims.
    pub epoch: Epoch,
    /// Opaque message content.
    #[serde(rename = "message")]
    pub content: String,
    /// Normalized RLN proof.
    pub proof: RlnFullProof,
    /// RLN nullifier.
    #[serde_as(as = "DecimalField")]
    #[serde(rename = "messageId")]
    pub nullifier: U256,
}

impl Message {
    /// The `(x, y)` share carried by this message's proof.
    pub fn share(&self) -> (U256, U256) {
        self.proof.signals().share()
    }
}
