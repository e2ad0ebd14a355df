//! # Wire Form
//!
//! [`RawMessage`] mirrors what a transport hands the core: every field is
//! optional and the proof may be an object or a string. Parsing happens once;
//! nothing past this module branches on representation.

use crate::entities::{Epoch, Message, RoomId, U256};
use crate::errors::WireError;
use crate::field::DecimalField;
use crate::proof::ProofPayload;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;

/// A message exactly as received from the transport.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMessage {
    /// Target room.
    #[serde_as(as = "Option<DecimalField>")]
    #[serde(default)]
    pub room_id: Option<RoomId>,
    /// Claimed epoch.
    #[serde(default)]
    pub epoch: Option<Epoch>,
    /// Message content.
    #[serde(default, rename = "message")]
    pub content: Option<String>,
    /// Proof object or JSON-encoded proof.
    #[serde(default)]
    pub proof: Option<serde_json::Value>,
    /// RLN nullifier; clients call it `messageId`.
    #[serde_as(as = "Option<DecimalField>")]
    #[serde(default, rename = "messageId", alias = "nullifier")]
    pub nullifier: Option<U256>,
}

impl RawMessage {
    /// Check required fields and normalize the proof.
    ///
    /// When `messageId` is absent the nullifier is taken from the proof's
    /// public signals. Any failure is a malformed-input rejection.
    pub fn into_message(self) -> Result<Message, WireError> {
        let room_id = self.room_id.ok_or(WireError::MissingField("roomId"))?;
        let epoch = self.epoch.ok_or(WireError::MissingField("epoch"))?;
        let content = self
            .content
            .filter(|content| !content.is_empty())
            .ok_or(WireError::MissingField("message"))?;
        let proof_value = self.proof.ok_or(WireError::MissingField("proof"))?;

        let payload: ProofPayload = serde_json::from_value(proof_value)
            .map_err(|e| WireError::MalformedProof(e.to_string()))?;
        let proof = payload.into_proof()?;

        let nullifier = self
            .nullifier
            .unwrap_or(proof.snark_proof.public_signals.nullifier);

        Ok(Message {
            room_id,
            epoch,
            content,
            proof,
            nullifier,
        })
    }
}

impl From<Message> for RawMessage {
    fn from(message: Message) -> Self {
        Self {
            room_id: Some(message.room_id),
            epoch: Some(message.epoch),
            content: Some(message.content),
            proof: serde_json::to_value(&message.proof).ok(),
            nullifier: Some(message.nullifier),
        }
    }
}
