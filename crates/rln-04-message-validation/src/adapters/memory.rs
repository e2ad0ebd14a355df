//! # In-Memory Relay Store
//!
//! One shared store backing every persistence port the pipeline needs:
//! rooms, message history, bans and system notices. Used by single-node
//! deployments without a database and by tests.

use crate::ports::outbound::{
    DirectoryError, MessageStore, RelayError, RelaySink, RoomDirectory, StoreError,
};
use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use rln_02_collision_detection::{HistoryError, MessageHistory};
use rln_03_revocation::{
    BanStatus, ExternalGroupClient, ExternalGroupError, MembershipError, MembershipStore,
    NoticeError, SystemNoticeSink,
};
use shared_types::{ExternalGroup, Message, Room, RoomId, U256};
use std::collections::{HashMap, HashSet};

/// Rooms, messages and notices held in process memory.
#[derive(Default)]
pub struct InMemoryRelayStore {
    rooms: RwLock<HashMap<RoomId, Room>>,
    messages: RwLock<HashMap<RoomId, Vec<Message>>>,
    notices: RwLock<Vec<(RoomId, String)>>,
    banned: Mutex<HashSet<(RoomId, U256)>>,
}

impl InMemoryRelayStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or replace a room.
    pub fn upsert_room(&self, room: Room) {
        self.rooms.write().insert(room.room_id, room);
    }

    pub fn room(&self, room_id: &RoomId) -> Option<Room> {
        self.rooms.read().get(room_id).cloned()
    }

    /// Persisted messages of a room, oldest first.
    pub fn messages(&self, room_id: &RoomId) -> Vec<Message> {
        self.messages
            .read()
            .get(room_id)
            .cloned()
            .unwrap_or_default()
    }

    /// System notices of a room, oldest first.
    pub fn notices(&self, room_id: &RoomId) -> Vec<String> {
        self.notices
            .read()
            .iter()
            .filter(|(id, _)| id == room_id)
            .map(|(_, text)| text.clone())
            .collect()
    }
}

#[async_trait]
impl RoomDirectory for InMemoryRelayStore {
    async fn current_membership_snapshot(&self, room_id: &RoomId) -> Result<Room, DirectoryError> {
        self.room(room_id)
            .ok_or(DirectoryError::RoomNotFound(*room_id))
    }
}

#[async_trait]
impl MessageStore for InMemoryRelayStore {
    async fn persist_message(&self, room_id: &RoomId, message: &Message) -> Result<(), StoreError> {
        self.messages
            .write()
            .entry(*room_id)
            .or_default()
            .push(message.clone());
        Ok(())
    }
}

#[async_trait]
impl MessageHistory for InMemoryRelayStore {
    async fn find_prior_by_nullifier(
        &self,
        room_id: &RoomId,
        nullifier: &U256,
    ) -> Result<Option<Message>, HistoryError> {
        Ok(self.messages.read().get(room_id).and_then(|messages| {
            messages
                .iter()
                .rev()
                .find(|m| m.nullifier == *nullifier)
                .cloned()
        }))
    }
}

#[async_trait]
impl MembershipStore for InMemoryRelayStore {
    async fn ban_identity(
        &self,
        room_id: &RoomId,
        identity_commitment: &U256,
        rate_commitment: &U256,
    ) -> Result<BanStatus, MembershipError> {
        let mut rooms = self.rooms.write();
        let room = rooms
            .get_mut(room_id)
            .ok_or(MembershipError::RoomNotFound(*room_id))?;

        let zeroed = zero_matching(&mut room.identity_commitments, identity_commitment)
            + zero_matching(&mut room.rate_commitments, rate_commitment);
        let first_ban = self.banned.lock().insert((*room_id, *rate_commitment));

        Ok(match (zeroed > 0, first_ban) {
            (true, _) => BanStatus::Banned,
            (false, true) => BanStatus::NotMember,
            (false, false) => BanStatus::AlreadyBanned,
        })
    }
}

#[async_trait]
impl SystemNoticeSink for InMemoryRelayStore {
    async fn record_system_message(&self, room_id: &RoomId, text: &str) -> Result<(), NoticeError> {
        self.notices.write().push((*room_id, text.to_string()));
        Ok(())
    }
}

/// Replace every slot equal to `target` with zero, keeping positions.
fn zero_matching(slots: &mut [U256], target: &U256) -> usize {
    if target.is_zero() {
        return 0;
    }
    let mut count = 0;
    for slot in slots.iter_mut().filter(|slot| *slot == target) {
        *slot = U256::zero();
        count += 1;
    }
    count
}

/// Relay sink that keeps every broadcast.
#[derive(Default)]
pub struct RecordingRelay {
    broadcasts: Mutex<Vec<(RoomId, Message)>>,
}

impl RecordingRelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn broadcasts(&self) -> Vec<(RoomId, Message)> {
        self.broadcasts.lock().clone()
    }
}

#[async_trait]
impl RelaySink for RecordingRelay {
    async fn broadcast(&self, room_id: &RoomId, message: &Message) -> Result<(), RelayError> {
        self.broadcasts.lock().push((*room_id, message.clone()));
        Ok(())
    }
}

/// External group client that records removals instead of calling out.
#[derive(Default)]
pub struct RecordingExternalGroups {
    removals: Mutex<Vec<(String, U256)>>,
    failure: Mutex<Option<ExternalGroupError>>,
}

impl RecordingExternalGroups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every later removal fail with `error`.
    pub fn fail_with(&self, error: ExternalGroupError) {
        *self.failure.lock() = Some(error);
    }

    /// `(group_id, rate_commitment)` pairs removed so far.
    pub fn removals(&self) -> Vec<(String, U256)> {
        self.removals.lock().clone()
    }
}

#[async_trait]
impl ExternalGroupClient for RecordingExternalGroups {
    async fn remove_member(
        &self,
        group: &ExternalGroup,
        rate_commitment: &U256,
    ) -> Result<(), ExternalGroupError> {
        if let Some(error) = self.failure.lock().clone() {
            return Err(error);
        }
        self.removals
            .lock()
            .push((group.group_id.clone(), *rate_commitment));
        Ok(())
    }
}
