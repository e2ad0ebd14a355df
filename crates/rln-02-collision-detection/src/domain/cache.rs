//! # Ephemeral Message Cache
//!
//! Process-wide record of the most recent message seen under each
//! `(room_id, epoch, nullifier)` key. Catches collisions between messages
//! that were never persisted (ephemeral rooms, or two messages racing within
//! the same tick).
//!
//! ## Concurrency
//!
//! Keys are spread over a fixed set of shards, each behind its own
//! `parking_lot::Mutex`. [`EphemeralMessageCache::lookup_and_record`] holds
//! the key's shard lock across the lookup and the insert, so for one key at
//! most one caller ever observes "nothing recorded". Recording is a single
//! `HashMap::insert`; an abandoned caller cannot leave a partial entry.
//!
//! ## Expiry
//!
//! An entry expires once its epoch falls out of the tolerance window:
//! at `(epoch + tolerance + 1) * rate_limit_ms`. [`EphemeralMessageCache::sweep`]
//! drops expired entries; [`spawn_sweeper`] runs it periodically.

use parking_lot::Mutex;
use rln_01_proof_verification::TimeSource;
use rln_telemetry::EPHEMERAL_CACHE_ENTRIES;
use shared_types::{Epoch, Message, Room, RoomId, U256};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

/// Number of independently locked shards.
pub const SHARD_COUNT: usize = 16;

/// Collision key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub room_id: RoomId,
    pub epoch: Epoch,
    pub nullifier: U256,
}

impl CacheKey {
    pub fn new(room_id: RoomId, epoch: Epoch, nullifier: U256) -> Self {
        Self {
            room_id,
            epoch,
            nullifier,
        }
    }

    /// Key a message is recorded under.
    pub fn for_message(message: &Message) -> Self {
        Self::new(message.room_id, message.epoch, message.nullifier)
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    message: Message,
    expires_at_ms: u64,
}

type Shard = Mutex<HashMap<CacheKey, CacheEntry>>;

/// Sharded, expiring message cache.
pub struct EphemeralMessageCache {
    shards: Vec<Shard>,
    tolerance: u64,
}

impl EphemeralMessageCache {
    /// Create an empty cache that keeps entries for `tolerance` epochs past
    /// their own.
    pub fn new(tolerance: u64) -> Self {
        Self {
            shards: (0..SHARD_COUNT).map(|_| Mutex::new(HashMap::new())).collect(),
            tolerance,
        }
    }

    fn shard(&self, key: &CacheKey) -> &Shard {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        &self.shards[(hasher.finish() as usize) % SHARD_COUNT]
    }

    fn entry_for(&self, room: &Room, message: &Message) -> CacheEntry {
        let expires_at_epoch = message
            .epoch
            .saturating_add(self.tolerance)
            .saturating_add(1);
        CacheEntry {
            message: message.clone(),
            expires_at_ms: expires_at_epoch.saturating_mul(room.effective_rate_limit_ms()),
        }
    }

    /// Most recent message recorded under the key.
    pub fn lookup(&self, room_id: &RoomId, epoch: Epoch, nullifier: &U256) -> Option<Message> {
        let key = CacheKey::new(*room_id, epoch, *nullifier);
        self.shard(&key)
            .lock()
            .get(&key)
            .map(|entry| entry.message.clone())
    }

    /// Record `message`, replacing any earlier one under the same key.
    pub fn record(&self, room: &Room, message: &Message) {
        let _ = self.lookup_and_record(room, message);
    }

    /// Atomically return the previous message under the key and record
    /// `message` in its place.
    pub fn lookup_and_record(&self, room: &Room, message: &Message) -> Option<Message> {
        let key = CacheKey::for_message(message);
        let entry = self.entry_for(room, message);

        let previous = self.shard(&key).lock().insert(key, entry);
        if previous.is_none() {
            EPHEMERAL_CACHE_ENTRIES.inc();
        }
        previous.map(|entry| entry.message)
    }

    /// Drop entries whose epoch has left the tolerance window.
    ///
    /// Returns the number of entries removed.
    pub fn sweep(&self, now_ms: u64) -> usize {
        let mut removed = 0;
        for shard in &self.shards {
            let mut map = shard.lock();
            let before = map.len();
            map.retain(|_, entry| entry.expires_at_ms > now_ms);
            removed += before - map.len();
        }
        EPHEMERAL_CACHE_ENTRIES.sub(removed as i64);
        removed
    }

    /// Remove every entry.
    pub fn clear(&self) {
        let mut removed = 0;
        for shard in &self.shards {
            let mut map = shard.lock();
            removed += map.len();
            map.clear();
        }
        EPHEMERAL_CACHE_ENTRIES.sub(removed as i64);
    }

    /// Number of recorded messages.
    pub fn len(&self) -> usize {
        self.shards.iter().map(|shard| shard.lock().len()).sum()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Sweep `cache` every `interval` until the returned task is aborted.
pub fn spawn_sweeper(
    cache: Arc<EphemeralMessageCache>,
    interval: Duration,
    clock: Arc<dyn TimeSource>,
) -> JoinHandle<()> {
    let period = interval.max(Duration::from_millis(1));
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            let removed = cache.sweep(clock.now_ms());
            if removed > 0 {
                debug!(removed, remaining = cache.len(), "Swept ephemeral message cache");
            }
        }
    })
}
