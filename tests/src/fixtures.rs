//! # Test Fixtures
//!
//! A prover that builds RLN proofs the way clients do, a SNARK verifier that
//! only accepts proofs that prover could really have produced, and a harness
//! running the full relay container over in-memory adapters.
//!
//! The prover computes every public signal honestly. In place of a Groth16
//! proof it registers the proof with [`CircuitOracle`], and only when the
//! sender's rate commitment is in the room: exactly the proofs the real
//! circuit would let a member generate.

use async_trait::async_trait;
use parking_lot::Mutex;
use rln_01_proof_verification::{MockTimeSource, SnarkError, SnarkVerifier};
use rln_02_collision_detection::MessageHistory;
use rln_04_message_validation::{
    InMemoryRelayStore, RecordingExternalGroups, RecordingRelay, RelayContainer, RelayPorts,
    ValidationConfig,
};
use shared_crypto::{
    external_nullifier, identity_commitment, poseidon_hash, rate_commitment, signal_hash,
    FieldElement, MembershipTree, DEFAULT_TREE_DEPTH,
};
use shared_types::{
    Groth16Proof, MembershipType, Message, PublicSignals, RlnFullProof, Room, RoomId, SnarkProof,
    U256,
};
use std::sync::Arc;

/// Epoch length of every fixture room.
pub const EPOCH_MS: u64 = 1_000;

// =============================================================================
// Identities and rooms
// =============================================================================

/// A group member's secret and public commitment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub secret: FieldElement,
    pub commitment: FieldElement,
}

impl Identity {
    /// Deterministic identity for readable tests.
    pub fn from_seed(seed: u64) -> Self {
        Self::from_secret(FieldElement::from_u64(seed.wrapping_mul(0x9e37_79b9_7f4a_7c15) | 1))
    }

    pub fn random() -> Self {
        Self::from_secret(FieldElement::from_u64(rand::random::<u64>() | 1))
    }

    pub fn from_secret(secret: FieldElement) -> Self {
        let commitment = identity_commitment(secret).expect("identity commitment");
        Self { secret, commitment }
    }

    /// Membership leaf for a room with the given quota.
    pub fn rate_commitment(&self, user_message_limit: u64) -> U256 {
        rate_commitment(self.commitment, user_message_limit)
            .expect("rate commitment")
            .to_u256()
    }
}

/// An identity-list room containing `members`.
pub fn room_with_members(room_id: u64, members: &[Identity]) -> Room {
    let mut room = Room::new(U256::from(room_id));
    room.rate_limit_ms = EPOCH_MS;
    room.membership_type = MembershipType::IdentityList;
    room.identity_commitments = members.iter().map(|m| m.commitment.to_u256()).collect();
    room.rate_commitments = members
        .iter()
        .map(|m| m.rate_commitment(room.effective_user_message_limit()))
        .collect();
    room
}

/// Clock reading in the middle of `epoch`.
pub fn mid_epoch_ms(epoch: u64) -> u64 {
    epoch * EPOCH_MS + EPOCH_MS / 2
}

// =============================================================================
// Circuit oracle
// =============================================================================

/// SNARK verifier accepting exactly the proofs registered by [`TestProver`].
#[derive(Default)]
pub struct CircuitOracle {
    valid: Mutex<Vec<RlnFullProof>>,
}

impl CircuitOracle {
    pub fn new() -> Self {
        Self::default()
    }

    fn register(&self, proof: &RlnFullProof) {
        self.valid.lock().push(proof.clone());
    }

    pub fn registered(&self) -> usize {
        self.valid.lock().len()
    }
}

#[async_trait]
impl SnarkVerifier for CircuitOracle {
    async fn verify(&self, rln_identifier: &U256, proof: &RlnFullProof) -> Result<bool, SnarkError> {
        Ok(proof.rln_identifier == *rln_identifier && self.valid.lock().contains(proof))
    }
}

// =============================================================================
// Prover
// =============================================================================

/// Builds RLN messages for a room snapshot.
pub struct TestProver {
    oracle: Arc<CircuitOracle>,
    depth: usize,
}

impl TestProver {
    pub fn new(oracle: Arc<CircuitOracle>) -> Self {
        Self {
            oracle,
            depth: DEFAULT_TREE_DEPTH,
        }
    }

    /// Produce a message from `identity` in `room` at `epoch`.
    ///
    /// Non-members still get a message with honest public signals, but the
    /// oracle will not accept its proof.
    pub fn prove(&self, room: &Room, identity: &Identity, epoch: u64, content: &str) -> Message {
        let room_fe = FieldElement::from_u256(&room.room_id).expect("room id in field");
        let ext = external_nullifier(FieldElement::from_u64(epoch), room_fe).expect("ext nullifier");

        let a0 = identity.secret;
        let a1 = poseidon_hash(&[a0, ext]).expect("a1");
        let x = FieldElement::from_u256(&signal_hash(content)).expect("signal hash in field");
        let y = a0 + a1 * x;
        let nullifier = poseidon_hash(&[a1]).expect("nullifier").to_u256();

        let root = MembershipTree::new(&room.room_id, self.depth)
            .and_then(|tree| tree.root(&room.rate_commitments))
            .expect("membership root");

        let proof = RlnFullProof {
            snark_proof: SnarkProof {
                proof: Groth16Proof::default(),
                public_signals: PublicSignals {
                    x: x.to_u256(),
                    y: y.to_u256(),
                    root: root.to_u256(),
                    nullifier,
                    external_nullifier: ext.to_u256(),
                },
            },
            epoch: U256::from(epoch),
            rln_identifier: room.room_id,
        };

        let leaf = identity.rate_commitment(room.effective_user_message_limit());
        if room.rate_commitments.contains(&leaf) {
            self.oracle.register(&proof);
        }

        Message {
            room_id: room.room_id,
            epoch,
            content: content.to_string(),
            proof,
            nullifier,
        }
    }
}

// =============================================================================
// Relay harness
// =============================================================================

/// Full relay over in-memory adapters and a mock clock.
pub struct RelayHarness {
    pub store: Arc<InMemoryRelayStore>,
    pub relay: Arc<RecordingRelay>,
    pub groups: Arc<RecordingExternalGroups>,
    pub clock: Arc<MockTimeSource>,
    pub oracle: Arc<CircuitOracle>,
    pub prover: TestProver,
    pub container: RelayContainer,
}

impl RelayHarness {
    /// Start a relay serving `rooms`. Must run inside a Tokio runtime.
    pub fn start(rooms: Vec<Room>) -> Self {
        let store = Arc::new(InMemoryRelayStore::new());
        Self::start_with_history(rooms, store.clone(), store)
    }

    /// Like [`start`](Self::start) but collision checks read `history`.
    pub fn start_with_history(
        rooms: Vec<Room>,
        store: Arc<InMemoryRelayStore>,
        history: Arc<dyn MessageHistory>,
    ) -> Self {
        for room in rooms {
            store.upsert_room(room);
        }

        let relay = Arc::new(RecordingRelay::new());
        let groups = Arc::new(RecordingExternalGroups::new());
        let clock = Arc::new(MockTimeSource::new(mid_epoch_ms(100)));
        let oracle = Arc::new(CircuitOracle::new());

        let ports = RelayPorts {
            snark: oracle.clone(),
            clock: clock.clone(),
            history,
            membership: store.clone(),
            notices: store.clone(),
            store: store.clone(),
            rooms: store.clone(),
            relay: relay.clone(),
            external_groups: Some(groups.clone()),
        };
        let container =
            RelayContainer::start(ValidationConfig::default(), ports).expect("relay starts");

        Self {
            store,
            relay,
            groups,
            clock,
            prover: TestProver::new(oracle.clone()),
            oracle,
            container,
        }
    }

    /// Current snapshot of a room.
    pub fn room(&self, room_id: u64) -> Room {
        self.store
            .room(&RoomId::from(room_id))
            .expect("room registered")
    }

    /// Move the clock to the middle of `epoch`.
    pub fn enter_epoch(&self, epoch: u64) {
        self.clock.set(mid_epoch_ms(epoch));
    }

    /// Prove against the room's current membership.
    pub fn prove(&self, room_id: u64, identity: &Identity, epoch: u64, content: &str) -> Message {
        self.prover.prove(&self.room(room_id), identity, epoch, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rln_01_proof_verification::expected_external_nullifier;
    use shared_crypto::recover_secret;

    #[test]
    fn test_prover_signals_match_relay_derivations() {
        let alice = Identity::from_seed(1);
        let room = room_with_members(5, &[alice]);
        let prover = TestProver::new(Arc::new(CircuitOracle::new()));

        let message = prover.prove(&room, &alice, 100, "hi");
        let signals = message.proof.signals();

        assert_eq!(signals.x, signal_hash("hi"));
        assert_eq!(
            signals.external_nullifier,
            expected_external_nullifier(&room, &message).unwrap()
        );
        assert_eq!(message.nullifier, signals.nullifier);
    }

    #[test]
    fn test_two_messages_reveal_secret() {
        let alice = Identity::from_seed(2);
        let room = room_with_members(5, &[alice]);
        let prover = TestProver::new(Arc::new(CircuitOracle::new()));

        let first = prover.prove(&room, &alice, 100, "one").share();
        let second = prover.prove(&room, &alice, 100, "two").share();
        let as_fe = |(x, y): (U256, U256)| {
            (
                FieldElement::from_u256(&x).unwrap(),
                FieldElement::from_u256(&y).unwrap(),
            )
        };

        assert_eq!(recover_secret(as_fe(first), as_fe(second)).unwrap(), alice.secret);
    }

    #[tokio::test]
    async fn test_oracle_rejects_non_members() {
        let alice = Identity::from_seed(3);
        let mallory = Identity::from_seed(4);
        let room = room_with_members(5, &[alice]);
        let oracle = Arc::new(CircuitOracle::new());
        let prover = TestProver::new(oracle.clone());

        let good = prover.prove(&room, &alice, 100, "a");
        let bad = prover.prove(&room, &mallory, 100, "b");

        assert_eq!(oracle.registered(), 1);
        assert!(oracle.verify(&room.room_id, &good.proof).await.unwrap());
        assert!(!oracle.verify(&room.room_id, &bad.proof).await.unwrap());
        assert!(!oracle.verify(&U256::from(6u64), &good.proof).await.unwrap());
    }
}
