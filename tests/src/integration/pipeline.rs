//! # Pipeline Tests
//!
//! Single-message paths through the relay.
//!
//! ## Test Categories
//!
//! 1. **Happy Path**: accepted, persisted, broadcast
//! 2. **Epoch Window**: tolerance of one epoch either side
//! 3. **Binding**: content and proof must agree
//! 4. **Wire Forms**: proof as a JSON string or object, missing fields
//! 5. **Storage Faults**: history outage fails closed

#[cfg(test)]
mod tests {
    use crate::fixtures::{room_with_members, Identity, RelayHarness};
    use async_trait::async_trait;
    use rln_01_proof_verification::ProofRejection;
    use rln_02_collision_detection::{HistoryError, MessageHistory};
    use rln_04_message_validation::{
        InMemoryRelayStore, MessageValidationApi, ValidationError, ValidationOutcome,
    };
    use shared_types::{Message, RawMessage, RoomId, WireError, U256};
    use std::sync::Arc;

    const ROOM: u64 = 1001;

    fn harness() -> (RelayHarness, Identity) {
        let alice = Identity::from_seed(10);
        let bob = Identity::from_seed(11);
        let harness = RelayHarness::start(vec![room_with_members(ROOM, &[alice, bob])]);
        (harness, alice)
    }

    async fn submit(harness: &RelayHarness, message: Message) -> ValidationOutcome {
        harness
            .container
            .validation
            .handle_inbound(RawMessage::from(message))
            .await
            .expect("no collaborator failure")
    }

    #[tokio::test]
    async fn test_valid_message_is_accepted_stored_and_broadcast() {
        let (harness, alice) = harness();
        let message = harness.prove(ROOM, &alice, 100, "hello room");

        let outcome = submit(&harness, message.clone()).await;

        assert_eq!(outcome, ValidationOutcome::Accepted);
        assert_eq!(harness.store.messages(&U256::from(ROOM)), vec![message.clone()]);
        assert_eq!(harness.relay.broadcasts(), vec![(U256::from(ROOM), message)]);
    }

    #[tokio::test]
    async fn test_members_do_not_collide_with_each_other() {
        let (harness, alice) = harness();
        let bob = Identity::from_seed(11);

        let a = harness.prove(ROOM, &alice, 100, "same words");
        let b = harness.prove(ROOM, &bob, 100, "same words");
        assert_ne!(a.nullifier, b.nullifier);

        assert_eq!(submit(&harness, a).await, ValidationOutcome::Accepted);
        assert_eq!(submit(&harness, b).await, ValidationOutcome::Accepted);
    }

    #[tokio::test]
    async fn test_epoch_window_is_one_either_side() {
        let (harness, alice) = harness();
        harness.enter_epoch(100);

        for epoch in [99, 100, 101] {
            let outcome = submit(&harness, harness.prove(ROOM, &alice, epoch, "in window")).await;
            assert_eq!(outcome, ValidationOutcome::Accepted, "epoch {epoch}");
        }

        for epoch in [98, 102] {
            let outcome = submit(&harness, harness.prove(ROOM, &alice, epoch, "out")).await;
            assert!(
                matches!(
                    outcome,
                    ValidationOutcome::RejectedInvalidProof(ProofRejection::EpochOutOfRange {
                        lower: 99,
                        upper: 101,
                        ..
                    })
                ),
                "epoch {epoch}: {outcome:?}"
            );
        }
    }

    #[tokio::test]
    async fn test_swapped_content_is_hash_mismatch() {
        let (harness, alice) = harness();
        let mut message = harness.prove(ROOM, &alice, 100, "original");
        message.content = "tampered".to_string();

        let outcome = submit(&harness, message).await;

        assert!(matches!(
            outcome,
            ValidationOutcome::RejectedInvalidProof(ProofRejection::HashMismatch { .. })
        ));
        assert!(harness.store.messages(&U256::from(ROOM)).is_empty());
        assert!(harness.relay.broadcasts().is_empty());
    }

    #[tokio::test]
    async fn test_non_member_is_rejected_by_snark() {
        let (harness, _) = harness();
        let outsider = Identity::from_seed(99);

        let outcome = submit(&harness, harness.prove(ROOM, &outsider, 100, "let me in")).await;

        assert_eq!(
            outcome,
            ValidationOutcome::RejectedInvalidProof(ProofRejection::SnarkRejected)
        );
    }

    #[tokio::test]
    async fn test_proof_as_json_string_is_accepted() {
        let (harness, alice) = harness();
        let message = harness.prove(ROOM, &alice, 100, "stringly");
        let mut raw = RawMessage::from(message);
        let encoded = serde_json::to_string(raw.proof.as_ref().unwrap()).unwrap();
        raw.proof = Some(serde_json::Value::String(encoded));

        let outcome = harness.container.validation.handle_inbound(raw).await.unwrap();

        assert_eq!(outcome, ValidationOutcome::Accepted);
    }

    #[tokio::test]
    async fn test_missing_fields_are_malformed() {
        let (harness, alice) = harness();
        let message = harness.prove(ROOM, &alice, 100, "incomplete");

        let mut no_epoch = RawMessage::from(message.clone());
        no_epoch.epoch = None;
        let mut bad_proof = RawMessage::from(message);
        bad_proof.proof = Some(serde_json::Value::String("{not json".to_string()));

        let outcome = harness.container.validation.handle_inbound(no_epoch).await.unwrap();
        assert_eq!(
            outcome,
            ValidationOutcome::RejectedInvalidProof(ProofRejection::Malformed(
                WireError::MissingField("epoch")
            ))
        );

        let outcome = harness.container.validation.handle_inbound(bad_proof).await.unwrap();
        assert!(matches!(
            outcome,
            ValidationOutcome::RejectedInvalidProof(ProofRejection::Malformed(
                WireError::MalformedProof(_)
            ))
        ));
        assert!(harness.relay.broadcasts().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_room_is_an_error() {
        let (harness, alice) = harness();
        let mut message = harness.prove(ROOM, &alice, 100, "where am i");
        message.room_id = U256::from(5u64);

        let result = harness
            .container
            .validation
            .handle_inbound(RawMessage::from(message))
            .await;

        assert!(matches!(result, Err(ValidationError::UnknownRoom(_))));
    }

    #[tokio::test]
    async fn test_ephemeral_room_is_not_persisted_but_still_rate_limited() {
        let alice = Identity::from_seed(12);
        let mut room = room_with_members(ROOM, &[alice]);
        room.ephemeral = true;
        let harness = RelayHarness::start(vec![room]);

        let first = harness.prove(ROOM, &alice, 100, "one");
        let second = harness.prove(ROOM, &alice, 100, "two");

        assert_eq!(submit(&harness, first).await, ValidationOutcome::Accepted);
        assert!(harness.store.messages(&U256::from(ROOM)).is_empty());

        let outcome = submit(&harness, second).await;
        assert!(matches!(outcome, ValidationOutcome::RejectedBanned { .. }));
        assert!(harness.store.notices(&U256::from(ROOM)).is_empty());
    }

    /// History that refuses every query.
    struct OfflineHistory;

    #[async_trait]
    impl MessageHistory for OfflineHistory {
        async fn find_prior_by_nullifier(
            &self,
            _room_id: &RoomId,
            _nullifier: &U256,
        ) -> Result<Option<Message>, HistoryError> {
            Err(HistoryError::Unavailable("connection refused".to_string()))
        }
    }

    #[tokio::test]
    async fn test_history_outage_fails_closed() {
        let alice = Identity::from_seed(13);
        let store = Arc::new(InMemoryRelayStore::new());
        let harness = RelayHarness::start_with_history(
            vec![room_with_members(ROOM, &[alice])],
            store,
            Arc::new(OfflineHistory),
        );

        let result = harness
            .container
            .validation
            .handle_inbound(RawMessage::from(harness.prove(ROOM, &alice, 100, "hi")))
            .await;

        assert!(matches!(
            result,
            Err(ValidationError::CollaboratorUnavailable { .. })
        ));
        assert!(harness.store.messages(&U256::from(ROOM)).is_empty());
        assert!(harness.relay.broadcasts().is_empty());
    }
}
