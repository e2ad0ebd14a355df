//! # Revocation Flow Tests
//!
//! ```text
//! A (epoch 100) ──→ Accepted
//! B (epoch 100) ──→ collision ──→ secret recovered ──→ ban ──→ RejectedBanned
//! C (epoch 101) ──→ no valid proof possible ──────────────────→ RejectedInvalidProof
//! ```

#[cfg(test)]
mod tests {
    use crate::fixtures::{room_with_members, Identity, RelayHarness, EPOCH_MS};
    use rln_01_proof_verification::ProofRejection;
    use rln_03_revocation::{ban_notice, BannedCommitments, ExternalGroupError};
    use rln_04_message_validation::{MessageValidationApi, ValidationOutcome};
    use shared_types::{ExternalGroup, MembershipType, Message, RawMessage, Room, U256};
    use std::time::Duration;

    const ROOM: u64 = 2002;

    async fn submit(harness: &RelayHarness, message: Message) -> ValidationOutcome {
        harness
            .container
            .validation
            .handle_inbound(RawMessage::from(message))
            .await
            .expect("no collaborator failure")
    }

    fn banned(identity: &Identity) -> ValidationOutcome {
        ValidationOutcome::RejectedBanned {
            identity_commitment: identity.commitment.to_u256(),
            rate_commitment: identity.rate_commitment(1),
        }
    }

    #[tokio::test]
    async fn test_second_message_in_epoch_bans_sender() {
        let alice = Identity::from_seed(20);
        let bob = Identity::from_seed(21);
        let harness = RelayHarness::start(vec![room_with_members(ROOM, &[alice, bob])]);

        let a = harness.prove(ROOM, &alice, 100, "first");
        let b = harness.prove(ROOM, &alice, 100, "second");

        assert_eq!(submit(&harness, a).await, ValidationOutcome::Accepted);
        assert_eq!(submit(&harness, b).await, banned(&alice));

        // Both of alice's slots are zeroed in place; bob's stay.
        let room = harness.room(ROOM);
        assert_eq!(
            room.identity_commitments,
            vec![U256::zero(), bob.commitment.to_u256()]
        );
        assert_eq!(room.rate_commitments, vec![U256::zero(), bob.rate_commitment(1)]);

        let notices = harness.store.notices(&U256::from(ROOM));
        let expected = ban_notice(&BannedCommitments {
            identity_commitment: alice.commitment.to_u256(),
            rate_commitment: alice.rate_commitment(1),
        });
        assert_eq!(notices, vec![expected]);

        // Only the accepted message went out.
        assert_eq!(harness.relay.broadcasts().len(), 1);
    }

    #[tokio::test]
    async fn test_banned_member_cannot_post_next_epoch() {
        let alice = Identity::from_seed(22);
        let bob = Identity::from_seed(23);
        let harness = RelayHarness::start(vec![room_with_members(ROOM, &[alice, bob])]);

        submit(&harness, harness.prove(ROOM, &alice, 100, "a")).await;
        submit(&harness, harness.prove(ROOM, &alice, 100, "b")).await;

        harness.enter_epoch(101);
        let c = harness.prove(ROOM, &alice, 101, "c");
        assert_eq!(
            submit(&harness, c).await,
            ValidationOutcome::RejectedInvalidProof(ProofRejection::SnarkRejected)
        );

        let from_bob = harness.prove(ROOM, &bob, 101, "still here");
        assert_eq!(submit(&harness, from_bob).await, ValidationOutcome::Accepted);
    }

    #[tokio::test]
    async fn test_repeat_violation_is_idempotent() {
        let alice = Identity::from_seed(24);
        let harness = RelayHarness::start(vec![room_with_members(ROOM, &[alice])]);

        // Proven while still a member, submitted after the ban.
        let a = harness.prove(ROOM, &alice, 100, "a");
        let b = harness.prove(ROOM, &alice, 100, "b");
        let d = harness.prove(ROOM, &alice, 100, "d");

        submit(&harness, a).await;
        assert_eq!(submit(&harness, b).await, banned(&alice));
        assert_eq!(submit(&harness, d).await, banned(&alice));

        let room = harness.room(ROOM);
        assert_eq!(room.rate_commitments, vec![U256::zero()]);
        assert_eq!(harness.store.notices(&U256::from(ROOM)).len(), 1);
    }

    #[tokio::test]
    async fn test_recovery_does_not_depend_on_arrival_order() {
        let alice = Identity::from_seed(25);

        for order in [[0usize, 1], [1, 0]] {
            let harness = RelayHarness::start(vec![room_with_members(ROOM, &[alice])]);
            let messages = [
                harness.prove(ROOM, &alice, 100, "left"),
                harness.prove(ROOM, &alice, 100, "right"),
            ];

            submit(&harness, messages[order[0]].clone()).await;
            assert_eq!(
                submit(&harness, messages[order[1]].clone()).await,
                banned(&alice),
                "order {order:?}"
            );
        }
    }

    fn external_room(alice: Identity) -> Room {
        let mut room = room_with_members(ROOM, &[alice]);
        room.membership_type = MembershipType::ExternalGroup;
        room.external_group = Some(ExternalGroup {
            address: "groups.example".to_string(),
            group_id: "rln-room".to_string(),
            api_key: Some("admin-key".to_string()),
        });
        room
    }

    async fn wait_for_removal(harness: &RelayHarness) -> Vec<(String, U256)> {
        for _ in 0..100 {
            let removals = harness.groups.removals();
            if !removals.is_empty() {
                return removals;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        Vec::new()
    }

    #[tokio::test]
    async fn test_external_group_member_removed_after_ban() {
        let alice = Identity::from_seed(26);
        let harness = RelayHarness::start(vec![external_room(alice)]);

        submit(&harness, harness.prove(ROOM, &alice, 100, "a")).await;
        assert_eq!(
            submit(&harness, harness.prove(ROOM, &alice, 100, "b")).await,
            banned(&alice)
        );

        assert_eq!(
            wait_for_removal(&harness).await,
            vec![("rln-room".to_string(), alice.rate_commitment(1))]
        );
    }

    #[tokio::test]
    async fn test_external_group_failure_keeps_local_ban() {
        let alice = Identity::from_seed(27);
        let harness = RelayHarness::start(vec![external_room(alice)]);
        harness
            .groups
            .fail_with(ExternalGroupError::Status {
                status: 503,
                body: "maintenance".to_string(),
            });

        submit(&harness, harness.prove(ROOM, &alice, 100, "a")).await;
        assert_eq!(
            submit(&harness, harness.prove(ROOM, &alice, 100, "b")).await,
            banned(&alice)
        );

        assert_eq!(harness.room(ROOM).rate_commitments, vec![U256::zero()]);
        assert!(harness.groups.removals().is_empty());
    }

    #[tokio::test]
    async fn test_open_room_violation_records_one_notice() {
        let alice = Identity::from_seed(28);
        let mut open = Room::new(U256::from(ROOM));
        open.rate_limit_ms = EPOCH_MS;
        let harness = RelayHarness::start(vec![open.clone()]);

        // Any identity may prove membership of an open room.
        let members_view = room_with_members(ROOM, &[alice]);
        let prove = |content: &str| harness.prover.prove(&members_view, &alice, 100, content);
        let (a, b, d) = (prove("a"), prove("b"), prove("d"));

        assert_eq!(submit(&harness, a).await, ValidationOutcome::Accepted);
        assert_eq!(submit(&harness, b).await, banned(&alice));
        assert_eq!(submit(&harness, d).await, banned(&alice));

        let expected = ban_notice(&BannedCommitments {
            identity_commitment: alice.commitment.to_u256(),
            rate_commitment: alice.rate_commitment(1),
        });
        assert_eq!(harness.store.notices(&U256::from(ROOM)), vec![expected]);
        assert_eq!(harness.room(ROOM), open);
    }

    #[tokio::test]
    async fn test_lagging_mirror_violation_is_still_a_ban() {
        let alice = Identity::from_seed(29);
        let group_view = external_room(alice);
        let mut mirror = group_view.clone();
        mirror.identity_commitments.clear();
        mirror.rate_commitments.clear();
        let harness = RelayHarness::start(vec![mirror]);

        let a = harness.prover.prove(&group_view, &alice, 100, "a");
        let b = harness.prover.prove(&group_view, &alice, 100, "b");
        assert_eq!(submit(&harness, a).await, ValidationOutcome::Accepted);
        assert_eq!(submit(&harness, b).await, banned(&alice));

        assert_eq!(harness.store.notices(&U256::from(ROOM)).len(), 1);
        assert_eq!(
            wait_for_removal(&harness).await,
            vec![("rln-room".to_string(), alice.rate_commitment(1))]
        );
    }

    #[tokio::test]
    async fn test_repeat_violation_removes_external_member_once() {
        let alice = Identity::from_seed(30);
        let harness = RelayHarness::start(vec![external_room(alice)]);

        let messages: Vec<_> = ["a", "b", "c", "d"]
            .into_iter()
            .map(|content| harness.prove(ROOM, &alice, 100, content))
            .collect();
        for message in messages {
            submit(&harness, message).await;
        }

        assert_eq!(wait_for_removal(&harness).await.len(), 1);
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(harness.groups.removals().len(), 1);
    }
}
