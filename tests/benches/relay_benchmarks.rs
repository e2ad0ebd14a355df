//! # RLN Relay Benchmarks
//!
//! Per-message costs on the relay's hot path:
//!
//! | Stage | Operation |
//! |-------|-----------|
//! | Binding | `signal_hash` over typical message sizes |
//! | Context | Poseidon external nullifier |
//! | Membership | Merkle root over growing member sets |
//! | Collision | Sharded cache lookup-and-record |
//! | Recovery | Secret recovery from two shares |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rln_02_collision_detection::EphemeralMessageCache;
use rln_tests::fixtures::{room_with_members, CircuitOracle, Identity, TestProver};
use shared_crypto::{
    external_nullifier, membership_root, recover_secret, signal_hash, FieldElement,
    DEFAULT_TREE_DEPTH,
};
use shared_types::U256;
use std::sync::Arc;
use std::time::Duration;

// ============================================================================
// Hashing
// ============================================================================

fn bench_signal_hash(c: &mut Criterion) {
    let mut group = c.benchmark_group("signal-hash");

    for size in [32usize, 256, 4096] {
        let content = "x".repeat(size);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &content, |b, content| {
            b.iter(|| black_box(signal_hash(content)))
        });
    }

    group.finish();
}

fn bench_external_nullifier(c: &mut Criterion) {
    let room = FieldElement::from_u64(4242);
    c.bench_function("poseidon-external-nullifier", |b| {
        let mut epoch = 0u64;
        b.iter(|| {
            epoch += 1;
            black_box(external_nullifier(FieldElement::from_u64(epoch), room))
        })
    });
}

// ============================================================================
// Membership
// ============================================================================

fn bench_membership_root(c: &mut Criterion) {
    let mut group = c.benchmark_group("membership-root");
    group.measurement_time(Duration::from_secs(10));
    group.sample_size(20);

    for members in [1usize, 64, 1024] {
        let leaves: Vec<U256> = (0..members)
            .map(|i| Identity::from_seed(i as u64).rate_commitment(1))
            .collect();
        group.throughput(Throughput::Elements(members as u64));
        group.bench_with_input(BenchmarkId::from_parameter(members), &leaves, |b, leaves| {
            b.iter(|| black_box(membership_root(&U256::from(1u64), DEFAULT_TREE_DEPTH, leaves)))
        });
    }

    group.finish();
}

// ============================================================================
// Collision detection
// ============================================================================

fn bench_cache_lookup_and_record(c: &mut Criterion) {
    let members: Vec<_> = (0..256).map(Identity::from_seed).collect();
    let room = room_with_members(7, &members);
    let prover = TestProver::new(Arc::new(CircuitOracle::new()));
    let messages: Vec<_> = members
        .iter()
        .map(|m| prover.prove(&room, m, 100, "bench"))
        .collect();

    let mut group = c.benchmark_group("ephemeral-cache");
    group.throughput(Throughput::Elements(messages.len() as u64));
    group.bench_function("lookup_and_record_256", |b| {
        b.iter(|| {
            let cache = EphemeralMessageCache::new(1);
            let mut hits = 0usize;
            for message in &messages {
                if cache.lookup_and_record(&room, message).is_some() {
                    hits += 1;
                }
            }
            black_box(hits)
        })
    });
    group.finish();
}

fn bench_secret_recovery(c: &mut Criterion) {
    let alice = Identity::from_seed(1);
    let room = room_with_members(7, &[alice]);
    let prover = TestProver::new(Arc::new(CircuitOracle::new()));
    let to_share = |(x, y): (U256, U256)| {
        (
            FieldElement::from_u256(&x).unwrap(),
            FieldElement::from_u256(&y).unwrap(),
        )
    };
    let first = to_share(prover.prove(&room, &alice, 100, "one").share());
    let second = to_share(prover.prove(&room, &alice, 100, "two").share());

    c.bench_function("recover-secret", |b| {
        b.iter(|| black_box(recover_secret(first, second)))
    });
}

criterion_group!(
    benches,
    bench_signal_hash,
    bench_external_nullifier,
    bench_membership_root,
    bench_cache_lookup_and_record,
    bench_secret_recovery,
);
criterion_main!(benches);
