//! # Interaction Gateway Benchmarks
//!
//! | Path | Target |
//! |------|--------|
//! | Ed25519 verify over `timestamp ++ body` | < 100µs |
//! | Dispatch a verified Ping or echo command | < 50µs |
//!
//! Discord gives the endpoint 3 seconds in total, so everything here must
//! stay negligible next to a completion round trip.

use bytes::Bytes;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use interaction_gateway::domain::verifier::signed_message;
use interaction_gateway::{EchoReplyGenerator, InteractionDispatcher, SignatureVerifier};
use shared_crypto::Ed25519KeyPair;
use std::sync::Arc;

/// Ping body padded to roughly `size` bytes
fn padded_ping(size: usize) -> Vec<u8> {
    let mut body = br#"{"type":1,"pad":""#.to_vec();
    body.resize(size.max(body.len()), b'x');
    body.extend_from_slice(br#""}"#);
    body
}

fn bench_signature_verification(c: &mut Criterion) {
    let mut group = c.benchmark_group("signature-verification");

    let keypair = Ed25519KeyPair::from_seed([0x5A; 32]);
    let verifier = SignatureVerifier::new(keypair.public_key());
    let timestamp = "1700000000";

    for size in [64usize, 1024, 16 * 1024] {
        let body = padded_ping(size);
        let signature = keypair.sign(&signed_message(timestamp, &body)).to_hex();
        let body = Bytes::from(body);

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("verify", size), &body, |b, body| {
            b.iter(|| black_box(verifier.verify(&signature, timestamp, body.clone()).valid))
        });
    }

    group.bench_function("reject_malformed_hex", |b| {
        let body = Bytes::from(padded_ping(64));
        b.iter(|| black_box(verifier.verify("zz", timestamp, body.clone()).valid))
    });

    group.finish();
}

fn bench_dispatch(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let dispatcher = InteractionDispatcher::new(Arc::new(EchoReplyGenerator::new()));

    let ping = br#"{"type":1}"#;
    let command =
        br#"{"type":2,"data":{"name":"ask","options":[{"name":"name","value":"benchmark"}]}}"#;

    let mut group = c.benchmark_group("dispatch");
    group.bench_function("ping", |b| {
        b.iter(|| runtime.block_on(dispatcher.dispatch(black_box(ping))).is_ok())
    });
    group.bench_function("command_echo", |b| {
        b.iter(|| runtime.block_on(dispatcher.dispatch(black_box(command))).is_ok())
    });
    group.finish();
}

criterion_group!(benches, bench_signature_verification, bench_dispatch);
criterion_main!(benches);
