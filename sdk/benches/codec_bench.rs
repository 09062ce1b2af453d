// Catbuffer codec benchmarks.
//
// Covers standalone transfer encode/decode, aggregate encode/decode at
// several inner-transaction counts, and id derivation.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use catapult_sdk::crypto::PublicKey;
use catapult_sdk::id::{generate_mosaic_id, generate_namespace_path};
use catapult_sdk::model::{Address, Deadline, Message, Mosaic, MosaicNonce, NetworkType, UnresolvedMosaicId};
use catapult_sdk::transaction::{AggregateBuilder, BinarySerializer, Transaction, TransferBuilder};

const NETWORK: NetworkType = NetworkType::MijinTest;

fn transfer(seed: u8) -> Transaction {
    TransferBuilder::new(NETWORK)
        .recipient(Address::from_public_key(&PublicKey::from_bytes([seed; 32]), NETWORK))
        .message(Message::plain("benchmark payload for a plain transfer"))
        .mosaic(Mosaic::new(UnresolvedMosaicId::new(0x0DC6_7FBE_1CAD_29E3), 1_000_000))
        .mosaic(Mosaic::new(UnresolvedMosaicId::new(0x2A8A_8A5B_C1A3_9F10), 25))
        .deadline(Deadline::from_epoch_millis(7_200_000))
        .build()
        .unwrap()
}

fn aggregate(inner: usize) -> Transaction {
    let signer = PublicKey::from_bytes([0xAB; 32]);
    let transactions = (0..inner).map(|i| transfer(i as u8).to_aggregate(signer).unwrap());
    AggregateBuilder::complete(NETWORK)
        .inner_transactions(transactions)
        .build()
        .unwrap()
}

fn bench_transfer_codec(c: &mut Criterion) {
    let serializer = BinarySerializer::new();
    let tx = transfer(1);
    let bytes = serializer.serialize(&tx).unwrap();

    c.bench_function("codec/transfer_serialize", |b| {
        b.iter(|| serializer.serialize(black_box(&tx)).unwrap());
    });
    c.bench_function("codec/transfer_deserialize", |b| {
        b.iter(|| serializer.deserialize(black_box(&bytes)).unwrap());
    });
}

fn bench_aggregate_codec(c: &mut Criterion) {
    let serializer = BinarySerializer::new();
    let mut group = c.benchmark_group("codec/aggregate_roundtrip");

    for inner in [1, 10, 100] {
        let tx = aggregate(inner);
        group.throughput(Throughput::Elements(inner as u64));
        group.bench_with_input(BenchmarkId::from_parameter(inner), &tx, |b, tx| {
            b.iter(|| {
                let bytes = serializer.serialize(tx).unwrap();
                serializer.deserialize(&bytes).unwrap()
            });
        });
    }

    group.finish();
}

fn bench_ids(c: &mut Criterion) {
    let owner = PublicKey::from_bytes([7; 32]);
    c.bench_function("id/mosaic_id", |b| {
        b.iter(|| generate_mosaic_id(black_box(MosaicNonce::new(42)), &owner));
    });
    c.bench_function("id/namespace_path", |b| {
        b.iter(|| generate_namespace_path(black_box("cat.currency.sub")).unwrap());
    });
}

criterion_group!(benches, bench_transfer_codec, bench_aggregate_codec, bench_ids);
criterion_main!(benches);
