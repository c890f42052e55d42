//! Value codec benchmarks.
//!
//! Every message a manager or agent touches runs through these paths,
//! so encode/decode cost here is the floor for whole-message cost.

use bytes::Bytes;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use snmp_ber::ber::{Decoder, EncodeBuf};
use snmp_ber::oid::Oid;
use snmp_ber::pdu::Pdu;
use snmp_ber::value::Value;
use std::hint::black_box;

/// One value per interesting encode/decode path
fn common_values() -> Vec<(&'static str, Value)> {
    vec![
        ("integer_small", Value::Integer(42)),
        ("integer_wide", Value::Integer(-9_000_000_000)),
        (
            "octet_string",
            Value::OctetString(Bytes::from_static(b"Linux router1 5.4.0 #1 SMP x86_64")),
        ),
        (
            "oid",
            Value::ObjectIdentifier(Oid::from_slice(&[1, 3, 6, 1, 2, 1, 2, 2, 1, 10, 1])),
        ),
        ("counter64", Value::Counter64(u64::MAX)),
        (
            "varbind_sequence",
            Value::Sequence(vec![
                Value::ObjectIdentifier(Oid::from_slice(&[1, 3, 6, 1, 2, 1, 1, 3, 0])),
                Value::TimeTicks(123_456),
            ]),
        ),
    ]
}

fn bench_value_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("value_encode");

    for (name, value) in common_values() {
        group.bench_with_input(BenchmarkId::new("to_ber", name), &value, |b, value| {
            b.iter(|| black_box(value.to_ber()))
        });
    }

    group.finish();
}

fn bench_value_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("value_decode");

    for (name, value) in common_values() {
        let encoded = value.to_ber();
        group.throughput(Throughput::Bytes(encoded.len() as u64));
        group.bench_with_input(BenchmarkId::new("from_ber", name), &encoded, |b, data| {
            b.iter(|| black_box(Value::from_ber(data).unwrap()))
        });
    }

    group.finish();
}

/// A ten-binding PDU, about the size of a typical table-walk response
fn bench_pdu(c: &mut Criterion) {
    let mut group = c.benchmark_group("pdu");

    let oids: Vec<Oid> = (0..10)
        .map(|i| Oid::from_slice(&[1, 3, 6, 1, 2, 1, 2, 2, 1, 10, i]))
        .collect();
    let pdu = Pdu::get_request(0x1234, &oids);

    group.bench_function("encode_10_varbinds", |b| {
        b.iter(|| {
            let mut buf = EncodeBuf::new();
            pdu.encode(&mut buf);
            black_box(buf.finish())
        })
    });

    let mut buf = EncodeBuf::new();
    pdu.encode(&mut buf);
    let encoded = buf.finish();
    group.throughput(Throughput::Bytes(encoded.len() as u64));
    group.bench_function("decode_10_varbinds", |b| {
        b.iter(|| {
            let mut decoder = Decoder::new(encoded.clone());
            black_box(Pdu::decode(&mut decoder).unwrap())
        })
    });

    group.finish();
}

criterion_group!(benches, bench_value_encode, bench_value_decode, bench_pdu);
criterion_main!(benches);
