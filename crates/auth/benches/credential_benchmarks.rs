use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use inkpost_auth::{FileValidator, KdfParams, TokenRecord, constant_time_eq, derive_key};
use std::io::Write;

/// Comparison cost should not depend on where the first differing byte is.
fn bench_comparator_by_mismatch_position(c: &mut Criterion) {
    let mut group = c.benchmark_group("constant_time_eq");
    let stored = [0x5au8; 20];

    for pos in [0usize, 10, 19] {
        let mut presented = stored;
        presented[pos] ^= 0xff;
        group.bench_with_input(
            BenchmarkId::new("mismatch_at", pos),
            &presented,
            |b, presented| {
                b.iter(|| constant_time_eq(black_box(presented), black_box(&stored)));
            },
        );
    }

    group.bench_function("equal", |b| {
        b.iter(|| constant_time_eq(black_box(&stored), black_box(&stored)));
    });

    group.finish();
}

fn bench_key_derivation(c: &mut Criterion) {
    c.bench_function("pbkdf2_sha3_512_store_format_v1", |b| {
        b.iter(|| {
            derive_key(
                black_box(b"bench-secret"),
                black_box(b"0123456789abcdef"),
                KdfParams::STORE_FORMAT_V1,
            )
        });
    });
}

/// Full scan of a store where only the last record matches.
fn bench_store_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("file_validator_scan");
    group.sample_size(10);

    for records in [1usize, 8, 32] {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let mut written = 0usize;
        let mut counter = 0u32;
        while written < records {
            counter += 1;
            let secret = if written + 1 == records {
                b"bench-secret".to_vec()
            } else {
                format!("other-{written}").into_bytes()
            };
            let mut salt = [0u8; 16];
            salt[12..].copy_from_slice(&counter.to_be_bytes());
            let record = TokenRecord {
                label: format!("rec-{written}"),
                field2: String::new(),
                salt: salt.to_vec(),
                hash: derive_key(&secret, &salt, KdfParams::STORE_FORMAT_V1)
                    .as_bytes()
                    .to_vec(),
            };
            if let Ok(line) = record.to_line() {
                file.write_all(&line).unwrap();
                file.write_all(b"\n").unwrap();
                written += 1;
            }
        }
        file.flush().unwrap();

        let validator = FileValidator::new(file.path());
        group.throughput(Throughput::Elements(records as u64));
        group.bench_with_input(BenchmarkId::from_parameter(records), &validator, |b, v| {
            b.iter(|| assert!(v.validate(black_box(b"bench-secret"))));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_comparator_by_mismatch_position,
    bench_key_derivation,
    bench_store_scan
);
criterion_main!(benches);
