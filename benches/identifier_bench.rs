//! Benchmarks for identifier parsing and membership checks.
//!
//! Membership visits every member of the set, so a hit on the first entry, a
//! hit on the last entry and a miss should all cost the same. A reliable gap
//! between the `membership` cases is a regression worth investigating.
//!
//! ```sh
//! cargo bench --bench identifier_bench
//! cargo bench --bench identifier_bench -- membership
//! ```

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use helmgate_core::{Identifier, IdentifierSet};
use std::hint::black_box;

fn bench_identifier_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("identifier_parsing");
    group.throughput(Throughput::Elements(1));

    let scenarios = vec![
        ("valid", "0002"),
        ("too_short", "002"),
        ("too_long", "00002"),
        ("non_digit", "00a2"),
    ];

    for (name, value) in scenarios {
        group.bench_function(name, |b| {
            b.iter(|| black_box(Identifier::new(black_box(value))));
        });
    }

    group.finish();
}

fn bench_membership(c: &mut Criterion) {
    let mut group = c.benchmark_group("membership");
    group.throughput(Throughput::Elements(1));

    let values: Vec<String> = (0..64).map(|i| format!("{:04}", i * 7)).collect();
    let set = IdentifierSet::parse(values.iter().map(String::as_str)).unwrap();

    let cases = vec![
        ("first", Identifier::new(&values[0]).unwrap()),
        ("last", Identifier::new(&values[63]).unwrap()),
        ("miss", Identifier::new("9999").unwrap()),
    ];

    for (name, candidate) in cases {
        group.bench_with_input(BenchmarkId::new("set_64", name), &candidate, |b, candidate| {
            b.iter(|| black_box(set.contains(black_box(candidate))));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_identifier_parsing, bench_membership);
criterion_main!(benches);
