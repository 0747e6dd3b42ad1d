//! Benchmark harness using Criterion for search timing.
//!
//! Measures:
//! - Linear vs Sentinel search on hits and misses
//! - Binary search including its quick sort

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use osoms::search::{binary_search, linear_search, sentinel_search};
use osoms::{synth, RecordStore, SearchQuery, MAX_RECORDS};

fn full_store() -> RecordStore {
    RecordStore::from_records(synth::generate(42, MAX_RECORDS), MAX_RECORDS).unwrap()
}

fn query_at(store: &RecordStore, index: usize) -> SearchQuery {
    let record = &store.records()[index];
    SearchQuery::new(record.order_id, record.customer_name.clone())
}

/// Benchmark: the two linear scans over a full store
fn bench_linear_scans(c: &mut Criterion) {
    let store = full_store();
    let cases = [
        ("front", query_at(&store, 10)),
        ("back", query_at(&store, MAX_RECORDS - 1)),
        ("miss", SearchQuery::new(0, "Nobody")),
    ];

    let mut group = c.benchmark_group("linear_scan");
    for (name, query) in cases.iter() {
        group.bench_with_input(BenchmarkId::new("linear", name), query, |b, query| {
            b.iter(|| black_box(linear_search(&store, query)))
        });
        group.bench_with_input(BenchmarkId::new("sentinel", name), query, |b, query| {
            b.iter(|| black_box(sentinel_search(&store, query)))
        });
    }
    group.finish();
}

/// Benchmark: binary search, which quick sorts before every lookup
fn bench_binary(c: &mut Criterion) {
    let mut group = c.benchmark_group("binary_search");
    group.sample_size(10);

    for size in [1_000usize, 5_000].iter() {
        let records = synth::generate(42, *size);
        let query = SearchQuery::new(records[0].order_id, records[0].customer_name.clone());

        group.bench_with_input(BenchmarkId::from_parameter(size), &records, |b, records| {
            b.iter_batched(
                || RecordStore::from_records(records.clone(), records.len()).unwrap(),
                |mut store| black_box(binary_search(&mut store, &query).comparisons),
                BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_linear_scans, bench_binary);

criterion_main!(benches);
