//! Stress Tests - Push the store and algorithms to their limits.
//!
//! These tests verify correctness under extreme conditions:
//! - Full-capacity stores
//! - Worst-case input orders for both sorts
//! - Degenerate data (all ties, extreme values)
//! - Persistence of a full store

use osoms::compare::is_ranked;
use osoms::persist::{self, LoadPolicy};
use osoms::search::{linear_search, sentinel_search};
use osoms::sort::{compare_sorts, insertion_sort, quick_sort};
use osoms::{synth, OrderRecord, RecordStore, SearchQuery, StoreError, MAX_RECORDS};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rust_decimal::Decimal;

fn order(id: u64, total: i64) -> OrderRecord {
    let amount = Decimal::new(total, 2);
    OrderRecord::new(id, format!("Customer {}", id), "012-0000000", "Widget", "Toys", 1, amount, amount)
}

/// Store already in ranked order: revenue falls as the ID rises.
fn ranked_store(n: u64) -> RecordStore {
    let records = (1..=n).map(|id| order(id, (n + 1 - id) as i64 * 100)).collect();
    RecordStore::from_records(records, MAX_RECORDS).unwrap()
}

/// Store in exactly the opposite of ranked order.
fn reversed_store(n: u64) -> RecordStore {
    let records = (1..=n).map(|id| order(id, id as i64 * 100)).collect();
    RecordStore::from_records(records, MAX_RECORDS).unwrap()
}

// ============================================================================
// Capacity Stress Tests
// ============================================================================

#[test]
fn test_fill_to_capacity() {
    let mut store = RecordStore::new();
    for record in synth::SyntheticOrders::new(1).take(MAX_RECORDS) {
        store.push(record).unwrap();
    }

    assert!(store.is_full());
    assert_eq!(store.len(), MAX_RECORDS);

    let overflow = store.push(order(99_999, 1));
    assert_eq!(overflow, Err(StoreError::Full { capacity: MAX_RECORDS }));
    assert_eq!(store.len(), MAX_RECORDS);
}

#[test]
fn test_load_rejects_too_many_lines() {
    let mut text = Vec::new();
    persist::write_records(&mut text, &synth::generate(3, 101)).unwrap();

    let result = persist::read_records(text.as_slice(), LoadPolicy::Strict, 100);
    assert!(matches!(
        result,
        Err(osoms::PersistError::Store(StoreError::Full { capacity: 100 }))
    ));
}

#[test]
fn test_full_store_round_trip() {
    let records = synth::generate(11, MAX_RECORDS);
    let mut text = Vec::new();
    let written = persist::write_records(&mut text, &records).unwrap();
    assert_eq!(written, MAX_RECORDS);

    let report = persist::read_records(text.as_slice(), LoadPolicy::Strict, MAX_RECORDS).unwrap();
    assert!(report.skipped.is_empty());
    assert_eq!(report.records, records);
}

// ============================================================================
// Worst-Case Orderings
// ============================================================================

#[test]
fn test_quick_sort_sorted_input_max_size() {
    let n = MAX_RECORDS as u64;
    let mut store = ranked_store(n);
    let before = store.order_ids();

    let stats = quick_sort(&mut store);

    assert_eq!(store.order_ids(), before);
    // Every partition of a sorted range swaps each element into place
    assert_eq!(stats.moves, n * (n + 1) / 2 - 1);
}

#[test]
fn test_quick_sort_reversed_input_max_size() {
    let n = MAX_RECORDS as u64;
    let mut store = reversed_store(n);

    quick_sort(&mut store);

    assert!(is_ranked(store.records()));
    assert_eq!(store.order_ids(), (1..=n).rev().collect::<Vec<_>>());
}

#[test]
fn test_insertion_sort_reversed_input() {
    let n = 2_000u64;
    let mut store = reversed_store(n);

    let stats = insertion_sort(&mut store);

    assert!(is_ranked(store.records()));
    // Each record shifts past every record before it
    assert_eq!(stats.moves, n * (n - 1) / 2);
}

#[test]
fn test_insertion_sort_sorted_input_is_free() {
    let mut store = ranked_store(MAX_RECORDS as u64);
    let stats = insertion_sort(&mut store);
    assert_eq!(stats.moves, 0);
}

#[test]
fn test_compare_sorts_random_store() {
    let mut store = RecordStore::from_records(synth::generate(5, 3_000), MAX_RECORDS).unwrap();
    let comparison = compare_sorts(&mut store);

    assert!(comparison.insertion.moves > 0);
    assert!(comparison.quick.moves > 0);
    assert!(is_ranked(store.records()));
}

// ============================================================================
// Degenerate Data
// ============================================================================

#[test]
fn test_all_equal_revenue() {
    let mut rng = ChaCha8Rng::seed_from_u64(77);
    let mut ids: Vec<u64> = (1..=3_000).collect();
    ids.shuffle(&mut rng);
    let records: Vec<OrderRecord> = ids.into_iter().map(|id| order(id, 5_000)).collect();

    let mut by_quick = RecordStore::from_records(records.clone(), MAX_RECORDS).unwrap();
    let mut by_insertion = RecordStore::from_records(records, MAX_RECORDS).unwrap();
    quick_sort(&mut by_quick);
    insertion_sort(&mut by_insertion);

    // Ties fall back to ascending order ID
    let expected: Vec<u64> = (1..=3_000).collect();
    assert_eq!(by_quick.order_ids(), expected);
    assert_eq!(by_insertion.order_ids(), expected);
}

#[test]
fn test_extreme_values() {
    let huge = Decimal::from(u64::MAX);
    let records = vec![
        OrderRecord::new(u64::MAX, "Max", "-", "-", "-", u32::MAX, huge, huge),
        order(0, 0),
        OrderRecord::new(1, "Tiny", "-", "-", "-", 1, Decimal::new(1, 2), Decimal::new(1, 2)),
    ];
    let mut store = RecordStore::from_records(records, 3).unwrap();

    quick_sort(&mut store);
    assert_eq!(store.order_ids(), vec![u64::MAX, 1, 0]);

    let query = SearchQuery::new(u64::MAX, "Max");
    assert_eq!(linear_search(&store, &query).position, Some(1));
    assert_eq!(sentinel_search(&store, &query).position, Some(1));
}

#[test]
fn test_sentinel_miss_on_large_store() {
    let store = RecordStore::from_records(synth::generate(9, MAX_RECORDS), MAX_RECORDS).unwrap();
    let query = SearchQuery::new(1, "Nobody Here");

    let outcome = sentinel_search(&store, &query);
    assert!(!outcome.is_found());
    assert_eq!(outcome.comparisons, MAX_RECORDS as u64 + 1);
}
