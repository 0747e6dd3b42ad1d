//! Search Engine - Linear, Binary and Sentinel linear search.
//!
//! Every search looks for the first record whose order ID and customer
//! name both match the query exactly. Positions are 1-based.
//!
//! # Binary search and the ranking key
//!
//! [`binary_search`] sorts the store with quick sort first, which orders
//! records by revenue, and then bisects on order ID. Revenue order says
//! nothing about where an order ID sits, so bisection can step away from
//! a record that is present and report it missing. Callers that need a
//! guaranteed answer use [`linear_search`] or [`sentinel_search`].

use std::fmt;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::record::OrderRecord;
use crate::sort::{quick_sort, SortStats};
use crate::store::RecordStore;

/// Available search methods.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SearchMethod {
    /// Front-to-back scan of the current order
    Linear,
    /// Quick sort, then midpoint bisection on order ID
    Binary,
    /// Front-to-back scan terminated by an appended sentinel
    Sentinel,
}

impl SearchMethod {
    pub const fn name(self) -> &'static str {
        match self {
            SearchMethod::Linear => "Linear Search",
            SearchMethod::Binary => "Binary Search",
            SearchMethod::Sentinel => "Optimized Linear Search (Sentinel)",
        }
    }
}

impl fmt::Display for SearchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The two keys a search must match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchQuery {
    pub order_id: u64,
    /// Matched exactly, case-sensitive
    pub customer_name: String,
}

impl SearchQuery {
    pub fn new(order_id: u64, customer_name: impl Into<String>) -> Self {
        Self {
            order_id,
            customer_name: customer_name.into(),
        }
    }

    #[inline]
    fn matches(&self, record: &OrderRecord) -> bool {
        record.matches(self.order_id, &self.customer_name)
    }
}

/// Result of a single search.
#[derive(Clone, Debug)]
pub struct SearchOutcome<'a> {
    pub method: SearchMethod,
    /// 1-based position of the match in the searched order
    pub position: Option<usize>,
    /// The matched record
    pub record: Option<&'a OrderRecord>,
    /// Records inspected, sentinel included
    pub comparisons: u64,
    /// Time spent searching (excludes the pre-sort of binary search)
    pub elapsed: Duration,
    /// Pre-sort performed by binary search
    pub presort: Option<SortStats>,
}

impl<'a> SearchOutcome<'a> {
    fn miss(method: SearchMethod, comparisons: u64, elapsed: Duration) -> Self {
        Self {
            method,
            position: None,
            record: None,
            comparisons,
            elapsed,
            presort: None,
        }
    }

    /// Returns true if a real record matched.
    #[inline]
    pub fn is_found(&self) -> bool {
        self.position.is_some()
    }

    /// Elapsed time in milliseconds with sub-millisecond precision.
    #[inline]
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1_000.0
    }
}

/// Run `method` against `store`.
///
/// Binary search needs `&mut` because it sorts the store first.
pub fn search<'a>(
    store: &'a mut RecordStore,
    method: SearchMethod,
    query: &SearchQuery,
) -> SearchOutcome<'a> {
    match method {
        SearchMethod::Linear => linear_search(store, query),
        SearchMethod::Binary => binary_search(store, query),
        SearchMethod::Sentinel => sentinel_search(store, query),
    }
}

// ============================================================================
// Linear Search
// ============================================================================

/// Scan the current order from the front. Does not mutate the store.
pub fn linear_search<'a>(store: &'a RecordStore, query: &SearchQuery) -> SearchOutcome<'a> {
    let start = Instant::now();

    let mut comparisons = 0u64;
    let mut hit = None;
    for (index, record) in store.iter().enumerate() {
        comparisons += 1;
        if query.matches(record) {
            hit = Some((index, record));
            break;
        }
    }

    let elapsed = start.elapsed();
    debug!(order_id = query.order_id, found = hit.is_some(), comparisons, "linear search");

    match hit {
        Some((index, record)) => SearchOutcome {
            method: SearchMethod::Linear,
            position: Some(index + 1),
            record: Some(record),
            comparisons,
            elapsed,
            presort: None,
        },
        None => SearchOutcome::miss(SearchMethod::Linear, comparisons, elapsed),
    }
}

// ============================================================================
// Binary Search
// ============================================================================

/// Quick sort the store, then bisect on order ID.
///
/// The store keeps the sorted order afterwards. See the module docs for
/// why a present record can be reported missing.
pub fn binary_search<'a>(store: &'a mut RecordStore, query: &SearchQuery) -> SearchOutcome<'a> {
    let presort = quick_sort(store);

    let store: &'a RecordStore = store;
    let records = store.records();
    let view = store.view();

    let start = Instant::now();

    let mut comparisons = 0u64;
    let mut hit = None;
    // Window is [low, high); the midpoint is taken over [low, high - 1]
    let mut low = 0usize;
    let mut high = view.len();
    while low < high {
        let mid = low + (high - 1 - low) / 2;
        let record = view.record(records, mid);
        comparisons += 1;

        if query.matches(record) {
            hit = Some((mid, record));
            break;
        }

        if record.order_id < query.order_id {
            low = mid + 1;
        } else {
            high = mid;
        }
    }

    let elapsed = start.elapsed();
    debug!(order_id = query.order_id, found = hit.is_some(), comparisons, "binary search");

    let mut outcome = match hit {
        Some((index, record)) => SearchOutcome {
            method: SearchMethod::Binary,
            position: Some(index + 1),
            record: Some(record),
            comparisons,
            elapsed,
            presort: None,
        },
        None => SearchOutcome::miss(SearchMethod::Binary, comparisons, elapsed),
    };
    outcome.presort = Some(presort);
    outcome
}

// ============================================================================
// Sentinel Linear Search
// ============================================================================

/// Linear scan without a per-step bounds check.
///
/// A probe record carrying the query keys is appended to a copy of the
/// view, so the scan always stops at or before it. A match at the probe's
/// index means not found.
pub fn sentinel_search<'a>(store: &'a RecordStore, query: &SearchQuery) -> SearchOutcome<'a> {
    let sentinel = OrderRecord::probe(query.order_id, query.customer_name.clone());
    let view = store.view();

    let start = Instant::now();

    let mut scan: Vec<&OrderRecord> = Vec::with_capacity(view.len() + 1);
    scan.extend(view.resolve(store.records()));
    scan.push(&sentinel);

    let mut i = 0usize;
    // SAFETY: scan[scan.len() - 1] is the sentinel, which matches the query,
    // so the loop stops at an index < scan.len().
    while !query.matches(unsafe { scan.get_unchecked(i) }) {
        i += 1;
    }

    let elapsed = start.elapsed();
    let comparisons = i as u64 + 1;
    let found = i < store.len();
    debug!(order_id = query.order_id, found, comparisons, "sentinel search");

    if found {
        SearchOutcome {
            method: SearchMethod::Sentinel,
            position: Some(i + 1),
            record: Some(view.record(store.records(), i)),
            comparisons,
            elapsed,
            presort: None,
        }
    } else {
        SearchOutcome::miss(SearchMethod::Sentinel, comparisons, elapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::order;

    fn store_of(pairs: &[(u64, i64)]) -> RecordStore {
        let mut store = RecordStore::new();
        for &(id, total) in pairs {
            store.push(order(id, total)).unwrap();
        }
        store
    }

    fn query(id: u64) -> SearchQuery {
        SearchQuery::new(id, format!("Customer {}", id))
    }

    #[test]
    fn test_linear_found() {
        let store = store_of(&[(1, 50), (2, 150), (3, 100)]);
        let outcome = linear_search(&store, &query(3));
        assert!(outcome.is_found());
        assert_eq!(outcome.position, Some(3));
        assert_eq!(outcome.record.map(|r| r.order_id), Some(3));
        assert_eq!(outcome.comparisons, 3);
        assert!(outcome.elapsed_ms() >= 0.0);
    }

    #[test]
    fn test_linear_requires_both_keys() {
        let store = store_of(&[(1, 50), (2, 150)]);
        let outcome = linear_search(&store, &SearchQuery::new(2, "Customer 1"));
        assert!(!outcome.is_found());
        assert!(outcome.record.is_none());
        assert_eq!(outcome.comparisons, 2);
    }

    #[test]
    fn test_linear_returns_first_match() {
        let mut store = store_of(&[(1, 50), (4, 10)]);
        store.push(order(4, 99)).unwrap();
        let outcome = linear_search(&store, &query(4));
        assert_eq!(outcome.position, Some(2));
        assert_eq!(outcome.record.map(|r| r.total_amount), Some(order(4, 10).total_amount));
    }

    #[test]
    fn test_linear_does_not_reorder() {
        let store = store_of(&[(3, 10), (1, 30), (2, 20)]);
        linear_search(&store, &query(2));
        assert_eq!(store.order_ids(), vec![3, 1, 2]);
    }

    #[test]
    fn test_empty_store_is_not_found() {
        let mut store = RecordStore::new();
        assert!(!linear_search(&store, &query(1)).is_found());
        assert!(!sentinel_search(&store, &query(1)).is_found());
        assert!(!binary_search(&mut store, &query(1)).is_found());
    }

    #[test]
    fn test_sentinel_matches_linear() {
        let store = store_of(&[(5, 50), (2, 150), (9, 100), (1, 75)]);
        for id in 0..12 {
            let linear = linear_search(&store, &query(id));
            let sentinel = sentinel_search(&store, &query(id));
            assert_eq!(linear.position, sentinel.position, "order {}", id);
            assert_eq!(
                linear.record.map(|r| r.order_id),
                sentinel.record.map(|r| r.order_id)
            );
        }
    }

    #[test]
    fn test_sentinel_miss_counts_sentinel_comparison() {
        let store = store_of(&[(1, 10), (2, 20)]);
        let outcome = sentinel_search(&store, &query(7));
        assert!(!outcome.is_found());
        assert_eq!(outcome.comparisons, 3);
    }

    #[test]
    fn test_binary_sorts_store_first() {
        let mut store = store_of(&[(1, 50), (2, 150), (3, 100)]);
        let outcome = binary_search(&mut store, &query(3));
        // Sorted order is [2, 3, 1]; midpoint is order 3
        assert_eq!(outcome.position, Some(2));
        assert!(outcome.presort.is_some());
        drop(outcome);
        assert_eq!(store.order_ids(), vec![2, 3, 1]);
    }

    #[test]
    fn test_binary_misses_record_out_of_id_order() {
        // Revenue order is [1, 3, 2]: the midpoint is order 3, and since
        // 3 >= 2 bisection moves left, away from order 2 at position 3.
        let mut store = store_of(&[(1, 300), (2, 100), (3, 200)]);
        let outcome = binary_search(&mut store, &query(2));
        assert!(!outcome.is_found());
        drop(outcome);

        assert_eq!(store.order_ids(), vec![1, 3, 2]);
        assert!(linear_search(&store, &query(2)).is_found());
    }

    #[test]
    fn test_binary_finds_when_revenue_follows_id() {
        let pairs: Vec<(u64, i64)> = (1..=15).map(|i| (i, 1_000 - i as i64)).collect();
        let mut store = store_of(&pairs);
        for id in 1..=15 {
            let outcome = binary_search(&mut store, &query(id));
            assert_eq!(outcome.position, Some(id as usize));
        }
    }

    #[test]
    fn test_search_dispatch() {
        let mut store = store_of(&[(1, 50), (2, 150)]);
        let outcome = search(&mut store, SearchMethod::Sentinel, &query(1));
        assert_eq!(outcome.method, SearchMethod::Sentinel);
        assert_eq!(outcome.position, Some(1));
    }
}
