//! Record Store - the owning, ordered collection of all orders.
//!
//! A single contiguous vector is the only representation: it serves both
//! sequential traversal and random access. Sorting never recreates
//! records; it builds an [`ArrayView`], reorders the view and commits it.

use tracing::debug;

use crate::error::StoreError;
use crate::record::{OrderRecord, MAX_RECORDS};
use crate::view::ArrayView;

/// Ordered collection of [`OrderRecord`]s.
///
/// Insertion order is the "unsorted" order. The store exclusively owns its
/// records; references handed out by [`records`](Self::records) cannot
/// outlive a reorder or reload.
pub struct RecordStore {
    /// Records in current traversal order
    records: Vec<OrderRecord>,
    /// Maximum number of records accepted
    capacity: usize,
}

impl RecordStore {
    /// Create an empty store with the default capacity ([`MAX_RECORDS`]).
    pub fn new() -> Self {
        Self::with_capacity(MAX_RECORDS)
    }

    /// Create an empty store accepting at most `capacity` records.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity.min(MAX_RECORDS)),
            capacity,
        }
    }

    /// Build a store from records in the given order.
    ///
    /// Fails if there are more records than `capacity`.
    pub fn from_records(records: Vec<OrderRecord>, capacity: usize) -> Result<Self, StoreError> {
        if records.len() > capacity {
            return Err(StoreError::Full { capacity });
        }
        Ok(Self { records, capacity })
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Append a record at the end of the current order.
    pub fn push(&mut self, record: OrderRecord) -> Result<(), StoreError> {
        if self.is_full() {
            return Err(StoreError::Full {
                capacity: self.capacity,
            });
        }
        self.records.push(record);
        Ok(())
    }

    /// Replace every record (reload). The previous records are dropped.
    pub fn replace_all(&mut self, records: Vec<OrderRecord>) -> Result<(), StoreError> {
        if records.len() > self.capacity {
            return Err(StoreError::Full {
                capacity: self.capacity,
            });
        }
        self.records = records;
        debug!(count = self.records.len(), "store reloaded");
        Ok(())
    }

    /// Remove all records.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Take the records out, in current order.
    pub fn into_records(self) -> Vec<OrderRecord> {
        self.records
    }

    // ========================================================================
    // Array View
    // ========================================================================

    /// Build a fresh view of the current order.
    pub fn view(&self) -> ArrayView {
        ArrayView::identity(self.records.len())
    }

    /// Reorder the store so that sequential reads follow `view`.
    ///
    /// The permutation is applied in place by walking its cycles, so
    /// records are swapped, never cloned.
    ///
    /// # Panics
    /// Panics if the view length differs from the store size. That means
    /// the view was built from another store or before a reload, which is a
    /// programming error.
    pub fn commit(&mut self, view: ArrayView) {
        assert_eq!(
            view.len(),
            self.records.len(),
            "array view length does not match store size"
        );

        let mut slots = view.into_slots();
        debug_assert!(is_permutation(&slots), "array view is not a permutation");

        for start in 0..self.records.len() {
            let mut current = start;
            while slots[current] != start {
                let next = slots[current];
                self.records.swap(current, next);
                slots[current] = current;
                current = next;
            }
            slots[current] = current;
        }
    }

    // ========================================================================
    // Access
    // ========================================================================

    /// Read-only snapshot of all records in current order.
    #[inline]
    pub fn records(&self) -> &[OrderRecord] {
        &self.records
    }

    /// Iterate records in current order.
    pub fn iter(&self) -> std::slice::Iter<'_, OrderRecord> {
        self.records.iter()
    }

    /// Record at a 0-based position.
    pub fn get(&self, index: usize) -> Option<&OrderRecord> {
        self.records.get(index)
    }

    /// Number of records.
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the store holds no records.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Maximum number of records accepted.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns true if no further record can be appended.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.records.len() >= self.capacity
    }

    /// Order IDs in current order.
    pub fn order_ids(&self) -> Vec<u64> {
        self.records.iter().map(|r| r.order_id).collect()
    }
}

fn is_permutation(slots: &[usize]) -> bool {
    let mut seen = vec![false; slots.len()];
    for &slot in slots {
        if slot >= slots.len() || seen[slot] {
            return false;
        }
        seen[slot] = true;
    }
    true
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a RecordStore {
    type Item = &'a OrderRecord;
    type IntoIter = std::slice::Iter<'a, OrderRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl std::fmt::Debug for RecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordStore")
            .field("len", &self.records.len())
            .field("capacity", &self.capacity)
            .finish()
    }
}
