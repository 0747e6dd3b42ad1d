//! Array View - a random-access projection of the store's current order.
//!
//! A view holds one slot per record, each slot naming a position in the
//! store at the moment the view was built. Algorithms reorder the slots,
//! never the records, and the store applies the final slot order on
//! [`RecordStore::commit`](crate::store::RecordStore::commit).

use crate::record::OrderRecord;

/// Indexable projection of a [`RecordStore`](crate::store::RecordStore).
///
/// Views are built fresh for every sort or search and are owned by the
/// operation that created them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArrayView {
    /// Store positions in view order
    slots: Vec<usize>,
}

impl ArrayView {
    /// Identity view over `len` records (slot `i` names store position `i`).
    pub(crate) fn identity(len: usize) -> Self {
        Self {
            slots: (0..len).collect(),
        }
    }

    /// Number of slots (equal to the store size at build time).
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if the view has no slots.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Store position held by slot `index`.
    #[inline]
    pub fn get(&self, index: usize) -> usize {
        self.slots[index]
    }

    /// Slots in view order.
    #[inline]
    pub fn slots(&self) -> &[usize] {
        &self.slots
    }

    /// Mutable slots, for algorithms that shift or swap in place.
    #[inline]
    pub fn slots_mut(&mut self) -> &mut [usize] {
        &mut self.slots
    }

    /// Resolve a slot to the record it references.
    #[inline]
    pub fn record<'a>(&self, records: &'a [OrderRecord], index: usize) -> &'a OrderRecord {
        &records[self.slots[index]]
    }

    /// Resolve every slot, producing record references in view order.
    pub fn resolve<'a>(&self, records: &'a [OrderRecord]) -> Vec<&'a OrderRecord> {
        self.slots.iter().map(|&slot| &records[slot]).collect()
    }

    pub(crate) fn into_slots(self) -> Vec<usize> {
        self.slots
    }
}
