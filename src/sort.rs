//! Sort Engine - instrumented Insertion Sort and Quick Sort.
//!
//! Both algorithms:
//! 1. Build a fresh [`ArrayView`] of the store's current order
//! 2. Reorder the view's slots under [`is_before`], counting moves
//! 3. Commit the view back into the store
//!
//! Elapsed time covers step 2 only.

use std::fmt;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::compare::is_before;
use crate::record::OrderRecord;
use crate::store::RecordStore;

/// Available sorting algorithms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SortAlgorithm {
    /// O(n^2) worst, O(n) on sorted input
    Insertion,
    /// Lomuto partition, last element as pivot
    Quick,
}

impl SortAlgorithm {
    /// Display name used in result tables.
    pub const fn name(self) -> &'static str {
        match self {
            SortAlgorithm::Insertion => "Insertion Sort",
            SortAlgorithm::Quick => "Quick Sort",
        }
    }

    /// Worst case complexity, as shown to the user.
    pub const fn worst_case(self) -> &'static str {
        "O(n^2)"
    }

    /// Run this algorithm over `store`.
    pub fn run(self, store: &mut RecordStore) -> SortStats {
        match self {
            SortAlgorithm::Insertion => insertion_sort(store),
            SortAlgorithm::Quick => quick_sort(store),
        }
    }
}

impl fmt::Display for SortAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Instrumentation returned by every sort.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortStats {
    /// Which algorithm produced these numbers
    pub algorithm: SortAlgorithm,
    /// Element moves (insertion shifts) or swaps (quick sort)
    pub moves: u64,
    /// Time spent inside the algorithm
    pub elapsed: Duration,
}

impl SortStats {
    /// Elapsed time in milliseconds with sub-millisecond precision.
    #[inline]
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1_000.0
    }
}

// ============================================================================
// Insertion Sort
// ============================================================================

/// Sort the store with insertion sort.
///
/// Every one-slot shift of a predecessor counts as one move, so an already
/// sorted store reports zero moves.
pub fn insertion_sort(store: &mut RecordStore) -> SortStats {
    let mut view = store.view();

    let start = Instant::now();
    let moves = insertion_pass(store.records(), view.slots_mut());
    let elapsed = start.elapsed();

    store.commit(view);

    let stats = SortStats {
        algorithm: SortAlgorithm::Insertion,
        moves,
        elapsed,
    };
    debug!(records = store.len(), moves, elapsed_ms = stats.elapsed_ms(), "insertion sort done");
    stats
}

fn insertion_pass(records: &[OrderRecord], slots: &mut [usize]) -> u64 {
    let mut moves = 0u64;

    for i in 1..slots.len() {
        let key = slots[i];
        let mut j = i;

        while j > 0 && is_before(&records[key], &records[slots[j - 1]]) {
            slots[j] = slots[j - 1];
            moves += 1;
            j -= 1;
        }
        slots[j] = key;
    }

    moves
}

// ============================================================================
// Quick Sort
// ============================================================================

/// Sort the store with quick sort.
///
/// Partitions use the last element of each range as pivot. Ranges are kept
/// on an explicit stack and the smaller side is always processed first, so
/// sorted or reverse-sorted input of any size cannot overflow the call
/// stack (the stack holds at most `log2(n)` pending ranges).
pub fn quick_sort(store: &mut RecordStore) -> SortStats {
    let mut view = store.view();

    let start = Instant::now();
    let moves = quick_pass(store.records(), view.slots_mut());
    let elapsed = start.elapsed();

    store.commit(view);

    let stats = SortStats {
        algorithm: SortAlgorithm::Quick,
        moves,
        elapsed,
    };
    debug!(records = store.len(), moves, elapsed_ms = stats.elapsed_ms(), "quick sort done");
    stats
}

fn quick_pass(records: &[OrderRecord], slots: &mut [usize]) -> u64 {
    let mut moves = 0u64;
    if slots.len() < 2 {
        return moves;
    }

    // Inclusive (low, high) ranges still to partition
    let mut pending = vec![(0usize, slots.len() - 1)];

    while let Some((mut low, mut high)) = pending.pop() {
        while low < high {
            let pivot = partition(records, slots, low, high, &mut moves);

            let left_len = pivot - low;
            let right_len = high - pivot;

            // Defer the larger side, keep looping on the smaller one
            if left_len < right_len {
                if pivot + 1 < high {
                    pending.push((pivot + 1, high));
                }
                if pivot == low {
                    break;
                }
                high = pivot - 1;
            } else {
                if pivot > low + 1 {
                    pending.push((low, pivot - 1));
                }
                low = pivot + 1;
            }
        }
    }

    moves
}

/// Lomuto partition of `slots[low..=high]` around `slots[high]`.
///
/// Returns the pivot's final index. Every swap counts as a move, including
/// self-swaps and the final pivot placement.
fn partition(
    records: &[OrderRecord],
    slots: &mut [usize],
    low: usize,
    high: usize,
    moves: &mut u64,
) -> usize {
    let pivot = &records[slots[high]];

    // Next index to receive an element ranked ahead of the pivot
    let mut boundary = low;
    for j in low..high {
        if is_before(&records[slots[j]], pivot) {
            slots.swap(boundary, j);
            *moves += 1;
            boundary += 1;
        }
    }
    slots.swap(boundary, high);
    *moves += 1;

    boundary
}

// ============================================================================
// Comparison
// ============================================================================

/// Both algorithms run against the same starting order.
#[derive(Clone, Copy, Debug)]
pub struct SortComparison {
    pub insertion: SortStats,
    pub quick: SortStats,
}

impl SortComparison {
    /// The faster algorithm and how much faster it was, in percent of the
    /// slower one's time. Equal timings favour insertion sort.
    pub fn winner(&self) -> (SortAlgorithm, f64) {
        let insertion = self.insertion.elapsed_ms();
        let quick = self.quick.elapsed_ms();

        if quick < insertion {
            (SortAlgorithm::Quick, (insertion - quick) / insertion * 100.0)
        } else if quick > 0.0 {
            (SortAlgorithm::Insertion, (quick - insertion) / quick * 100.0)
        } else {
            (SortAlgorithm::Insertion, 0.0)
        }
    }
}

/// Run both algorithms on the store's current order.
///
/// Insertion sort runs on a throwaway view that is never committed, so the
/// starting order is still in place for quick sort. The store is left in
/// quick sort's output order.
pub fn compare_sorts(store: &mut RecordStore) -> SortComparison {
    let mut trial = store.view();

    let start = Instant::now();
    let moves = insertion_pass(store.records(), trial.slots_mut());
    let insertion = SortStats {
        algorithm: SortAlgorithm::Insertion,
        moves,
        elapsed: start.elapsed(),
    };
    debug!(
        records = store.len(),
        moves,
        elapsed_ms = insertion.elapsed_ms(),
        "insertion sort trial done"
    );

    let quick = quick_sort(store);

    SortComparison { insertion, quick }
}
