//! Comparator - the one ordering rule behind every sort and search.
//!
//! Orders rank by revenue, highest first; equal revenue falls back to the
//! lower order ID.

use std::cmp::Ordering;

use crate::record::OrderRecord;

/// Returns true if `a` should sort ahead of `b`.
///
/// `a.total_amount > b.total_amount`, or equal totals and
/// `a.order_id < b.order_id`. Two records tie only when both keys are
/// equal.
#[inline]
pub fn is_before(a: &OrderRecord, b: &OrderRecord) -> bool {
    if a.total_amount != b.total_amount {
        return a.total_amount > b.total_amount;
    }
    a.order_id < b.order_id
}

/// The same rule as an [`Ordering`]: `Less` means `a` ranks ahead of `b`.
#[inline]
pub fn ranking(a: &OrderRecord, b: &OrderRecord) -> Ordering {
    b.total_amount
        .cmp(&a.total_amount)
        .then_with(|| a.order_id.cmp(&b.order_id))
}

/// Returns true if no adjacent pair is out of order.
pub fn is_ranked<'a, I>(records: I) -> bool
where
    I: IntoIterator<Item = &'a OrderRecord>,
{
    let mut iter = records.into_iter();
    let Some(mut prev) = iter.next() else {
        return true;
    };
    for next in iter {
        if is_before(next, prev) {
            return false;
        }
        prev = next;
    }
    true
}
