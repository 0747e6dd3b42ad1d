//! Order Record - the single data entity held by the store.
//!
//! Money fields are exact decimals so that revenue ordering and report
//! totals never suffer from binary floating point drift.

use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

/// Maximum number of records a store accepts by default.
pub const MAX_RECORDS: usize = 10_000;

/// Number of fields in one persisted record.
pub const FIELD_COUNT: usize = 8;

/// A single customer order.
///
/// # Field order
///
/// | # | Field              | Type      |
/// |---|--------------------|-----------|
/// | 1 | `order_id`         | u64       |
/// | 2 | `customer_name`    | String    |
/// | 3 | `phone_number`     | String    |
/// | 4 | `product_name`     | String    |
/// | 5 | `product_category` | String    |
/// | 6 | `quantity`         | u32       |
/// | 7 | `unit_price`       | Decimal   |
/// | 8 | `total_amount`     | Decimal   |
///
/// The declaration order matches the persisted column order, which the
/// serde derive relies on when writing records.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct OrderRecord {
    /// Order ID (expected unique, not enforced)
    pub order_id: u64,

    /// Customer name, matched exactly by searches
    pub customer_name: String,

    pub phone_number: String,

    pub product_name: String,

    /// Product category (reports only)
    pub product_category: String,

    /// Units ordered
    pub quantity: u32,

    /// Price per unit
    pub unit_price: Decimal,

    /// Order revenue as recorded in the source data.
    ///
    /// Authoritative for ordering even when it disagrees with
    /// `quantity * unit_price`.
    pub total_amount: Decimal,
}

impl OrderRecord {
    /// Create a record with the given fields.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        order_id: u64,
        customer_name: impl Into<String>,
        phone_number: impl Into<String>,
        product_name: impl Into<String>,
        product_category: impl Into<String>,
        quantity: u32,
        unit_price: Decimal,
        total_amount: Decimal,
    ) -> Self {
        Self {
            order_id,
            customer_name: customer_name.into(),
            phone_number: phone_number.into(),
            product_name: product_name.into(),
            product_category: product_category.into(),
            quantity,
            unit_price,
            total_amount,
        }
    }

    /// Create a record carrying only the two search keys.
    ///
    /// Used as the sentinel for sentinel linear search; every other field
    /// is empty or zero.
    pub fn probe(order_id: u64, customer_name: impl Into<String>) -> Self {
        Self {
            order_id,
            customer_name: customer_name.into(),
            phone_number: String::new(),
            product_name: String::new(),
            product_category: String::new(),
            quantity: 0,
            unit_price: Decimal::ZERO,
            total_amount: Decimal::ZERO,
        }
    }

    /// Returns true if both search keys match exactly (case-sensitive).
    #[inline]
    pub fn matches(&self, order_id: u64, customer_name: &str) -> bool {
        self.order_id == order_id && self.customer_name == customer_name
    }

    /// `quantity * unit_price`, independent of the stored total.
    pub fn computed_total(&self) -> Decimal {
        Decimal::from(self.quantity) * self.unit_price
    }
}

impl fmt::Debug for OrderRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderRecord")
            .field("order_id", &self.order_id)
            .field("customer_name", &self.customer_name)
            .field("product_name", &self.product_name)
            .field("quantity", &self.quantity)
            .field("total_amount", &self.total_amount)
            .finish()
    }
}

#[cfg(test)]
pub(crate) fn order(order_id: u64, total: i64) -> OrderRecord {
    OrderRecord::new(
        order_id,
        format!("Customer {}", order_id),
        "012-3456789",
        "Widget",
        "Toys",
        1,
        Decimal::new(total, 0),
        Decimal::new(total, 0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_new() {
        let record = OrderRecord::new(
            123,
            "Alice Tan",
            "012-3456789",
            "Rice Cooker",
            "Food",
            2,
            Decimal::new(4550, 2),
            Decimal::new(9100, 2),
        );
        assert_eq!(record.order_id, 123);
        assert_eq!(record.customer_name, "Alice Tan");
        assert_eq!(record.quantity, 2);
        assert_eq!(record.total_amount, Decimal::new(9100, 2));
    }

    #[test]
    fn test_probe_is_blank_apart_from_keys() {
        let probe = OrderRecord::probe(7, "Bob");
        assert!(probe.matches(7, "Bob"));
        assert!(probe.product_name.is_empty());
        assert_eq!(probe.total_amount, Decimal::ZERO);
    }

    #[test]
    fn test_matches_is_case_sensitive() {
        let record = order(1, 10);
        assert!(record.matches(1, "Customer 1"));
        assert!(!record.matches(1, "customer 1"));
        assert!(!record.matches(2, "Customer 1"));
    }

    #[test]
    fn test_total_is_not_recomputed() {
        let mut record = order(1, 10);
        record.quantity = 3;
        assert_eq!(record.computed_total(), Decimal::new(30, 0));
        assert_eq!(record.total_amount, Decimal::new(10, 0));
    }
}
