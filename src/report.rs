//! Reports - aggregate totals over the store's current records.
//!
//! Reports only read [`RecordStore::records`]; none of them reorder the
//! store. Groups are kept in first-seen order before ranking so that ties
//! resolve the same way on every run.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rustc_hash::FxHashMap;

use crate::record::OrderRecord;
use crate::store::RecordStore;

/// Number of customers listed by default in [`top_customers`].
pub const TOP_CUSTOMERS: usize = 10;

/// Available reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReportKind {
    /// Total sales across all orders
    Sales,
    /// Quantity sold per product
    Products,
    /// Orders and revenue per category
    Categories,
    /// Highest spending customers
    Customers,
}

/// Any report, tagged by kind.
#[derive(Clone, Debug)]
pub enum Report {
    Sales(SalesSummary),
    Products(ProductQuantities),
    Categories(CategorySales),
    Customers(TopCustomers),
}

/// Build the report of the requested kind.
pub fn build(store: &RecordStore, kind: ReportKind) -> Report {
    match kind {
        ReportKind::Sales => Report::Sales(total_sales(store)),
        ReportKind::Products => Report::Products(quantity_by_product(store)),
        ReportKind::Categories => Report::Categories(sales_by_category(store)),
        ReportKind::Customers => Report::Customers(top_customers(store, TOP_CUSTOMERS)),
    }
}

// ============================================================================
// Total Sales
// ============================================================================

#[derive(Clone, Debug)]
pub struct SalesSummary {
    pub orders: usize,
    pub total: Decimal,
    pub generated_at: DateTime<Utc>,
}

pub fn total_sales(store: &RecordStore) -> SalesSummary {
    SalesSummary {
        orders: store.len(),
        total: store.iter().map(|r| r.total_amount).sum(),
        generated_at: Utc::now(),
    }
}

// ============================================================================
// Quantity by Product
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProductQuantity {
    pub product_name: String,
    pub quantity: u64,
}

/// Products ranked by quantity sold, highest first.
#[derive(Clone, Debug)]
pub struct ProductQuantities {
    pub products: Vec<ProductQuantity>,
    pub generated_at: DateTime<Utc>,
}

impl ProductQuantities {
    /// Best selling product.
    pub fn highest(&self) -> Option<&ProductQuantity> {
        self.products.first()
    }

    /// Worst selling product (distinct from the highest).
    pub fn lowest(&self) -> Option<&ProductQuantity> {
        if self.products.len() > 1 {
            self.products.last()
        } else {
            None
        }
    }
}

pub fn quantity_by_product(store: &RecordStore) -> ProductQuantities {
    let mut products = group_by(
        store.records(),
        |r| &r.product_name,
        |name| ProductQuantity {
            product_name: name.to_string(),
            quantity: 0,
        },
        |entry: &mut ProductQuantity, r| entry.quantity += u64::from(r.quantity),
    );

    products.sort_by(|a, b| b.quantity.cmp(&a.quantity));

    ProductQuantities {
        products,
        generated_at: Utc::now(),
    }
}

// ============================================================================
// Sales by Category
// ============================================================================

#[derive(Clone, Debug, PartialEq)]
pub struct CategoryLine {
    pub category: String,
    pub orders: usize,
    pub total_sales: Decimal,
    /// Share of all orders, in percent
    pub share: f64,
}

/// Categories ranked by order count, most orders first.
#[derive(Clone, Debug)]
pub struct CategorySales {
    pub categories: Vec<CategoryLine>,
    pub total_orders: usize,
    pub grand_total: Decimal,
    pub generated_at: DateTime<Utc>,
}

pub fn sales_by_category(store: &RecordStore) -> CategorySales {
    let mut categories = group_by(
        store.records(),
        |r| &r.product_category,
        |name| CategoryLine {
            category: name.to_string(),
            orders: 0,
            total_sales: Decimal::ZERO,
            share: 0.0,
        },
        |entry: &mut CategoryLine, r| {
            entry.orders += 1;
            entry.total_sales += r.total_amount;
        },
    );

    let total_orders = store.len();
    for line in &mut categories {
        line.share = if total_orders > 0 {
            line.orders as f64 * 100.0 / total_orders as f64
        } else {
            0.0
        };
    }
    categories.sort_by(|a, b| b.orders.cmp(&a.orders));

    CategorySales {
        grand_total: categories.iter().map(|c| c.total_sales).sum(),
        categories,
        total_orders,
        generated_at: Utc::now(),
    }
}

// ============================================================================
// Top Customers
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CustomerSpending {
    pub customer_name: String,
    pub orders: usize,
    pub total_spent: Decimal,
}

/// Customers ranked by total spending, highest first.
#[derive(Clone, Debug)]
pub struct TopCustomers {
    pub customers: Vec<CustomerSpending>,
    /// Distinct customers before truncation
    pub unique_customers: usize,
    pub generated_at: DateTime<Utc>,
}

pub fn top_customers(store: &RecordStore, limit: usize) -> TopCustomers {
    let mut customers = group_by(
        store.records(),
        |r| &r.customer_name,
        |name| CustomerSpending {
            customer_name: name.to_string(),
            orders: 0,
            total_spent: Decimal::ZERO,
        },
        |entry: &mut CustomerSpending, r| {
            entry.orders += 1;
            entry.total_spent += r.total_amount;
        },
    );

    let unique_customers = customers.len();
    customers.sort_by(|a, b| b.total_spent.cmp(&a.total_spent));
    customers.truncate(limit);

    TopCustomers {
        customers,
        unique_customers,
        generated_at: Utc::now(),
    }
}

/// Fold records into one entry per key, in first-seen key order.
fn group_by<T, K, N, A>(records: &[OrderRecord], key: K, new: N, mut add: A) -> Vec<T>
where
    K: Fn(&OrderRecord) -> &String,
    N: Fn(&str) -> T,
    A: FnMut(&mut T, &OrderRecord),
{
    let mut index: FxHashMap<&str, usize> = FxHashMap::default();
    let mut entries: Vec<T> = Vec::new();

    for record in records {
        let name = key(record).as_str();
        let slot = *index.entry(name).or_insert_with(|| {
            entries.push(new(name));
            entries.len() - 1
        });
        add(&mut entries[slot], record);
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sale(id: u64, customer: &str, product: &str, category: &str, qty: u32, total: i64) -> OrderRecord {
        OrderRecord::new(
            id,
            customer,
            "011-1111111",
            product,
            category,
            qty,
            Decimal::new(total, 0),
            Decimal::new(total, 0),
        )
    }

    fn sample_store() -> RecordStore {
        let mut store = RecordStore::new();
        store.push(sale(1, "Alice", "Novel", "Books", 2, 40)).unwrap();
        store.push(sale(2, "Bob", "Ball", "Sports", 5, 100)).unwrap();
        store.push(sale(3, "Alice", "Ball", "Sports", 1, 20)).unwrap();
        store.push(sale(4, "Cara", "Lipstick", "Beauty", 3, 90)).unwrap();
        store.push(sale(5, "Bob", "Novel", "Books", 1, 20)).unwrap();
        store
    }

    #[test]
    fn test_total_sales() {
        let summary = total_sales(&sample_store());
        assert_eq!(summary.orders, 5);
        assert_eq!(summary.total, Decimal::new(270, 0));
    }

    #[test]
    fn test_quantity_by_product() {
        let report = quantity_by_product(&sample_store());
        let names: Vec<(&str, u64)> = report
            .products
            .iter()
            .map(|p| (p.product_name.as_str(), p.quantity))
            .collect();
        assert_eq!(names, vec![("Ball", 6), ("Novel", 3), ("Lipstick", 3)]);
        assert_eq!(report.highest().map(|p| p.quantity), Some(6));
        assert_eq!(report.lowest().map(|p| p.product_name.as_str()), Some("Lipstick"));
    }

    #[test]
    fn test_sales_by_category() {
        let report = sales_by_category(&sample_store());
        assert_eq!(report.total_orders, 5);
        assert_eq!(report.grand_total, Decimal::new(270, 0));

        let first = &report.categories[0];
        assert_eq!(first.category, "Books");
        assert_eq!(first.orders, 2);
        assert!((first.share - 40.0).abs() < 1e-9);
        assert_eq!(report.categories[2].category, "Beauty");
    }

    #[test]
    fn test_top_customers() {
        let report = top_customers(&sample_store(), 2);
        assert_eq!(report.unique_customers, 3);
        assert_eq!(report.customers.len(), 2);
        assert_eq!(report.customers[0].customer_name, "Bob");
        assert_eq!(report.customers[0].total_spent, Decimal::new(120, 0));
        assert_eq!(report.customers[0].orders, 2);
        assert_eq!(report.customers[1].customer_name, "Cara");
    }

    #[test]
    fn test_reports_on_empty_store() {
        let store = RecordStore::new();
        assert_eq!(total_sales(&store).total, Decimal::ZERO);
        assert!(quantity_by_product(&store).highest().is_none());
        assert!(sales_by_category(&store).categories.is_empty());
        assert!(top_customers(&store, TOP_CUSTOMERS).customers.is_empty());
    }

    #[test]
    fn test_build_dispatch() {
        let store = sample_store();
        assert!(matches!(build(&store, ReportKind::Sales), Report::Sales(_)));
        assert!(matches!(build(&store, ReportKind::Customers), Report::Customers(_)));
    }
}
