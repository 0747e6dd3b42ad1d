//! Synthetic order generator for demos, benches and latency reports.
//!
//! A 64-bit LCG drives every choice, so a seed always yields the same
//! orders.

use rust_decimal::Decimal;

use crate::record::OrderRecord;

const FIRST_NAMES: [&str; 12] = [
    "Aisyah", "Daniel", "Mei Ling", "Arjun", "Siti", "Jason", "Priya", "Hafiz", "Wei Jie", "Nurul",
    "Kavitha", "Ahmad",
];

const LAST_NAMES: [&str; 10] = [
    "Tan", "Lim", "Abdullah", "Raj", "Wong", "Ismail", "Lee", "Kumar", "Chong", "Rahman",
];

/// (category, products)
const CATALOG: [(&str, [&str; 4]); 6] = [
    ("Food", ["Rice Cooker Set", "Coffee Beans", "Honey Jar", "Snack Box"]),
    ("Clothing", ["Denim Jacket", "Batik Shirt", "Running Shorts", "Wool Scarf"]),
    ("Books", ["Mystery Novel", "Cookbook", "Atlas", "Poetry Collection"]),
    ("Toys", ["Building Blocks", "Puzzle 1000pc", "Plush Bear", "Toy Drone"]),
    ("Sports", ["Badminton Racket", "Yoga Mat", "Football", "Dumbbell Pair"]),
    ("Beauty", ["Face Serum", "Lipstick", "Sunscreen", "Hair Oil"]),
];

/// Deterministic, endless stream of plausible orders.
///
/// Order IDs count up from `first_id`; totals are always
/// `quantity * unit_price`.
#[derive(Clone, Debug)]
pub struct SyntheticOrders {
    state: u64,
    next_id: u64,
}

impl SyntheticOrders {
    pub fn new(seed: u64) -> Self {
        Self::starting_at(seed, 1001)
    }

    pub fn starting_at(seed: u64, first_id: u64) -> Self {
        Self {
            state: seed,
            next_id: first_id,
        }
    }

    #[inline]
    fn next_u32(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        // High bits have the better period
        (self.state >> 32) as u32
    }

    #[inline]
    fn pick(&mut self, n: usize) -> usize {
        self.next_u32() as usize % n
    }
}

impl Iterator for SyntheticOrders {
    type Item = OrderRecord;

    fn next(&mut self) -> Option<OrderRecord> {
        let order_id = self.next_id;
        self.next_id += 1;

        let customer = format!(
            "{} {}",
            FIRST_NAMES[self.pick(FIRST_NAMES.len())],
            LAST_NAMES[self.pick(LAST_NAMES.len())]
        );
        let phone = format!(
            "01{}-{:07}",
            self.pick(10),
            self.next_u32() % 10_000_000
        );
        let (category, products) = CATALOG[self.pick(CATALOG.len())];
        let product = products[self.pick(products.len())];

        let quantity = 1 + self.pick(20) as u32;
        // 5.00 to 504.99
        let unit_price = Decimal::new(500 + (self.next_u32() % 50_000) as i64, 2);
        let total_amount = Decimal::from(quantity) * unit_price;

        Some(OrderRecord::new(
            order_id,
            customer,
            phone,
            product,
            category,
            quantity,
            unit_price,
            total_amount,
        ))
    }
}

/// Generate `count` orders from `seed`.
pub fn generate(seed: u64, count: usize) -> Vec<OrderRecord> {
    SyntheticOrders::new(seed).take(count).collect()
}
