//! Console formatting for records, statistics and reports.
//!
//! Everything writes to a caller-supplied [`Write`] so that the menu,
//! the one-shot CLI and tests share one renderer.

use std::io::{self, Write};

use rust_decimal::Decimal;

use crate::command::SearchHit;
use crate::record::OrderRecord;
use crate::report::{CategorySales, ProductQuantities, Report, SalesSummary, TopCustomers};
use crate::sort::{SortComparison, SortStats};

const RULE: &str = "============================================================";
const WIDE_RULE: &str = "========================================================================================================================";
const THIN_RULE: &str = "------------------------------------------------------------";

/// Format money with two decimals and thousands separators
/// (`1234567.891` -> `1,234,567.89`).
pub fn format_money(value: Decimal) -> String {
    let fixed = format!("{:.2}", value.round_dp(2));
    let (sign, digits) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}{}.{}", sign, grouped, frac_part)
}

/// First `width` characters of `text`.
fn clip(text: &str, width: usize) -> &str {
    match text.char_indices().nth(width) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// Boxed section title.
pub fn write_title<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    writeln!(out, "\n{}", RULE)?;
    writeln!(out, "{:^60}", title)?;
    writeln!(out, "{}", RULE)
}

// ============================================================================
// Records
// ============================================================================

/// One table row, `index` is 1-based.
pub fn write_record_row<W: Write>(out: &mut W, index: usize, record: &OrderRecord) -> io::Result<()> {
    writeln!(
        out,
        "{:>3}    {:>5}   {:<20} {:<14} {:<20} {:<15} {:>4} {:>10.2} {:>11.2}",
        index,
        record.order_id,
        clip(&record.customer_name, 20),
        clip(&record.phone_number, 14),
        clip(&record.product_name, 20),
        clip(&record.product_category, 15),
        record.quantity,
        record.unit_price,
        record.total_amount,
    )
}

/// Table of the first `limit` records.
pub fn write_record_table<W: Write>(
    out: &mut W,
    heading: &str,
    records: &[OrderRecord],
    limit: usize,
) -> io::Result<()> {
    let shown = records.len().min(limit);

    writeln!(out, "\n{} ORDERS (First {})", heading, shown)?;
    writeln!(out, "{}", WIDE_RULE)?;
    writeln!(
        out,
        " No  OrderID  Customer Name        Phone Number   Product Name         Category          Qty    UnitPrice  TotalAmt"
    )?;
    writeln!(out, "{}", WIDE_RULE)?;
    for (i, record) in records.iter().take(shown).enumerate() {
        write_record_row(out, i + 1, record)?;
    }
    writeln!(out, "{}", WIDE_RULE)?;
    writeln!(out, "\n  Total orders displayed: {} / {}", shown, records.len())
}

/// Field-by-field detail of a single record.
pub fn write_record_detail<W: Write>(out: &mut W, record: &OrderRecord) -> io::Result<()> {
    writeln!(out, "  Order ID: {}", record.order_id)?;
    writeln!(out, "  Customer: {}", record.customer_name)?;
    writeln!(out, "  Phone: {}", record.phone_number)?;
    writeln!(out, "  Product: {}", record.product_name)?;
    writeln!(out, "  Category: {}", record.product_category)?;
    writeln!(out, "  Quantity: {}", record.quantity)?;
    writeln!(out, "  Total Amount: RM {}", format_money(record.total_amount))
}

// ============================================================================
// Sort / Search statistics
// ============================================================================

pub fn write_sort_stats<W: Write>(out: &mut W, stats: &SortStats) -> io::Result<()> {
    let title = format!("{} RESULTS", stats.algorithm.name().to_uppercase());
    writeln!(out, "\n  ========================================================")?;
    writeln!(out, "  {:^56}", title)?;
    writeln!(out, "  ========================================================")?;
    writeln!(out, "    Execution Time: {:.2} ms", stats.elapsed_ms())?;
    writeln!(out, "    Number of Swaps: {}", stats.moves)?;
    writeln!(out, "    Worst Case Complexity: {}", stats.algorithm.worst_case())?;
    writeln!(out, "  ========================================================")
}

pub fn write_comparison<W: Write>(out: &mut W, comparison: &SortComparison) -> io::Result<()> {
    const BORDER: &str = "  +------------------+-----------------+-------------------------+";

    writeln!(out, "\n  {:^62}", "SORTING ALGORITHMS COMPARISON")?;
    writeln!(out, "{}", BORDER)?;
    writeln!(out, "  | Algorithm        | Time (ms)       | Swaps                   |")?;
    writeln!(out, "{}", BORDER)?;
    for stats in [&comparison.insertion, &comparison.quick] {
        writeln!(
            out,
            "  | {:<16} | {:>15.2} | {:>23} |",
            stats.algorithm.name(),
            stats.elapsed_ms(),
            stats.moves
        )?;
    }
    writeln!(out, "{}", BORDER)?;

    let (winner, improvement) = comparison.winner();
    writeln!(out, "\n  {} is faster by {:.2}%", winner.name(), improvement)
}

pub fn write_search<W: Write>(out: &mut W, hit: &SearchHit) -> io::Result<()> {
    writeln!(out, "\n  {}", RULE)?;
    match (&hit.record, hit.position) {
        (Some(record), Some(position)) => {
            writeln!(out, "  Status: FOUND")?;
            writeln!(out, "  Position: {}", position)?;
            writeln!(out, "  {}", THIN_RULE)?;
            write_record_detail(out, record)?;
        }
        _ => writeln!(out, "  Status: NOT FOUND")?,
    }
    writeln!(out, "  Comparisons: {}", hit.comparisons)?;
    writeln!(out, "  Execution Time: {:.4} ms", hit.elapsed_ms())?;
    if let Some(presort) = &hit.presort {
        writeln!(
            out,
            "  Pre-sort: {} ({:.2} ms, {} swaps)",
            presort.algorithm.name(),
            presort.elapsed_ms(),
            presort.moves
        )?;
    }
    writeln!(out, "  {}", RULE)
}

// ============================================================================
// Reports
// ============================================================================

pub fn write_report<W: Write>(out: &mut W, report: &Report) -> io::Result<()> {
    match report {
        Report::Sales(summary) => write_sales(out, summary),
        Report::Products(products) => write_products(out, products),
        Report::Categories(categories) => write_categories(out, categories),
        Report::Customers(customers) => write_customers(out, customers),
    }
}

fn write_sales<W: Write>(out: &mut W, summary: &SalesSummary) -> io::Result<()> {
    const BORDER: &str = "  +------------------------------------------------------------+";

    write_title(out, "TOTAL SALES REPORT")?;
    writeln!(out, "{}", BORDER)?;
    writeln!(out, "  | {:<58} |", "Sales Summary")?;
    writeln!(out, "{}", BORDER)?;
    writeln!(out, "  | Total Orders:   {:>6} orders{:>29} |", summary.orders, "")?;
    writeln!(out, "  | Total Sales:    RM {:>18}{:>19} |", format_money(summary.total), "")?;
    writeln!(out, "{}", BORDER)?;
    writeln!(out, "  Generated: {}", summary.generated_at.format("%Y-%m-%d %H:%M:%S UTC"))
}

fn write_products<W: Write>(out: &mut W, report: &ProductQuantities) -> io::Result<()> {
    const BORDER: &str = "  +----+-------------------------+------------------+";

    write_title(out, "TOTAL QUANTITY SOLD (BY PRODUCT)")?;
    writeln!(out, "{}", BORDER)?;
    writeln!(out, "  | No | Product Name            | Total Quantity   |")?;
    writeln!(out, "{}", BORDER)?;
    if let Some(highest) = report.highest() {
        writeln!(out, "  | {:>2} | {:<23} | {:>16} |", 1, clip(&highest.product_name, 23), highest.quantity)?;
    }
    if let Some(lowest) = report.lowest() {
        writeln!(
            out,
            "  | {:>2} | {:<23} | {:>16} |",
            report.products.len(),
            clip(&lowest.product_name, 23),
            lowest.quantity
        )?;
    }
    writeln!(out, "{}", BORDER)?;
    writeln!(out, "\n  Note: Showing highest and lowest selling products only.")?;
    writeln!(out, "        Total products tracked: {}", report.products.len())
}

fn write_categories<W: Write>(out: &mut W, report: &CategorySales) -> io::Result<()> {
    const BORDER: &str = "  +-----------------+------------+------------------+--------------+";

    write_title(out, "SALES ANALYSIS BY CATEGORY")?;
    writeln!(out, "{}", BORDER)?;
    writeln!(out, "  | Category        | Orders     | Total Sales (RM) | Percentage % |")?;
    writeln!(out, "{}", BORDER)?;
    for line in &report.categories {
        writeln!(
            out,
            "  | {:<15} | {:>10} | {:>16} | {:>12.2} |",
            clip(&line.category, 15),
            line.orders,
            format_money(line.total_sales),
            line.share
        )?;
    }
    writeln!(out, "{}", BORDER)?;
    writeln!(
        out,
        "  | {:<15} | {:>10} | {:>16} | {:>12} |",
        "TOTAL",
        report.total_orders,
        format_money(report.grand_total),
        "100.00"
    )?;
    writeln!(out, "{}", BORDER)
}

fn write_customers<W: Write>(out: &mut W, report: &TopCustomers) -> io::Result<()> {
    const BORDER: &str = "  +----+--------------------+--------+------------------+";

    write_title(out, "TOP CUSTOMERS BY SPENDING")?;
    writeln!(out, "{}", BORDER)?;
    writeln!(out, "  | No | Customer Name      | Orders | Total Spent (RM) |")?;
    writeln!(out, "{}", BORDER)?;
    for (i, customer) in report.customers.iter().enumerate() {
        writeln!(
            out,
            "  | {:>2} | {:<18} | {:>6} | {:>16} |",
            i + 1,
            clip(&customer.customer_name, 18),
            customer.orders,
            format_money(customer.total_spent)
        )?;
    }
    writeln!(out, "{}", BORDER)?;
    writeln!(out, "  Unique customers: {}", report.unique_customers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::order;
    use crate::sort::SortAlgorithm;
    use std::time::Duration;

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(Decimal::new(123456789, 2)), "1,234,567.89");
        assert_eq!(format_money(Decimal::new(999, 0)), "999.00");
        assert_eq!(format_money(Decimal::new(1000, 0)), "1,000.00");
        assert_eq!(format_money(Decimal::ZERO), "0.00");
        assert_eq!(format_money(Decimal::new(-12345, 1)), "-1,234.50");
    }

    #[test]
    fn test_clip_counts_chars() {
        assert_eq!(clip("Mei Ling Tan", 3), "Mei");
        assert_eq!(clip("Zoë", 10), "Zoë");
        assert_eq!(clip("Zoëy", 3), "Zoë");
    }

    #[test]
    fn test_record_table_limits_rows() {
        let records = vec![order(1, 10), order(2, 20), order(3, 30)];
        let text = render(|out| write_record_table(out, "UNSORTED", &records, 2));
        assert!(text.contains("UNSORTED ORDERS (First 2)"));
        assert!(text.contains("Customer 2"));
        assert!(!text.contains("Customer 3"));
        assert!(text.contains("Total orders displayed: 2 / 3"));
    }

    #[test]
    fn test_sort_stats_render() {
        let stats = SortStats {
            algorithm: SortAlgorithm::Quick,
            moves: 42,
            elapsed: Duration::from_micros(1500),
        };
        let text = render(|out| write_sort_stats(out, &stats));
        assert!(text.contains("QUICK SORT RESULTS"));
        assert!(text.contains("Execution Time: 1.50 ms"));
        assert!(text.contains("Number of Swaps: 42"));
    }

    #[test]
    fn test_search_not_found_render() {
        let hit = SearchHit {
            method: crate::search::SearchMethod::Linear,
            query: crate::search::SearchQuery::new(9, "Nobody"),
            position: None,
            record: None,
            comparisons: 3,
            elapsed: Duration::ZERO,
            presort: None,
        };
        let text = render(|out| write_search(out, &hit));
        assert!(text.contains("Status: NOT FOUND"));
        assert!(text.contains("Comparisons: 3"));
    }
}
