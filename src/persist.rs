//! Persistence - load and save the `|`-delimited order file.
//!
//! One record per line, no header, columns in [`OrderRecord`] field order:
//!
//! ```text
//! 1001|Alice Tan|012-3456789|Rice Cooker|Food|2|45.50|91.00
//! ```
//!
//! Every physical line is exactly one record. Fields that contain the
//! delimiter or a double quote are written CSV-quoted (`"Tan|Lee"`); all
//! other fields are written bare, so plain files round-trip byte for byte.
//! A line is read as quoted only when its quoting is exactly what the
//! writer would produce; any other line is split on `|` as plain text, so
//! a stray `"` never swallows the lines after it. Text fields cannot hold
//! line breaks.

use std::fs::File;
use std::io::{BufRead, BufReader, Read, Write};
use std::path::Path;
use std::str::FromStr;

use csv::StringRecord;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{info, warn};

use crate::error::{PersistError, StoreError};
use crate::record::{OrderRecord, FIELD_COUNT};

/// Field delimiter.
pub const DELIMITER: u8 = b'|';

/// Default data file name.
pub const DEFAULT_DATA_FILE: &str = "orders_data.txt";

/// What to do with a line that cannot be parsed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoadPolicy {
    /// Fail the whole load on the first malformed line
    #[default]
    Strict,
    /// Skip malformed lines and report them
    SkipMalformed,
}

/// A line rejected under [`LoadPolicy::SkipMalformed`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MalformedLine {
    /// 1-based line number
    pub line: u64,
    pub reason: String,
}

/// Records read from a data source, in file order.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub records: Vec<OrderRecord>,
    pub skipped: Vec<MalformedLine>,
}

/// One line as text, before validation.
#[derive(Debug, Deserialize)]
struct OrderRow {
    order_id: String,
    customer_name: String,
    phone_number: String,
    product_name: String,
    product_category: String,
    quantity: String,
    unit_price: String,
    total_amount: String,
}

impl OrderRow {
    /// Validate and convert into a record.
    fn to_record(&self) -> Result<OrderRecord, String> {
        let order_id = self
            .order_id
            .trim()
            .parse::<u64>()
            .map_err(|e| format!("invalid order ID {:?}: {}", self.order_id, e))?;
        let quantity = self
            .quantity
            .trim()
            .parse::<u32>()
            .map_err(|e| format!("invalid quantity {:?}: {}", self.quantity, e))?;
        let unit_price = parse_money("unit price", &self.unit_price)?;
        let total_amount = parse_money("total amount", &self.total_amount)?;

        Ok(OrderRecord {
            order_id,
            customer_name: self.customer_name.clone(),
            phone_number: self.phone_number.clone(),
            product_name: self.product_name.clone(),
            product_category: self.product_category.clone(),
            quantity,
            unit_price,
            total_amount,
        })
    }
}

fn parse_money(field: &str, raw: &str) -> Result<Decimal, String> {
    let value = Decimal::from_str(raw.trim())
        .map_err(|e| format!("invalid {} {:?}: {}", field, raw, e))?;
    if value.is_sign_negative() && !value.is_zero() {
        return Err(format!("negative {} {}", field, value));
    }
    Ok(value)
}

// ============================================================================
// Loading
// ============================================================================

/// Read records from any byte source.
///
/// `capacity` bounds the number of records accepted; exceeding it fails the
/// load regardless of policy.
pub fn read_records<R: Read>(
    reader: R,
    policy: LoadPolicy,
    capacity: usize,
) -> Result<LoadReport, PersistError> {
    let mut report = LoadReport::default();

    for (index, text) in BufReader::new(reader).lines().enumerate() {
        let text = text?;
        if text.trim().is_empty() {
            continue;
        }
        let line = index as u64 + 1;

        let row = split_line(&text)?;
        let parsed = if row.len() != FIELD_COUNT {
            Err(format!("expected {} fields, found {}", FIELD_COUNT, row.len()))
        } else {
            row.deserialize::<OrderRow>(None)
                .map_err(|e| e.to_string())
                .and_then(|r| r.to_record())
        };

        match parsed {
            Ok(record) => {
                if report.records.len() >= capacity {
                    return Err(StoreError::Full { capacity }.into());
                }
                report.records.push(record);
            }
            Err(reason) => match policy {
                LoadPolicy::Strict => return Err(PersistError::Malformed { line, reason }),
                LoadPolicy::SkipMalformed => {
                    warn!(line, %reason, "skipping malformed record");
                    report.skipped.push(MalformedLine { line, reason });
                }
            },
        }
    }

    Ok(report)
}

/// Split one physical line into fields.
fn split_line(line: &str) -> Result<StringRecord, PersistError> {
    if line.contains('"') {
        if let Some(row) = quoted_fields(line)? {
            return Ok(row);
        }
    }
    Ok(line.split(DELIMITER as char).collect())
}

/// Parse `line` as CSV, keeping the result only if writing it back gives
/// the same line.
fn quoted_fields(line: &str) -> Result<Option<StringRecord>, PersistError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes());

    let mut row = StringRecord::new();
    if !reader.read_record(&mut row)? {
        return Ok(None);
    }

    let mut writer = line_writer(Vec::new());
    writer.write_record(&row)?;
    let written = writer.into_inner().map_err(|e| e.into_error())?;

    if written.strip_suffix(b"\n") == Some(line.as_bytes()) {
        Ok(Some(row))
    } else {
        Ok(None)
    }
}

/// Load every record from `path`.
pub fn load_all<P: AsRef<Path>>(
    path: P,
    policy: LoadPolicy,
    capacity: usize,
) -> Result<LoadReport, PersistError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let report = read_records(file, policy, capacity)?;
    info!(
        path = %path.display(),
        loaded = report.records.len(),
        skipped = report.skipped.len(),
        "orders loaded"
    );
    Ok(report)
}

// ============================================================================
// Saving
// ============================================================================

/// Write records, in the given order, to any byte sink.
pub fn write_records<'a, W, I>(writer: W, records: I) -> Result<usize, PersistError>
where
    W: Write,
    I: IntoIterator<Item = &'a OrderRecord>,
{
    let mut csv_writer = line_writer(writer);

    let mut written = 0usize;
    for record in records {
        if has_line_break(record) {
            return Err(PersistError::LineBreak {
                order_id: record.order_id,
            });
        }
        csv_writer.serialize(record)?;
        written += 1;
    }
    csv_writer.flush()?;
    Ok(written)
}

fn line_writer<W: Write>(writer: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Necessary)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer)
}

fn has_line_break(record: &OrderRecord) -> bool {
    [
        &record.customer_name,
        &record.phone_number,
        &record.product_name,
        &record.product_category,
    ]
    .iter()
    .any(|field| field.contains(['\n', '\r']))
}

/// Save records to `path`, replacing its contents.
pub fn save_all<'a, P, I>(path: P, records: I) -> Result<usize, PersistError>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = &'a OrderRecord>,
{
    let path = path.as_ref();
    let file = File::create(path)?;
    let written = write_records(file, records)?;
    info!(path = %path.display(), written, "orders saved");
    Ok(written)
}
