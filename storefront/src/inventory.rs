//! Inventory records, stock status, dashboard stats and the spreadsheet codec.
//!
//! The spreadsheet is plain CSV with the column headers below. Export writes
//! every column; import only needs `Product Name` and `Quantity`, matches
//! headers case-insensitively and re-derives `Status` from the quantity.

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use uuid::Uuid;

pub const DEFAULT_LOW_STOCK_THRESHOLD: i32 = 5;

pub const SPREADSHEET_HEADERS: [&str; 7] =
    ["Product Name", "Size", "Color", "Quantity", "Status", "Location", "Last Updated"];

#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    #[error("spreadsheet error: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("timestamp format error: {0}")]
    Format(#[from] time::error::Format),
    #[error("missing required column `{0}`")]
    MissingColumn(&'static str),
}

// =============================================================================
// RECORDS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
}

impl StockStatus {
    #[must_use]
    pub fn from_quantity(quantity: i32, low_stock_threshold: i32) -> Self {
        if quantity <= 0 {
            Self::OutOfStock
        } else if quantity <= low_stock_threshold {
            Self::LowStock
        } else {
            Self::InStock
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::InStock => "In Stock",
            Self::LowStock => "Low Stock",
            Self::OutOfStock => "Out of Stock",
        }
    }
}

/// One stock line: a product variant (size + color) at a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: Uuid,
    pub product_id: Option<Uuid>,
    pub product_name: String,
    pub size: String,
    pub color: String,
    pub quantity: i32,
    pub location: String,
    #[serde(with = "time::serde::rfc3339")]
    pub last_updated: OffsetDateTime,
}

impl InventoryItem {
    #[must_use]
    pub fn status(&self, low_stock_threshold: i32) -> StockStatus {
        StockStatus::from_quantity(self.quantity, low_stock_threshold)
    }
}

/// Numbers behind the admin dashboard stat cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySummary {
    pub total_items: usize,
    pub total_units: i64,
    pub low_stock: usize,
    pub out_of_stock: usize,
}

impl InventorySummary {
    #[must_use]
    pub fn from_items(items: &[InventoryItem], low_stock_threshold: i32) -> Self {
        items.iter().fold(Self::default(), |mut acc, item| {
            acc.total_items += 1;
            acc.total_units += i64::from(item.quantity.max(0));
            match item.status(low_stock_threshold) {
                StockStatus::LowStock => acc.low_stock += 1,
                StockStatus::OutOfStock => acc.out_of_stock += 1,
                StockStatus::InStock => {}
            }
            acc
        })
    }
}

// =============================================================================
// EXPORT
// =============================================================================

/// Write `items` as a spreadsheet with the standard headers.
///
/// # Errors
///
/// Returns an error if writing or timestamp formatting fails.
pub fn export_csv<W: Write>(items: &[InventoryItem], low_stock_threshold: i32, writer: W) -> Result<(), InventoryError> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(SPREADSHEET_HEADERS)?;
    for item in items {
        let quantity = item.quantity.to_string();
        let last_updated = item.last_updated.format(&Rfc3339)?;
        out.write_record([
            item.product_name.as_str(),
            item.size.as_str(),
            item.color.as_str(),
            quantity.as_str(),
            item.status(low_stock_threshold).label(),
            item.location.as_str(),
            last_updated.as_str(),
        ])?;
    }
    out.flush()?;
    Ok(())
}

// =============================================================================
// IMPORT
// =============================================================================

/// A parsed spreadsheet row, not yet matched to a stored item.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportRow {
    pub product_name: String,
    pub size: String,
    pub color: String,
    pub quantity: i32,
    pub location: String,
    pub last_updated: Option<OffsetDateTime>,
}

impl ImportRow {
    /// Whether this row describes the same variant as `item`.
    #[must_use]
    pub fn matches(&self, item: &InventoryItem) -> bool {
        self.product_name.eq_ignore_ascii_case(&item.product_name)
            && self.size.eq_ignore_ascii_case(&item.size)
            && self.color.eq_ignore_ascii_case(&item.color)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportReport {
    pub rows: Vec<ImportRow>,
    /// One `Row N: ...` message per rejected row (header is row 1).
    pub errors: Vec<String>,
}

struct Columns {
    product_name: usize,
    quantity: usize,
    size: Option<usize>,
    color: Option<usize>,
    location: Option<usize>,
    last_updated: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self, InventoryError> {
        let find = |name: &str| headers.iter().position(|h| h.trim().eq_ignore_ascii_case(name));
        Ok(Self {
            product_name: find("Product Name").ok_or(InventoryError::MissingColumn("Product Name"))?,
            quantity: find("Quantity").ok_or(InventoryError::MissingColumn("Quantity"))?,
            size: find("Size"),
            color: find("Color"),
            location: find("Location"),
            last_updated: find("Last Updated"),
        })
    }
}

fn cell(record: &csv::StringRecord, index: Option<usize>) -> String {
    index
        .and_then(|i| record.get(i))
        .map(|v| v.trim().to_owned())
        .unwrap_or_default()
}

#[allow(clippy::cast_possible_truncation)]
fn parse_quantity(raw: &str) -> Option<i32> {
    if let Ok(value) = raw.parse::<i32>() {
        return (value >= 0).then_some(value);
    }
    // Spreadsheet apps like to write whole numbers as `12.0`.
    let value = raw.parse::<f64>().ok()?;
    (value.fract() == 0.0 && (0.0..=f64::from(i32::MAX)).contains(&value)).then_some(value as i32)
}

fn parse_row(record: &csv::StringRecord, columns: &Columns) -> Result<ImportRow, String> {
    let product_name = cell(record, Some(columns.product_name));
    if product_name.is_empty() {
        return Err("Product Name is required".to_owned());
    }

    let raw_quantity = cell(record, Some(columns.quantity));
    let quantity =
        parse_quantity(&raw_quantity).ok_or_else(|| format!("Quantity `{raw_quantity}` must be a whole number of zero or more"))?;

    let raw_updated = cell(record, columns.last_updated);
    let last_updated = if raw_updated.is_empty() {
        None
    } else {
        Some(OffsetDateTime::parse(&raw_updated, &Rfc3339).map_err(|_| format!("Last Updated `{raw_updated}` is not a valid timestamp"))?)
    };

    Ok(ImportRow {
        product_name,
        size: cell(record, columns.size),
        color: cell(record, columns.color),
        quantity,
        location: cell(record, columns.location),
        last_updated,
    })
}

/// Parse a spreadsheet. Bad rows are reported and skipped; only a missing
/// required column or an unreadable header fails the whole import.
///
/// # Errors
///
/// Returns an error if the header row cannot be read or lacks a required column.
pub fn import_csv<R: Read>(reader: R) -> Result<ImportReport, InventoryError> {
    let mut input = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let columns = Columns::from_headers(input.headers()?)?;

    let mut report = ImportReport::default();
    for (index, record) in input.records().enumerate() {
        let row_number = index + 2;
        let parsed = record.map_err(|e| e.to_string()).and_then(|r| parse_row(&r, &columns));
        match parsed {
            Ok(row) => report.rows.push(row),
            Err(message) => report.errors.push(format!("Row {row_number}: {message}")),
        }
    }
    Ok(report)
}

#[cfg(test)]
#[path = "inventory_test.rs"]
mod tests;
