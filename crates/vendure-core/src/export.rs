//! # CSV Export
//!
//! Spreadsheet export of the (filtered) sales ledger.
//!
//! ## Row Grouping
//! One row per purchased item. Receipt-level columns are filled on the first
//! item row of each sale and left blank on the rows that follow, so a
//! multi-item receipt reads as one visual group:
//!
//! ```text
//! Receipt ID,Date,Item,Qty,Price,Total,Cash,Change
//! 1760682600000,2025-10-17 06:30:00,Big Mac,2,₱150.00,₱386.40,₱400.00,₱13.60
//! ,,Fries (Small),1,₱45.00,,,
//! ```
//!
//! `Price` is the unit price and `Total` is the grand total (subtotal + tax).
//! Downstream spreadsheets rely on the blank cells; keep the rule as is.

use crate::error::{CoreError, CoreResult};
use crate::receipt::{Receipt, RECEIPT_DATE_FORMAT};
use crate::types::Sale;

/// File name offered for the download.
pub const CSV_EXPORT_FILE_NAME: &str = "sales-export.csv";

/// Header row of the export.
pub const CSV_HEADER: [&str; 8] = [
    "Receipt ID",
    "Date",
    "Item",
    "Qty",
    "Price",
    "Total",
    "Cash",
    "Change",
];

/// Exports sales to CSV text, in the order given.
///
/// Fields containing commas or quotes are quoted by the writer.
pub fn export_csv(sales: &[Sale], currency_symbol: &str) -> CoreResult<String> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER).map_err(export_error)?;

    for sale in sales {
        let receipt = Receipt::from_sale(sale);
        let money = |amount: crate::money::Money| amount.format_with(currency_symbol);

        for (idx, line) in receipt.lines.iter().enumerate() {
            let first = idx == 0;
            let group = |value: String| if first { value } else { String::new() };

            writer
                .write_record([
                    group(receipt.receipt_number.to_string()),
                    group(receipt.date.format(RECEIPT_DATE_FORMAT).to_string()),
                    line.name.clone(),
                    line.quantity.to_string(),
                    money(line.unit_price),
                    group(money(receipt.grand_total)),
                    group(money(receipt.cash)),
                    group(money(receipt.change)),
                ])
                .map_err(export_error)?;
        }
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| CoreError::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| CoreError::Export(e.to_string()))
}

fn export_error(err: csv::Error) -> CoreError {
    CoreError::Export(err.to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================
