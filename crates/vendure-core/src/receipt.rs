//! # Receipt Rendering
//!
//! One computed [`Receipt`] view per sale, rendered three ways.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Receipt Paths                                   │
//! │                                                                         │
//! │                    Sale (ledger record)                                 │
//! │                          │                                              │
//! │                          ▼                                              │
//! │                 Receipt::from_sale()                                    │
//! │          line totals, subtotal, tax, total, cash, change                │
//! │             │                │                  │                       │
//! │             ▼                ▼                  ▼                       │
//! │       render_text()    render_html()      export::export_csv()          │
//! │       (sale card)      (print window)     (spreadsheet)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every figure is computed once in `from_sale`, so the screen, the printout
//! and the CSV can never disagree.
//!
//! Timestamps are shown in UTC (see [`crate::ledger`]).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{Sale, TaxRate};

/// Timestamp format shared by receipts and the CSV export.
pub const RECEIPT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Default width of the text receipt, in columns.
pub const DEFAULT_RECEIPT_WIDTH: usize = 42;

// =============================================================================
// Store Profile
// =============================================================================

/// Shop details printed in the receipt header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StoreProfile {
    pub name: String,
    pub address: String,
    pub email: String,
    pub telephone: String,
    /// e.g. `Cashier: Jho | Manager: Mav`
    pub staff_line: String,
}

impl Default for StoreProfile {
    fn default() -> Self {
        StoreProfile {
            name: "Vendure Mart".to_string(),
            address: "123 National Rd, Rizal, Laguna".to_string(),
            email: "hello@venduremart.ph".to_string(),
            telephone: "(049) 123-4567".to_string(),
            staff_line: "Cashier: Jho | Manager: Mav".to_string(),
        }
    }
}

impl StoreProfile {
    fn header_lines(&self) -> [String; 5] {
        [
            self.name.clone(),
            self.address.clone(),
            format!("Email: {}", self.email),
            format!("Tel: {}", self.telephone),
            self.staff_line.clone(),
        ]
    }
}

/// Everything a renderer needs besides the sale itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptLayout {
    pub profile: StoreProfile,
    pub currency_symbol: String,
    pub tax_rate: TaxRate,
    /// Column width of the text rendering.
    pub width: usize,
}

impl Default for ReceiptLayout {
    fn default() -> Self {
        ReceiptLayout {
            profile: StoreProfile::default(),
            currency_symbol: crate::CURRENCY_SYMBOL.to_string(),
            tax_rate: crate::DEFAULT_TAX_RATE,
            width: DEFAULT_RECEIPT_WIDTH,
        }
    }
}

impl ReceiptLayout {
    fn money(&self, amount: Money) -> String {
        amount.format_with(&self.currency_symbol)
    }

    fn tax_label(&self) -> String {
        format!("Tax ({})", self.tax_rate.label())
    }
}

// =============================================================================
// Receipt View
// =============================================================================

/// One itemized receipt line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ReceiptLine {
    pub name: String,
    pub quantity: i64,
    pub unit_price: Money,
    pub line_total: Money,
}

/// Display view of a sale with every figure precomputed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Receipt {
    pub receipt_number: i64,
    #[ts(as = "String")]
    pub date: DateTime<Utc>,
    pub lines: Vec<ReceiptLine>,
    pub subtotal: Money,
    pub tax: Money,
    pub grand_total: Money,
    pub cash: Money,
    pub change: Money,
}

impl Receipt {
    pub fn from_sale(sale: &Sale) -> Self {
        Receipt {
            receipt_number: sale.id,
            date: sale.date,
            lines: sale
                .items
                .iter()
                .map(|item| ReceiptLine {
                    name: item.name.clone(),
                    quantity: item.quantity,
                    unit_price: item.unit_price(),
                    line_total: item.line_total(),
                })
                .collect(),
            subtotal: sale.subtotal(),
            tax: sale.tax(),
            grand_total: sale.grand_total(),
            cash: sale.cash(),
            change: sale.change(),
        }
    }

    /// Timestamp as printed, e.g. `2026-10-17 06:30:00 UTC`.
    pub fn formatted_date(&self) -> String {
        format!("{} UTC", self.date.format(RECEIPT_DATE_FORMAT))
    }

    fn totals(&self, layout: &ReceiptLayout) -> [(String, String); 5] {
        [
            ("Subtotal".to_string(), layout.money(self.subtotal)),
            (layout.tax_label(), layout.money(self.tax)),
            ("Total".to_string(), layout.money(self.grand_total)),
            ("Cash".to_string(), layout.money(self.cash)),
            ("Change".to_string(), layout.money(self.change)),
        ]
    }

    // =========================================================================
    // Text
    // =========================================================================

    /// Renders the fixed-width monospace receipt.
    ///
    /// ```text
    ///                Vendure Mart
    ///       123 National Rd, Rizal, Laguna
    /// ------------------------------------------
    /// Receipt #: 1760682600000
    /// 2026-10-17 06:30:00 UTC
    /// ------------------------------------------
    /// Big Mac × 2                        ₱300.00
    /// Fries (Small) × 1                   ₱45.00
    /// ------------------------------------------
    ///                          Subtotal: ₱345.00
    ///                          Tax (12%): ₱41.40
    /// ```
    pub fn render_text(&self, layout: &ReceiptLayout) -> String {
        let width = layout.width;
        let rule = "-".repeat(width);
        let mut out: Vec<String> = Vec::new();

        for line in layout.profile.header_lines() {
            out.push(center(&line, width));
        }
        out.push(rule.clone());
        out.push(format!("Receipt #: {}", self.receipt_number));
        out.push(self.formatted_date());
        out.push(rule.clone());

        for line in &self.lines {
            let left = format!("{} × {}", line.name, line.quantity);
            let right = layout.money(line.line_total);
            out.extend(two_columns(&left, &right, width));
        }

        out.push(rule.clone());
        for (label, value) in self.totals(layout) {
            out.push(right_align(&format!("{label}: {value}"), width));
        }
        out.push(rule);

        out.push(center("─── THANK YOU FOR YOUR PURCHASE! ───", width));
        out.push(center("This serves as your official receipt.", width));

        let mut text = out.join("\n");
        text.push('\n');
        text
    }

    // =========================================================================
    // HTML
    // =========================================================================

    /// Renders the standalone print document.
    ///
    /// The document prints itself on load and closes afterwards.
    pub fn render_html(&self, layout: &ReceiptLayout) -> String {
        let mut html = String::new();

        html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\" />\n");
        html.push_str(&format!(
            "<title>Receipt #{}</title>\n",
            self.receipt_number
        ));
        html.push_str(PRINT_STYLE);
        html.push_str("</head>\n<body onload=\"window.print(); window.close();\">\n");

        html.push_str("<div class=\"text-center\">\n");
        let [name, rest @ ..] = layout.profile.header_lines();
        html.push_str(&format!(
            "  <div><strong>{}</strong></div>\n",
            escape_html(&name)
        ));
        for line in rest {
            html.push_str(&format!("  <div>{}</div>\n", escape_html(&line)));
        }
        html.push_str("</div>\n<hr />\n");

        html.push_str(&format!(
            "<div>Receipt #: {}</div>\n<div>{}</div>\n<hr />\n",
            self.receipt_number,
            self.formatted_date()
        ));

        for line in &self.lines {
            html.push_str(&format!(
                "<div class=\"item\"><span>{} &times; {}</span><span>{}</span></div>\n",
                escape_html(&line.name),
                line.quantity,
                escape_html(&layout.money(line.line_total))
            ));
        }
        html.push_str("<hr />\n");

        for (label, value) in self.totals(layout) {
            let text = format!("{}: {}", escape_html(&label), escape_html(&value));
            if label == "Total" {
                html.push_str(&format!(
                    "<div class=\"text-right\"><strong>{text}</strong></div>\n"
                ));
            } else {
                html.push_str(&format!("<div class=\"text-right\">{text}</div>\n"));
            }
        }

        html.push_str("<hr />\n<div class=\"text-center\">─── THANK YOU FOR YOUR PURCHASE! ───<br />\n");
        html.push_str("This serves as your official receipt.</div>\n</body>\n</html>\n");
        html
    }
}

const PRINT_STYLE: &str = r#"<style>
  body { font-family: monospace; width: 300px; margin: 0 auto; padding: 10px; }
  hr { margin: 10px 0; border: none; border-top: 1px dotted #ccc; }
  .text-right { text-align: right; }
  .text-center { text-align: center; }
  .item { display: flex; justify-content: space-between; border-bottom: 1px dotted #ccc; padding: 4px 0; }
  @media print { body { margin: 0; padding: 0; width: 300px; } }
</style>
"#;

// =============================================================================
// Layout Helpers
// =============================================================================

fn display_width(s: &str) -> usize {
    s.chars().count()
}

fn center(text: &str, width: usize) -> String {
    let len = display_width(text);
    if len >= width {
        return text.to_string();
    }
    let left = (width - len) / 2;
    format!("{}{}", " ".repeat(left), text)
}

fn right_align(text: &str, width: usize) -> String {
    let len = display_width(text);
    if len >= width {
        return text.to_string();
    }
    format!("{}{}", " ".repeat(width - len), text)
}

/// Left text and right-aligned amount on one line, or two lines when they
/// do not fit side by side.
fn two_columns(left: &str, right: &str, width: usize) -> Vec<String> {
    let used = display_width(left) + display_width(right);
    if used < width {
        vec![format!("{}{}{}", left, " ".repeat(width - used), right)]
    } else {
        vec![left.to_string(), right_align(right, width)]
    }
}

/// Escapes text for inclusion in HTML element content or attributes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SaleItem;
    use chrono::TimeZone;

    fn reference_sale() -> Sale {
        Sale {
            id: 1760682600000,
            date: Utc.with_ymd_and_hms(2025, 10, 17, 6, 30, 0).unwrap(),
            items: vec![
                SaleItem {
                    name: "Big Mac".to_string(),
                    price_cents: 15000,
                    quantity: 2,
                },
                SaleItem {
                    name: "Fries (Small)".to_string(),
                    price_cents: 4500,
                    quantity: 1,
                },
            ],
            subtotal_cents: 34500,
            tax_cents: 4140,
            cash_cents: 40000,
            change_cents: 1360,
        }
    }

    #[test]
    fn test_from_sale_computes_figures() {
        let receipt = Receipt::from_sale(&reference_sale());
        assert_eq!(receipt.receipt_number, 1760682600000);
        assert_eq!(receipt.lines[0].line_total.cents(), 30000);
        assert_eq!(receipt.lines[1].unit_price.cents(), 4500);
        assert_eq!(receipt.subtotal.cents(), 34500);
        assert_eq!(receipt.tax.cents(), 4140);
        assert_eq!(receipt.grand_total.cents(), 38640);
        assert_eq!(receipt.cash.cents(), 40000);
        assert_eq!(receipt.change.cents(), 1360);
        assert_eq!(receipt.formatted_date(), "2025-10-17 06:30:00 UTC");
    }

    #[test]
    fn test_render_text_layout() {
        let layout = ReceiptLayout::default();
        let text = Receipt::from_sale(&reference_sale()).render_text(&layout);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0].trim(), "Vendure Mart");
        assert!(lines.contains(&"Receipt #: 1760682600000"));
        assert!(lines.contains(&"2025-10-17 06:30:00 UTC"));

        let big_mac = lines.iter().find(|l| l.starts_with("Big Mac × 2")).unwrap();
        assert!(big_mac.ends_with("₱300.00"));
        assert_eq!(big_mac.chars().count(), DEFAULT_RECEIPT_WIDTH);

        for expected in [
            "Subtotal: ₱345.00",
            "Tax (12%): ₱41.40",
            "Total: ₱386.40",
            "Cash: ₱400.00",
            "Change: ₱13.60",
        ] {
            assert!(
                lines.iter().any(|l| l.trim_start() == expected),
                "missing {expected}"
            );
        }

        assert!(text.contains("─── THANK YOU FOR YOUR PURCHASE! ───"));
        assert!(text.contains("This serves as your official receipt."));
        assert!(lines.iter().all(|l| l.chars().count() <= DEFAULT_RECEIPT_WIDTH));
    }

    #[test]
    fn test_render_text_wraps_long_names() {
        let mut sale = reference_sale();
        sale.items[0].name = "Chicken McDo w/ Spaghetti Family Bucket Deluxe".to_string();
        let layout = ReceiptLayout {
            width: 32,
            ..ReceiptLayout::default()
        };
        let text = Receipt::from_sale(&sale).render_text(&layout);
        let lines: Vec<&str> = text.lines().collect();

        let idx = lines
            .iter()
            .position(|l| l.starts_with("Chicken McDo"))
            .unwrap();
        assert_eq!(lines[idx + 1].trim_start(), "₱300.00");
        assert_eq!(lines[idx + 1].chars().count(), 32);
    }

    #[test]
    fn test_render_html_prints_and_escapes() {
        let mut sale = reference_sale();
        sale.items[1].name = "Fries <Large> & \"Co\"".to_string();
        let html = Receipt::from_sale(&sale).render_html(&ReceiptLayout::default());

        assert!(html.contains("<body onload=\"window.print(); window.close();\">"));
        assert!(html.contains("<title>Receipt #1760682600000</title>"));
        assert!(html.contains("Fries &lt;Large&gt; &amp; &quot;Co&quot; &times; 1"));
        assert!(!html.contains("<Large>"));
        assert!(html.contains("<strong>Total: ₱386.40</strong>"));
        assert!(html.contains("Tax (12%): ₱41.40"));
        assert!(html.contains("Change: ₱13.60"));
    }

    #[test]
    fn test_text_and_html_agree() {
        let layout = ReceiptLayout::default();
        let receipt = Receipt::from_sale(&reference_sale());
        let text = receipt.render_text(&layout);
        let html = receipt.render_html(&layout);

        for amount in ["₱300.00", "₱45.00", "₱345.00", "₱41.40", "₱386.40", "₱13.60"] {
            assert!(text.contains(amount), "text missing {amount}");
            assert!(html.contains(amount), "html missing {amount}");
        }
    }

    #[test]
    fn test_custom_tax_label() {
        let layout = ReceiptLayout {
            tax_rate: TaxRate::from_bps(825),
            ..ReceiptLayout::default()
        };
        let text = Receipt::from_sale(&reference_sale()).render_text(&layout);
        assert!(text.contains("Tax (8.25%): ₱41.40"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("A&W <root> 'x'"), "A&amp;W &lt;root&gt; &#39;x&#39;");
    }
}
