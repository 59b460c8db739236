//! # Receipt Formatter
//!
//! Builds a structured, printable receipt document from the cart, customer
//! name, store settings and a timestamp.
//!
//! ## Pipeline
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │   Cart + Customer + StoreSettings + now                              │
//! │        │                                                             │
//! │        ▼                                                             │
//! │   build_receipt()  ← pure: applies visibility flags, labels,         │
//! │        │             date/time formats                               │
//! │        ▼                                                             │
//! │   ReceiptDocument  ← serializable, stored on the Sale for reprint    │
//! │        │                                                             │
//! │        ├──► render_html()  self-contained printable markup           │
//! │        └──► render_text()  plain text surface                        │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Handing the rendered output to a print facility is the host
//! environment's side effect, outside this module's contract.

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::cart::Cart;
use crate::settings::StoreSettings;

// =============================================================================
// Document Model
// =============================================================================

/// Store identity block at the top of the receipt.
///
/// Present only when at least one of the three identity visibility flags is
/// set; each sub-field is additionally gated by its own flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptHeader {
    pub store_name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
}

/// Column labels for the tabular line-item body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnLabels {
    pub serial: String,
    pub item: String,
    pub quantity: String,
    pub price: String,
    pub total: String,
}

/// One line item row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptRow {
    pub serial: usize,
    pub name: String,
    pub quantity: i64,
    pub unit_price: String,
    pub line_total: String,
}

/// The line-item section, in one of its two shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReceiptBody {
    /// Labeled table (when `show_table_headers` is on).
    Table {
        columns: ColumnLabels,
        rows: Vec<ReceiptRow>,
    },
    /// Compact listing: one `"index. name × qty — total"` entry per line.
    Compact { entries: Vec<String> },
}

/// The grand-total line. Always rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptTotal {
    pub label: String,
    /// Two-decimal amount behind the configured currency symbol.
    pub amount: String,
}

/// A complete receipt, frozen at build time.
///
/// Stored on the `Sale`, so reprinting is a pure re-render of this document
/// with no recomputation of totals, formats or visibility decisions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptDocument {
    pub header: Option<ReceiptHeader>,
    pub date_line: String,
    pub time_line: String,
    pub customer: Option<String>,
    pub body: ReceiptBody,
    pub total: ReceiptTotal,
    pub footer: Option<String>,
}

// =============================================================================
// Builder
// =============================================================================

/// Builds a receipt document from the current cart state.
///
/// Pure function: same inputs, same document.
pub fn build_receipt<Tz: TimeZone>(
    cart: &Cart,
    customer_name: &str,
    settings: &StoreSettings,
    now: &DateTime<Tz>,
) -> ReceiptDocument
where
    Tz::Offset: fmt::Display,
{
    let header = build_header(settings);

    let customer = if settings.show_customer {
        let name = customer_name.trim();
        Some(if name.is_empty() {
            settings.walk_in_label.clone()
        } else {
            name.to_string()
        })
    } else {
        None
    };

    let body = if settings.show_table_headers {
        ReceiptBody::Table {
            columns: ColumnLabels {
                serial: settings.serial_label.clone(),
                item: settings.item_label.clone(),
                quantity: settings.quantity_label.clone(),
                price: settings.price_label.clone(),
                total: settings.total_label.clone(),
            },
            rows: cart
                .lines()
                .iter()
                .enumerate()
                .map(|(i, line)| ReceiptRow {
                    serial: i + 1,
                    name: line.name.clone(),
                    quantity: line.quantity,
                    unit_price: settings
                        .format_money(crate::money::Money::from_cents(line.unit_price_cents)),
                    line_total: settings.format_money(line.line_total()),
                })
                .collect(),
        }
    } else {
        ReceiptBody::Compact {
            entries: cart
                .lines()
                .iter()
                .enumerate()
                .map(|(i, line)| {
                    format!(
                        "{}. {} × {} — {}",
                        i + 1,
                        line.name,
                        line.quantity,
                        settings.format_money(line.line_total())
                    )
                })
                .collect(),
        }
    };

    ReceiptDocument {
        header,
        date_line: settings.format_date(now),
        time_line: settings.format_time(now),
        customer,
        body,
        total: ReceiptTotal {
            label: settings.grand_total_label.clone(),
            amount: settings.format_money(cart.total()),
        },
        footer: if settings.show_footer {
            Some(settings.footer_message.clone())
        } else {
            None
        },
    }
}

fn build_header(settings: &StoreSettings) -> Option<ReceiptHeader> {
    if !settings.show_store_name && !settings.show_store_address && !settings.show_store_phone {
        return None;
    }

    Some(ReceiptHeader {
        store_name: settings
            .show_store_name
            .then(|| settings.store_name.clone()),
        address: settings
            .show_store_address
            .then(|| settings.store_address.clone()),
        phone: settings
            .show_store_phone
            .then(|| settings.store_phone.clone()),
    })
}

// =============================================================================
// Renderers
// =============================================================================

/// Escapes a string for safe inclusion in HTML text content.
fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders the document as a self-contained printable HTML page.
pub fn render_html(doc: &ReceiptDocument) -> String {
    let mut html = String::with_capacity(2048);

    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Receipt</title>\n<style>\n");
    html.push_str("body { font-family: monospace; max-width: 320px; margin: 0 auto; }\n");
    html.push_str("h1 { font-size: 1.1em; text-align: center; margin: 4px 0; }\n");
    html.push_str("p.center { text-align: center; margin: 2px 0; }\n");
    html.push_str("table { width: 100%; border-collapse: collapse; }\n");
    html.push_str("th, td { text-align: left; padding: 2px 4px; }\n");
    html.push_str("th { border-bottom: 1px solid #000; }\n");
    html.push_str(".total { border-top: 1px solid #000; font-weight: bold; }\n");
    html.push_str("</style>\n</head>\n<body>\n");

    if let Some(header) = &doc.header {
        if let Some(name) = &header.store_name {
            html.push_str(&format!("<h1>{}</h1>\n", escape_html(name)));
        }
        if let Some(address) = &header.address {
            html.push_str(&format!("<p class=\"center\">{}</p>\n", escape_html(address)));
        }
        if let Some(phone) = &header.phone {
            html.push_str(&format!("<p class=\"center\">{}</p>\n", escape_html(phone)));
        }
    }

    html.push_str(&format!(
        "<p>{} {}</p>\n",
        escape_html(&doc.date_line),
        escape_html(&doc.time_line)
    ));

    if let Some(customer) = &doc.customer {
        html.push_str(&format!("<p>{}</p>\n", escape_html(customer)));
    }

    match &doc.body {
        ReceiptBody::Table { columns, rows } => {
            html.push_str("<table>\n<thead>\n<tr>");
            for label in [
                &columns.serial,
                &columns.item,
                &columns.quantity,
                &columns.price,
                &columns.total,
            ] {
                html.push_str(&format!("<th>{}</th>", escape_html(label)));
            }
            html.push_str("</tr>\n</thead>\n<tbody>\n");
            for row in rows {
                html.push_str(&format!(
                    "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                    row.serial,
                    escape_html(&row.name),
                    row.quantity,
                    escape_html(&row.unit_price),
                    escape_html(&row.line_total)
                ));
            }
            html.push_str("</tbody>\n</table>\n");
        }
        ReceiptBody::Compact { entries } => {
            for entry in entries {
                html.push_str(&format!("<p>{}</p>\n", escape_html(entry)));
            }
        }
    }

    html.push_str(&format!(
        "<p class=\"total\">{}: {}</p>\n",
        escape_html(&doc.total.label),
        escape_html(&doc.total.amount)
    ));

    if let Some(footer) = &doc.footer {
        html.push_str(&format!("<p class=\"center\">{}</p>\n", escape_html(footer)));
    }

    html.push_str("</body>\n</html>\n");
    html
}

/// Renders the document as plain text (terminal display, text printers).
pub fn render_text(doc: &ReceiptDocument) -> String {
    let mut out = String::with_capacity(512);

    if let Some(header) = &doc.header {
        if let Some(name) = &header.store_name {
            out.push_str(name);
            out.push('\n');
        }
        if let Some(address) = &header.address {
            out.push_str(address);
            out.push('\n');
        }
        if let Some(phone) = &header.phone {
            out.push_str(phone);
            out.push('\n');
        }
        out.push('\n');
    }

    out.push_str(&format!("{} {}\n", doc.date_line, doc.time_line));

    if let Some(customer) = &doc.customer {
        out.push_str(customer);
        out.push('\n');
    }
    out.push('\n');

    match &doc.body {
        ReceiptBody::Table { columns, rows } => {
            out.push_str(&format!(
                "{:<5} {:<20} {:>5} {:>10} {:>10}\n",
                columns.serial, columns.item, columns.quantity, columns.price, columns.total
            ));
            out.push_str(&"-".repeat(54));
            out.push('\n');
            for row in rows {
                out.push_str(&format!(
                    "{:<5} {:<20} {:>5} {:>10} {:>10}\n",
                    row.serial, row.name, row.quantity, row.unit_price, row.line_total
                ));
            }
        }
        ReceiptBody::Compact { entries } => {
            for entry in entries {
                out.push_str(entry);
                out.push('\n');
            }
        }
    }

    out.push('\n');
    out.push_str(&format!("{}: {}\n", doc.total.label, doc.total.amount));

    if let Some(footer) = &doc.footer {
        out.push('\n');
        out.push_str(footer);
        out.push('\n');
    }

    out
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Item;
    use chrono::{FixedOffset, TimeZone};

    fn item(id: &str, name: &str, price_cents: i64) -> Item {
        Item {
            id: id.to_string(),
            name: name.to_string(),
            price_cents: Some(price_cents),
            stock: None,
        }
    }

    /// Rice 2 × 80.00 + Oil 1 × 150.00 = 310.00
    fn sample_cart() -> Cart {
        let mut cart = Cart::new();
        let rice = item("i1", "Rice", 8000);
        let oil = item("i2", "Oil", 15000);
        cart.add_item(&rice);
        cart.add_item(&rice);
        cart.add_item(&oil);
        cart
    }

    fn sample_now() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2026, 8, 23, 14, 35, 7)
            .unwrap()
    }

    #[test]
    fn test_grand_total_under_default_settings() {
        let settings = StoreSettings::default();
        let doc = build_receipt(&sample_cart(), "", &settings, &sample_now());

        assert_eq!(doc.total.amount, "310.00");
        assert_eq!(doc.total.label, "Grand Total");
    }

    #[test]
    fn test_table_body_under_default_settings() {
        let settings = StoreSettings::default();
        let doc = build_receipt(&sample_cart(), "", &settings, &sample_now());

        match &doc.body {
            ReceiptBody::Table { columns, rows } => {
                assert_eq!(columns.serial, "S.No");
                assert_eq!(rows.len(), 2);
                assert_eq!(rows[0].serial, 1);
                assert_eq!(rows[0].name, "Rice");
                assert_eq!(rows[0].quantity, 2);
                assert_eq!(rows[0].unit_price, "80.00");
                assert_eq!(rows[0].line_total, "160.00");
                assert_eq!(rows[1].line_total, "150.00");
            }
            ReceiptBody::Compact { .. } => panic!("expected table body"),
        }
    }

    #[test]
    fn test_compact_body_when_table_headers_off() {
        let mut settings = StoreSettings::default();
        settings.show_table_headers = false;

        let doc = build_receipt(&sample_cart(), "", &settings, &sample_now());

        match &doc.body {
            ReceiptBody::Compact { entries } => {
                assert_eq!(entries.len(), 2);
                assert_eq!(entries[0], "1. Rice × 2 — 160.00");
                assert_eq!(entries[1], "2. Oil × 1 — 150.00");
            }
            ReceiptBody::Table { .. } => panic!("expected compact body"),
        }

        // Same cart, same total either way.
        assert_eq!(doc.total.amount, "310.00");

        let html = render_html(&doc);
        assert!(!html.contains("<table>"));
        assert!(html.contains("1. Rice × 2 — 160.00"));
    }

    #[test]
    fn test_header_hidden_when_all_flags_off() {
        let mut settings = StoreSettings::default();
        settings.show_store_name = false;
        settings.show_store_address = false;
        settings.show_store_phone = false;

        let doc = build_receipt(&sample_cart(), "", &settings, &sample_now());
        assert!(doc.header.is_none());
    }

    #[test]
    fn test_header_fields_gated_independently() {
        let mut settings = StoreSettings::default();
        settings.store_name = "Corner Shop".to_string();
        settings.store_address = "12 Market Road".to_string();
        settings.store_phone = "555-0101".to_string();
        settings.show_store_address = false;

        let doc = build_receipt(&sample_cart(), "", &settings, &sample_now());
        let header = doc.header.expect("header should render");

        assert_eq!(header.store_name.as_deref(), Some("Corner Shop"));
        assert!(header.address.is_none());
        assert_eq!(header.phone.as_deref(), Some("555-0101"));
    }

    #[test]
    fn test_customer_line() {
        let settings = StoreSettings::default();

        let doc = build_receipt(&sample_cart(), "Asha", &settings, &sample_now());
        assert_eq!(doc.customer.as_deref(), Some("Asha"));

        // Blank name falls back to the walk-in placeholder.
        let doc = build_receipt(&sample_cart(), "   ", &settings, &sample_now());
        assert_eq!(doc.customer.as_deref(), Some("Walk-in Customer"));

        let mut hidden = settings.clone();
        hidden.show_customer = false;
        let doc = build_receipt(&sample_cart(), "Asha", &hidden, &sample_now());
        assert!(doc.customer.is_none());
    }

    #[test]
    fn test_date_and_time_lines() {
        let mut settings = StoreSettings::default();
        let doc = build_receipt(&sample_cart(), "", &settings, &sample_now());
        assert_eq!(doc.date_line, "23/08/2026");
        assert_eq!(doc.time_line, "14:35:07");

        settings.date_format = crate::settings::DateFormat::YearMonthDay;
        settings.time_format = crate::settings::TimeFormat::TwelveHour;
        let doc = build_receipt(&sample_cart(), "", &settings, &sample_now());
        assert_eq!(doc.date_line, "2026-08-23");
        assert_eq!(doc.time_line, "02:35:07 PM");
    }

    #[test]
    fn test_footer_gated() {
        let mut settings = StoreSettings::default();
        settings.footer_message = "Come again".to_string();

        let doc = build_receipt(&sample_cart(), "", &settings, &sample_now());
        assert_eq!(doc.footer.as_deref(), Some("Come again"));

        settings.show_footer = false;
        let doc = build_receipt(&sample_cart(), "", &settings, &sample_now());
        assert!(doc.footer.is_none());
    }

    #[test]
    fn test_render_html_is_self_contained_and_escaped() {
        let mut settings = StoreSettings::default();
        settings.store_name = "Bob's <Shop>".to_string();

        let doc = build_receipt(&sample_cart(), "", &settings, &sample_now());
        let html = render_html(&doc);

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("</html>"));
        assert!(html.contains("Bob&#39;s &lt;Shop&gt;"));
        assert!(html.contains("Grand Total"));
        assert!(html.contains("310.00"));
    }

    #[test]
    fn test_render_text_contains_all_sections() {
        let settings = StoreSettings::default();
        let doc = build_receipt(&sample_cart(), "Asha", &settings, &sample_now());
        let text = render_text(&doc);

        assert!(text.contains("My Store"));
        assert!(text.contains("Asha"));
        assert!(text.contains("Rice"));
        assert!(text.contains("Grand Total: 310.00"));
        assert!(text.contains("Thank you, visit again!"));
    }

    #[test]
    fn test_document_round_trip() {
        let settings = StoreSettings::default();
        let doc = build_receipt(&sample_cart(), "Asha", &settings, &sample_now());

        let json = serde_json::to_string(&doc).unwrap();
        let reloaded: ReceiptDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(doc, reloaded);

        // Reprint: rendering the stored document is deterministic.
        assert_eq!(render_html(&doc), render_html(&reloaded));
    }
}
