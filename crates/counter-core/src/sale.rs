//! # Sale Records
//!
//! Immutable sale records built at checkout time.
//!
//! ## Snapshot Pattern
//! A sale freezes everything about the transaction at completion: the line
//! items (name and price as billed, not as currently cataloged), the
//! totals, and the fully formatted receipt document. Later edits to the
//! catalog or settings never alter what a past sale shows.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::cart::Cart;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::receipt::{build_receipt, ReceiptDocument};
use crate::settings::StoreSettings;

// =============================================================================
// Sale Line
// =============================================================================

/// One line of a completed sale, frozen from the cart line it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleLine {
    pub item_id: String,
    pub name: String,
    pub quantity: i64,
    pub unit_price_cents: i64,
    pub line_total_cents: i64,
}

impl SaleLine {
    /// Line total as Money.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.line_total_cents)
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A completed sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    /// Human-readable id derived from the completion time,
    /// `YYYYMMDD-HHMMSS-mmm`.
    pub id: String,

    /// Completion time in UTC.
    pub timestamp: DateTime<Utc>,

    /// Customer name as billed (walk-in placeholder when blank).
    pub customer: String,

    /// Line items as billed.
    pub lines: Vec<SaleLine>,

    /// Total quantity across all lines.
    pub item_count: i64,

    /// Grand total in cents.
    pub total_cents: i64,

    /// The receipt exactly as issued, kept for reprinting.
    pub receipt: ReceiptDocument,
}

impl Sale {
    /// Grand total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

/// Derives the human-readable sale id from the completion time.
///
/// Local wall-clock time of the given timestamp, millisecond suffix for
/// uniqueness within a second.
pub fn sale_id<Tz: TimeZone>(ts: &DateTime<Tz>) -> String
where
    Tz::Offset: fmt::Display,
{
    format!(
        "{}-{:03}",
        ts.format("%Y%m%d-%H%M%S"),
        ts.timestamp_subsec_millis()
    )
}

/// Builds a sale record from the cart at checkout.
///
/// ## Behavior
/// - An empty cart is rejected (`EmptyCart`); nothing is recorded
/// - A blank customer name is replaced by the walk-in placeholder
/// - The receipt is built and frozen onto the record here
///
/// The cart itself is not mutated; the caller clears it after the record
/// is durably saved.
pub fn build_sale<Tz: TimeZone>(
    cart: &Cart,
    customer_name: &str,
    settings: &StoreSettings,
    now: &DateTime<Tz>,
) -> CoreResult<Sale>
where
    Tz::Offset: fmt::Display,
{
    if cart.is_empty() {
        return Err(CoreError::EmptyCart);
    }

    let customer = {
        let name = customer_name.trim();
        if name.is_empty() {
            settings.walk_in_label.clone()
        } else {
            name.to_string()
        }
    };

    let receipt = build_receipt(cart, customer_name, settings, now);

    let lines: Vec<SaleLine> = cart
        .lines()
        .iter()
        .map(|l| SaleLine {
            item_id: l.item_id.clone(),
            name: l.name.clone(),
            quantity: l.quantity,
            unit_price_cents: l.unit_price_cents,
            line_total_cents: l.line_total().cents(),
        })
        .collect();

    Ok(Sale {
        id: sale_id(now),
        timestamp: now.with_timezone(&Utc),
        customer,
        item_count: cart.total_quantity(),
        total_cents: cart.total().cents(),
        lines,
        receipt,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Item;
    use chrono::FixedOffset;

    fn item(id: &str, name: &str, price_cents: i64) -> Item {
        Item {
            id: id.to_string(),
            name: name.to_string(),
            price_cents: Some(price_cents),
            stock: None,
        }
    }

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
    fn test_empty_cart_is_rejected() {
        let cart = Cart::new();
        let result = build_sale(&cart, "", &StoreSettings::default(), &sample_now());
        assert!(matches!(result, Err(CoreError::EmptyCart)));
    }

    #[test]
    fn test_sale_snapshots_cart() {
        let settings = StoreSettings::default();
        let sale = build_sale(&sample_cart(), "Asha", &settings, &sample_now()).unwrap();

        assert_eq!(sale.customer, "Asha");
        assert_eq!(sale.lines.len(), 2);
        assert_eq!(sale.lines[0].name, "Rice");
        assert_eq!(sale.lines[0].quantity, 2);
        assert_eq!(sale.lines[0].line_total_cents, 16000);
        assert_eq!(sale.item_count, 3);
        assert_eq!(sale.total_cents, 31000);
        assert_eq!(sale.total().to_string(), "310.00");
    }

    #[test]
    fn test_blank_customer_uses_walk_in_label() {
        let settings = StoreSettings::default();
        let sale = build_sale(&sample_cart(), "  ", &settings, &sample_now()).unwrap();
        assert_eq!(sale.customer, "Walk-in Customer");
    }

    #[test]
    fn test_sale_id_is_time_derived() {
        let sale = build_sale(&sample_cart(), "", &StoreSettings::default(), &sample_now())
            .unwrap();
        assert_eq!(sale.id, "20260823-143507-000");
    }

    #[test]
    fn test_receipt_is_frozen_on_the_sale() {
        let mut settings = StoreSettings::default();
        settings.store_name = "Corner Shop".to_string();

        let sale = build_sale(&sample_cart(), "", &settings, &sample_now()).unwrap();
        let header = sale.receipt.header.as_ref().unwrap();
        assert_eq!(header.store_name.as_deref(), Some("Corner Shop"));
        assert_eq!(sale.receipt.total.amount, "310.00");
    }

    #[test]
    fn test_sale_round_trip() {
        let sale = build_sale(&sample_cart(), "Asha", &StoreSettings::default(), &sample_now())
            .unwrap();

        let json = serde_json::to_string(&sale).unwrap();
        let reloaded: Sale = serde_json::from_str(&json).unwrap();
        assert_eq!(sale, reloaded);
    }
}
