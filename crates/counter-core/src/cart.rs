//! # Cart / Billing Engine
//!
//! The active billing session's cart and the totals math over it.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                      Cart State Operations                           │
//! │                                                                      │
//! │  Front-end Action        Operation              Cart State Change    │
//! │  ────────────────        ─────────              ─────────────────    │
//! │  Tap item ─────────────► add_item() ──────────► qty += 1 / new line  │
//! │  Edit quantity ────────► set_quantity() ──────► qty = n (0 removes)  │
//! │  Edit price ───────────► set_price() ─────────► price = p (≤0 no-op) │
//! │  Remove line ──────────► remove_line() ───────► line dropped         │
//! │  Complete sale ────────► clear() ─────────────► lines emptied        │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - One line per item id (adding the same item increments its quantity)
//! - Quantity is always >= 1 (setting it to zero or less removes the line)
//! - No upper bound on quantity
//! - Stock is NOT checked here; stock enforcement is an optional session
//!   concern layered on top

use serde::{Deserialize, Serialize};

use crate::catalog::Item;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Cart Line
// =============================================================================

/// One cart entry: an item, its quantity, and its unit price at time of
/// adding.
///
/// ## Snapshot Pattern
/// `name` and `unit_price_cents` are frozen copies taken when the line is
/// created, so the cart (and any sale built from it) displays consistent
/// data even if the catalog item changes afterwards. The price can still be
/// edited on the line itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    /// Catalog item id this line refers to.
    pub item_id: String,

    /// Item name at time of adding (frozen).
    pub name: String,

    /// Unit price in cents. Starts from the catalog price (or zero for
    /// unpriced items) and may be edited on the line.
    pub unit_price_cents: i64,

    /// Quantity, always >= 1.
    pub quantity: i64,
}

impl CartLine {
    /// Line total = quantity × unit price, exact, no line-level rounding.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.unit_price_cents).multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart: the mutable state of the active billing session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Adds a catalog item to the cart.
    ///
    /// ## Behavior
    /// - If the item already has a line: increments its quantity by 1
    /// - Otherwise: inserts a new line with quantity 1 at the item's
    ///   catalog price, or zero for unpriced items
    pub fn add_item(&mut self, item: &Item) {
        self.add_item_priced(item, item.price_cents.unwrap_or(0));
    }

    /// Adds a catalog item with a caller-supplied unit price.
    ///
    /// The supplied price only applies when a new line is created; an
    /// existing line keeps its current price and just gains quantity.
    pub fn add_item_priced(&mut self, item: &Item, unit_price_cents: i64) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.item_id == item.id) {
            line.quantity += 1;
            return;
        }

        self.lines.push(CartLine {
            item_id: item.id.clone(),
            name: item.name.clone(),
            unit_price_cents,
            quantity: 1,
        });
    }

    /// Sets the quantity of a line.
    ///
    /// ## Behavior
    /// - `qty <= 0` removes the line (negative behaves exactly like zero)
    /// - `qty > 0` replaces the quantity; there is no upper bound
    /// - Unknown item id → `LineNotFound`
    pub fn set_quantity(&mut self, item_id: &str, qty: i64) -> CoreResult<()> {
        if qty <= 0 {
            return self.remove_line(item_id);
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.item_id == item_id) {
            line.quantity = qty;
            Ok(())
        } else {
            Err(CoreError::LineNotFound(item_id.to_string()))
        }
    }

    /// Sets the unit price of a line.
    ///
    /// ## Behavior
    /// - `price_cents <= 0` is a deliberate no-op: a guard against
    ///   accidental zero/negative entry, not an error
    /// - Unknown item id → `LineNotFound`
    pub fn set_price(&mut self, item_id: &str, price_cents: i64) -> CoreResult<()> {
        if price_cents <= 0 {
            return Ok(());
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.item_id == item_id) {
            line.unit_price_cents = price_cents;
            Ok(())
        } else {
            Err(CoreError::LineNotFound(item_id.to_string()))
        }
    }

    /// Removes a line by item id.
    pub fn remove_line(&mut self, item_id: &str) -> CoreResult<()> {
        let initial_len = self.lines.len();
        self.lines.retain(|l| l.item_id != item_id);

        if self.lines.len() == initial_len {
            Err(CoreError::LineNotFound(item_id.to_string()))
        } else {
            Ok(())
        }
    }

    /// Clears all lines (sale completed or abandoned).
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Quantity of the given item currently in the cart (0 when absent).
    pub fn quantity_of(&self, item_id: &str) -> i64 {
        self.lines
            .iter()
            .find(|l| l.item_id == item_id)
            .map(|l| l.quantity)
            .unwrap_or(0)
    }

    /// The lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Grand total = Σ line totals. Zero for an empty cart.
    pub fn total(&self) -> Money {
        self.lines.iter().map(|l| l.line_total()).sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
