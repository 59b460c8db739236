//! # counter-core: Pure Business Logic for Counter POS
//!
//! This crate is the **heart** of Counter POS. It contains all business
//! logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Counter POS Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Front-end (CLI / desktop)                    │   │
//! │  │    Catalog UI ──► Cart UI ──► Checkout ──► Receipt / Stats     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               counter-db (Billing Session + Records)            │   │
//! │  │     BillingSession orchestration, SQLite-backed record store    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ counter-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌──────┐ ┌─────────┐ ┌─────────┐ ┌───────────┐  │   │
//! │  │   │ catalog │ │ cart │ │ receipt │ │  sale   │ │   stats   │  │   │
//! │  │   │  Item   │ │ Cart │ │Document │ │  Sale   │ │ Dashboard │  │   │
//! │  │   └─────────┘ └──────┘ └─────────┘ └─────────┘ └───────────┘  │   │
//! │  │   ┌─────────┐ ┌──────────┐ ┌────────────┐                     │   │
//! │  │   │  money  │ │ settings │ │ validation │                     │   │
//! │  │   └─────────┘ └──────────┘ └────────────┘                     │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`catalog`] - Sellable items and the catalog store
//! - [`cart`] - The active cart and its totals math
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`receipt`] - Structured receipt documents and their renderers
//! - [`sale`] - Immutable sale records built at checkout
//! - [`settings`] - Store settings (identity, visibility flags, labels, formats)
//! - [`stats`] - Dashboard aggregation over the sales history
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use counter_core::{Cart, Catalog, Money};
//!
//! let mut catalog = Catalog::new();
//! let rice = catalog.add_item("Rice", Some(8000), None).unwrap().clone();
//! let oil = catalog.add_item("Oil", Some(15000), None).unwrap().clone();
//!
//! let mut cart = Cart::new();
//! cart.add_item(&rice);
//! cart.add_item(&rice);
//! cart.add_item(&oil);
//!
//! // Rice 2 × 80.00 + Oil 1 × 150.00 = 310.00
//! assert_eq!(cart.total(), Money::from_cents(31000));
//! assert_eq!(cart.total().to_string(), "310.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod money;
pub mod receipt;
pub mod sale;
pub mod settings;
pub mod stats;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use counter_core::Cart` instead of
// `use counter_core::cart::Cart`

pub use cart::{Cart, CartLine};
pub use catalog::{Catalog, Item};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use receipt::{build_receipt, render_html, render_text, ReceiptBody, ReceiptDocument};
pub use sale::{build_sale, Sale, SaleLine};
pub use settings::{DateFormat, StoreSettings, TimeFormat};
pub use stats::{compute_stats, top_items, DashboardStats, TopItem, WindowStats};
