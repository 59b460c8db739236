//! # Billing Session
//!
//! The stateful front of the application: catalog, cart, settings and
//! sales history, backed by the local record store.
//!
//! ## Checkout Flow
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │  complete_sale(now)                                                  │
//! │       │                                                              │
//! │       ├── checkout already in flight? ──► CheckoutInProgress         │
//! │       ├── cart empty? ──────────────────► EmptyCart                  │
//! │       │                                                              │
//! │       ▼                                                              │
//! │  build_sale() ──► history.push(sale) ──► save_history()              │
//! │       │                                       │                      │
//! │       │                              save failed? ──► pop the sale,  │
//! │       │                                               cart untouched │
//! │       ▼                                                              │
//! │  decrement stock ──► clear cart + customer ──► return the sale       │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - The cart is cleared only after the sale is durably saved; a failed
//!   save leaves the cart (and the history record) exactly as before
//! - A second checkout attempt while one is persisting is refused
//! - The catalog lives in memory only; catalog edits do not touch the
//!   record store

use chrono::{DateTime, TimeZone};
use std::fmt;
use tracing::{info, warn};

use counter_core::stats::{DashboardStats, TopItem};
use counter_core::validation::validate_customer_name;
use counter_core::{
    build_sale, compute_stats, top_items, Cart, CartLine, Catalog, CoreError, Item, Sale,
    StoreSettings,
};

use crate::error::{SessionError, SessionResult};
use crate::records;
use crate::store::LocalStore;

// =============================================================================
// Billing Session
// =============================================================================

/// One running billing session over a local record store.
pub struct BillingSession {
    store: LocalStore,
    catalog: Catalog,
    cart: Cart,
    customer_name: String,
    settings: StoreSettings,
    history: Vec<Sale>,
    checkout_in_flight: bool,
}

impl BillingSession {
    /// Opens a session: loads settings and history from the store.
    ///
    /// Absent or malformed records fall back to defaults; opening never
    /// fails on bad data, only on storage errors.
    pub async fn open(store: LocalStore) -> SessionResult<Self> {
        let settings = records::load_settings(&store).await?;
        let history = records::load_history(&store).await?;

        info!(sales = history.len(), "Billing session opened");

        Ok(BillingSession {
            store,
            catalog: Catalog::new(),
            cart: Cart::new(),
            customer_name: String::new(),
            settings,
            history,
            checkout_in_flight: false,
        })
    }

    // ===== Catalog =====

    /// Adds a catalog item; returns the created item.
    pub fn add_catalog_item(
        &mut self,
        name: &str,
        price_cents: Option<i64>,
        stock: Option<i64>,
    ) -> SessionResult<Item> {
        let item = self.catalog.add_item(name, price_cents, stock)?.clone();
        Ok(item)
    }

    /// Removes a catalog item. Any cart line referring to it is dropped
    /// along with it.
    pub fn remove_catalog_item(&mut self, id: &str) -> SessionResult<()> {
        self.catalog.remove_item(id)?;

        // The line may or may not exist; either way the cart ends up
        // without it.
        let _ = self.cart.remove_line(id);
        Ok(())
    }

    /// The catalog in display order.
    pub fn items(&self) -> &[Item] {
        self.catalog.items()
    }

    /// Finds a catalog item by id.
    pub fn find_item(&self, id: &str) -> Option<&Item> {
        self.catalog.find(id)
    }

    // ===== Cart =====

    /// Adds one unit of a catalog item to the cart.
    ///
    /// When stock enforcement is on and the item tracks stock, the add is
    /// refused once the cart already holds all available units.
    pub fn add_to_cart(&mut self, item_id: &str) -> SessionResult<()> {
        let item = self
            .catalog
            .find(item_id)
            .ok_or_else(|| CoreError::ItemNotFound(item_id.to_string()))?
            .clone();

        if self.settings.enforce_stock && item.tracks_stock() {
            let in_cart = self.cart.quantity_of(item_id);
            if !item.can_sell(1, in_cart) {
                return Err(CoreError::InsufficientStock {
                    name: item.name.clone(),
                    available: item.stock.unwrap_or(0),
                    requested: in_cart + 1,
                }
                .into());
            }
        }

        self.cart.add_item(&item);
        Ok(())
    }

    /// Sets the quantity of a cart line (zero or less removes it).
    ///
    /// Under stock enforcement a tracked item's quantity cannot be raised
    /// past its available stock.
    pub fn set_quantity(&mut self, item_id: &str, qty: i64) -> SessionResult<()> {
        if qty > 0 && self.settings.enforce_stock {
            if let Some(item) = self.catalog.find(item_id) {
                if item.tracks_stock() && !item.can_sell(qty, 0) {
                    return Err(CoreError::InsufficientStock {
                        name: item.name.clone(),
                        available: item.stock.unwrap_or(0),
                        requested: qty,
                    }
                    .into());
                }
            }
        }

        self.cart.set_quantity(item_id, qty)?;
        Ok(())
    }

    /// Sets the unit price of a cart line (zero or less is a no-op).
    pub fn set_price(&mut self, item_id: &str, price_cents: i64) -> SessionResult<()> {
        self.cart.set_price(item_id, price_cents)?;
        Ok(())
    }

    /// Removes a cart line.
    pub fn remove_line(&mut self, item_id: &str) -> SessionResult<()> {
        self.cart.remove_line(item_id)?;
        Ok(())
    }

    /// Abandons the cart without recording anything.
    pub fn clear_cart(&mut self) {
        self.cart.clear();
        self.customer_name.clear();
    }

    /// The current cart lines.
    pub fn cart_lines(&self) -> &[CartLine] {
        self.cart.lines()
    }

    /// The current cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    // ===== Customer =====

    /// Sets the customer name for the next sale. Blank is fine (walk-in).
    pub fn set_customer_name(&mut self, name: &str) -> SessionResult<()> {
        validate_customer_name(name).map_err(CoreError::from)?;
        self.customer_name = name.trim().to_string();
        Ok(())
    }

    /// The customer name for the next sale.
    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    // ===== Checkout =====

    /// Completes the sale: builds the record, persists it, decrements
    /// stock and clears the cart.
    ///
    /// On a storage failure the history append is rolled back and the
    /// cart is left untouched, so the user can retry.
    pub async fn complete_sale<Tz: TimeZone>(
        &mut self,
        now: &DateTime<Tz>,
    ) -> SessionResult<Sale>
    where
        Tz::Offset: fmt::Display,
    {
        if self.checkout_in_flight {
            return Err(SessionError::CheckoutInProgress);
        }

        let sale = build_sale(&self.cart, &self.customer_name, &self.settings, now)?;

        self.checkout_in_flight = true;
        self.history.push(sale.clone());

        if let Err(err) = records::save_history(&self.store, &self.history).await {
            self.history.pop();
            self.checkout_in_flight = false;
            warn!(%err, "Sale save failed, cart preserved");
            return Err(err.into());
        }

        for line in &sale.lines {
            if let Some(item) = self.catalog.find_mut(&line.item_id) {
                if let Some(stock) = item.stock {
                    item.stock = Some((stock - line.quantity).max(0));
                }
            }
        }

        self.cart.clear();
        self.customer_name.clear();
        self.checkout_in_flight = false;

        info!(sale_id = %sale.id, total_cents = sale.total_cents, "Sale completed");
        Ok(sale)
    }

    // ===== History & Dashboard =====

    /// The recorded sales, oldest first.
    pub fn history(&self) -> &[Sale] {
        &self.history
    }

    /// Finds a recorded sale by id (for reprinting).
    pub fn find_sale(&self, id: &str) -> Option<&Sale> {
        self.history.iter().find(|s| s.id == id)
    }

    /// Deletes the entire sales history, in memory and in the store.
    pub async fn clear_history(&mut self) -> SessionResult<()> {
        records::clear_history(&self.store).await?;
        self.history.clear();
        info!("Sales history cleared");
        Ok(())
    }

    /// Dashboard aggregates anchored at `now`.
    pub fn stats<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> DashboardStats {
        compute_stats(&self.history, now)
    }

    /// Best-selling items, at most `limit` rows.
    pub fn top_items(&self, limit: usize) -> Vec<TopItem> {
        top_items(&self.history, limit)
    }

    // ===== Settings =====

    /// The active settings.
    pub fn settings(&self) -> &StoreSettings {
        &self.settings
    }

    /// Replaces the settings wholesale: normalizes, persists, then applies.
    ///
    /// A failed save leaves the previous settings active.
    pub async fn update_settings(&mut self, settings: StoreSettings) -> SessionResult<()> {
        let settings = settings.normalize();
        records::save_settings(&self.store, &settings).await?;
        self.settings = settings;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreConfig;
    use chrono::Utc;
    use counter_core::ReceiptBody;

    async fn open_session() -> BillingSession {
        let store = LocalStore::open(StoreConfig::in_memory()).await.unwrap();
        BillingSession::open(store).await.unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 23, 14, 35, 7).unwrap()
    }

    #[tokio::test]
    async fn test_full_billing_flow() {
        let mut session = open_session().await;

        let rice = session.add_catalog_item("Rice", Some(8000), None).unwrap();
        let oil = session.add_catalog_item("Oil", Some(15000), None).unwrap();

        session.add_to_cart(&rice.id).unwrap();
        session.add_to_cart(&rice.id).unwrap();
        session.add_to_cart(&oil.id).unwrap();
        session.set_customer_name("Asha").unwrap();

        let sale = session.complete_sale(&now()).await.unwrap();

        assert_eq!(sale.total_cents, 31000);
        assert_eq!(sale.customer, "Asha");
        assert!(session.cart().is_empty());
        assert_eq!(session.customer_name(), "");
        assert_eq!(session.history().len(), 1);
    }

    #[tokio::test]
    async fn test_history_survives_reopen() {
        let store = LocalStore::open(StoreConfig::in_memory()).await.unwrap();

        let mut session = BillingSession::open(store.clone()).await.unwrap();
        let rice = session.add_catalog_item("Rice", Some(8000), None).unwrap();
        session.add_to_cart(&rice.id).unwrap();
        let sale = session.complete_sale(&now()).await.unwrap();

        // Same store handle, fresh session: history is reloaded.
        let reopened = BillingSession::open(store).await.unwrap();
        assert_eq!(reopened.history().len(), 1);
        assert_eq!(reopened.history()[0].id, sale.id);
    }

    #[tokio::test]
    async fn test_empty_cart_checkout_is_rejected() {
        let mut session = open_session().await;
        let result = session.complete_sale(&now()).await;

        assert!(matches!(
            result,
            Err(SessionError::Core(CoreError::EmptyCart))
        ));
        assert!(session.history().is_empty());
    }

    #[tokio::test]
    async fn test_add_unknown_item_to_cart() {
        let mut session = open_session().await;
        assert!(matches!(
            session.add_to_cart("nope"),
            Err(SessionError::Core(CoreError::ItemNotFound(_)))
        ));
    }

    #[tokio::test]
    async fn test_stock_not_enforced_by_default() {
        let mut session = open_session().await;
        let rice = session.add_catalog_item("Rice", Some(8000), Some(1)).unwrap();

        // Default settings: stock is informational only.
        session.add_to_cart(&rice.id).unwrap();
        session.add_to_cart(&rice.id).unwrap();
        assert_eq!(session.cart().quantity_of(&rice.id), 2);
    }

    #[tokio::test]
    async fn test_stock_enforcement_refuses_over_add() {
        let mut session = open_session().await;

        let mut settings = StoreSettings::default();
        settings.enforce_stock = true;
        session.update_settings(settings).await.unwrap();

        let rice = session.add_catalog_item("Rice", Some(8000), Some(2)).unwrap();
        let sugar = session
            .add_catalog_item("Loose sugar", Some(4500), None)
            .unwrap();

        session.add_to_cart(&rice.id).unwrap();
        session.add_to_cart(&rice.id).unwrap();
        assert!(matches!(
            session.add_to_cart(&rice.id),
            Err(SessionError::Core(CoreError::InsufficientStock { .. }))
        ));

        // Untracked items are never refused.
        for _ in 0..10 {
            session.add_to_cart(&sugar.id).unwrap();
        }
    }

    #[tokio::test]
    async fn test_stock_enforcement_caps_quantity_edit() {
        let mut session = open_session().await;

        let mut settings = StoreSettings::default();
        settings.enforce_stock = true;
        session.update_settings(settings).await.unwrap();

        let rice = session.add_catalog_item("Rice", Some(8000), Some(3)).unwrap();
        session.add_to_cart(&rice.id).unwrap();

        session.set_quantity(&rice.id, 3).unwrap();
        assert!(matches!(
            session.set_quantity(&rice.id, 4),
            Err(SessionError::Core(CoreError::InsufficientStock { .. }))
        ));
    }

    #[tokio::test]
    async fn test_stock_decremented_on_completion() {
        let mut session = open_session().await;
        let rice = session.add_catalog_item("Rice", Some(8000), Some(5)).unwrap();

        session.add_to_cart(&rice.id).unwrap();
        session.add_to_cart(&rice.id).unwrap();
        session.complete_sale(&now()).await.unwrap();

        assert_eq!(session.find_item(&rice.id).unwrap().stock, Some(3));
    }

    #[tokio::test]
    async fn test_remove_catalog_item_drops_cart_line() {
        let mut session = open_session().await;
        let rice = session.add_catalog_item("Rice", Some(8000), None).unwrap();

        session.add_to_cart(&rice.id).unwrap();
        session.remove_catalog_item(&rice.id).unwrap();

        assert!(session.cart().is_empty());
        assert!(session.find_item(&rice.id).is_none());
    }

    #[tokio::test]
    async fn test_reprint_uses_frozen_receipt() {
        let mut session = open_session().await;

        let mut settings = StoreSettings::default();
        settings.store_name = "Corner Shop".to_string();
        session.update_settings(settings).await.unwrap();

        let rice = session.add_catalog_item("Rice", Some(8000), None).unwrap();
        session.add_to_cart(&rice.id).unwrap();
        let sale = session.complete_sale(&now()).await.unwrap();

        // Settings change after the sale does not alter the stored receipt.
        let mut renamed = session.settings().clone();
        renamed.store_name = "Other Name".to_string();
        session.update_settings(renamed).await.unwrap();

        let stored = session.find_sale(&sale.id).unwrap();
        let header = stored.receipt.header.as_ref().unwrap();
        assert_eq!(header.store_name.as_deref(), Some("Corner Shop"));
        assert!(matches!(stored.receipt.body, ReceiptBody::Table { .. }));
    }

    #[tokio::test]
    async fn test_clear_history() {
        let mut session = open_session().await;
        let rice = session.add_catalog_item("Rice", Some(8000), None).unwrap();
        session.add_to_cart(&rice.id).unwrap();
        session.complete_sale(&now()).await.unwrap();

        session.clear_history().await.unwrap();
        assert!(session.history().is_empty());
        assert_eq!(session.stats(&now()).all_time.sale_count, 0);
    }

    #[tokio::test]
    async fn test_dashboard_over_session_history() {
        let mut session = open_session().await;
        let rice = session.add_catalog_item("Rice", Some(8000), None).unwrap();
        let oil = session.add_catalog_item("Oil", Some(15000), None).unwrap();

        session.add_to_cart(&rice.id).unwrap();
        session.add_to_cart(&rice.id).unwrap();
        session.complete_sale(&now()).await.unwrap();

        session.add_to_cart(&oil.id).unwrap();
        session.complete_sale(&now()).await.unwrap();

        let stats = session.stats(&now());
        assert_eq!(stats.all_time.sale_count, 2);
        assert_eq!(stats.all_time.revenue_cents, 31000);
        assert_eq!(stats.items_sold, 3);

        let top = session.top_items(1);
        assert_eq!(top[0].name, "Rice");
        assert_eq!(top[0].quantity, 2);
    }

    #[tokio::test]
    async fn test_update_settings_persists() {
        let store = LocalStore::open(StoreConfig::in_memory()).await.unwrap();
        let mut session = BillingSession::open(store.clone()).await.unwrap();

        let mut settings = StoreSettings::default();
        settings.grand_total_label = "  Net Due  ".to_string();
        session.update_settings(settings).await.unwrap();

        // Normalized before applying.
        assert_eq!(session.settings().grand_total_label, "Net Due");

        let reopened = BillingSession::open(store).await.unwrap();
        assert_eq!(reopened.settings().grand_total_label, "Net Due");
    }
}
