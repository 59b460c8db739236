//! # Catalog Module
//!
//! The list of sellable items a shopkeeper maintains.
//!
//! ## Design Notes
//! - Items have a stable UUID id; the id is the only identity the cart and
//!   sales history refer to.
//! - Price and stock are both optional: a quick-entry item may carry
//!   neither, and `stock: None` means the item does not track inventory at
//!   all.
//! - Stock is the only field that ever mutates after creation (decremented
//!   when a sale completes).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::validation::{validate_item_name, validate_price_cents, validate_stock};

// =============================================================================
// Item
// =============================================================================

/// A sellable item in the shop catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier (UUID v4), stable for the item's lifetime.
    pub id: String,

    /// Display name shown in the catalog, cart and on receipts.
    pub name: String,

    /// Unit price in cents, if configured. Items without a price enter the
    /// cart at zero and get priced on the line.
    pub price_cents: Option<i64>,

    /// Current stock count. `None` means this item does not track
    /// inventory and can always be sold.
    pub stock: Option<i64>,
}

impl Item {
    /// Returns the configured price as Money (zero when unpriced).
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents.unwrap_or(0))
    }

    /// Whether this item tracks inventory.
    #[inline]
    pub fn tracks_stock(&self) -> bool {
        self.stock.is_some()
    }

    /// Checks whether `requested` more units can be sold given how many are
    /// already committed (e.g. sitting in the cart).
    ///
    /// Untracked items can always be sold.
    pub fn can_sell(&self, requested: i64, already_committed: i64) -> bool {
        match self.stock {
            None => true,
            Some(stock) => stock - already_committed >= requested,
        }
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// The in-memory, ordered list of sellable items.
///
/// ## Invariants
/// - Item ids are unique within the catalog
/// - Insertion order is preserved (it is the display order)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    items: Vec<Item>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Catalog { items: Vec::new() }
    }

    /// Creates a catalog from an existing item list (persisted or synced
    /// state). Caller is responsible for id uniqueness of the source.
    pub fn from_items(items: Vec<Item>) -> Self {
        Catalog { items }
    }

    /// Adds a new item and returns a reference to it.
    ///
    /// ## Validation
    /// - name: required, bounded length
    /// - price: non-negative when provided
    /// - stock: non-negative when provided
    pub fn add_item(
        &mut self,
        name: &str,
        price_cents: Option<i64>,
        stock: Option<i64>,
    ) -> CoreResult<&Item> {
        validate_item_name(name)?;
        if let Some(price) = price_cents {
            validate_price_cents(price)?;
        }
        if let Some(stock) = stock {
            validate_stock(stock)?;
        }

        let item = Item {
            id: Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            price_cents,
            stock,
        };
        self.items.push(item);

        // Just pushed, so last() is always present.
        Ok(&self.items[self.items.len() - 1])
    }

    /// Removes an item by id.
    pub fn remove_item(&mut self, id: &str) -> CoreResult<()> {
        let initial_len = self.items.len();
        self.items.retain(|i| i.id != id);

        if self.items.len() == initial_len {
            Err(CoreError::ItemNotFound(id.to_string()))
        } else {
            Ok(())
        }
    }

    /// Finds an item by id.
    pub fn find(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Finds an item by id, mutably (stock adjustments).
    pub fn find_mut(&mut self, id: &str) -> Option<&mut Item> {
        self.items.iter_mut().find(|i| i.id == id)
    }

    /// All items in display order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Number of items in the catalog.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_item_generates_unique_ids() {
        let mut catalog = Catalog::new();
        let a = catalog.add_item("Rice", Some(8000), None).unwrap().id.clone();
        let b = catalog.add_item("Oil", Some(15000), None).unwrap().id.clone();

        assert_ne!(a, b);
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_add_item_trims_name() {
        let mut catalog = Catalog::new();
        let item = catalog.add_item("  Rice  ", None, None).unwrap();
        assert_eq!(item.name, "Rice");
    }

    #[test]
    fn test_add_item_rejects_bad_input() {
        let mut catalog = Catalog::new();
        assert!(catalog.add_item("", Some(100), None).is_err());
        assert!(catalog.add_item("Rice", Some(-5), None).is_err());
        assert!(catalog.add_item("Rice", Some(100), Some(-1)).is_err());
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_remove_item() {
        let mut catalog = Catalog::new();
        let id = catalog.add_item("Rice", None, None).unwrap().id.clone();

        assert!(catalog.remove_item(&id).is_ok());
        assert!(catalog.is_empty());
        assert!(matches!(
            catalog.remove_item(&id),
            Err(CoreError::ItemNotFound(_))
        ));
    }

    #[test]
    fn test_can_sell_untracked() {
        let item = Item {
            id: "i1".into(),
            name: "Rice".into(),
            price_cents: Some(8000),
            stock: None,
        };
        assert!(item.can_sell(1_000_000, 0));
        assert!(!item.tracks_stock());
    }

    #[test]
    fn test_can_sell_tracked() {
        let item = Item {
            id: "i1".into(),
            name: "Rice".into(),
            price_cents: Some(8000),
            stock: Some(3),
        };
        assert!(item.can_sell(3, 0));
        assert!(!item.can_sell(4, 0));
        assert!(item.can_sell(1, 2));
        assert!(!item.can_sell(2, 2));
    }

    #[test]
    fn test_unpriced_item_price_is_zero() {
        let item = Item {
            id: "i1".into(),
            name: "Loose sugar".into(),
            price_cents: None,
            stock: None,
        };
        assert!(item.price().is_zero());
    }
}
