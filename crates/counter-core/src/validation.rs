//! # Validation Module
//!
//! Input validation utilities for Counter POS.
//!
//! ## Validation Strategy
//! User input is validated before business logic runs. A validation
//! failure aborts the operation immediately with no state mutated; the
//! message is surfaced to the user as-is.

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Maximum length of a catalog item name.
pub const MAX_ITEM_NAME_LEN: usize = 200;

/// Maximum length of a customer name.
pub const MAX_CUSTOMER_NAME_LEN: usize = 100;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a catalog item name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most 200 characters
///
/// ## Example
/// ```rust
/// use counter_core::validation::validate_item_name;
///
/// assert!(validate_item_name("Basmati Rice 5kg").is_ok());
/// assert!(validate_item_name("").is_err());
/// assert!(validate_item_name("   ").is_err());
/// ```
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_ITEM_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_ITEM_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a customer name.
///
/// ## Rules
/// - May be empty (the walk-in placeholder is used instead)
/// - Must be at most 100 characters
pub fn validate_customer_name(name: &str) -> ValidationResult<()> {
    if name.trim().chars().count() > MAX_CUSTOMER_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "customer name".to_string(),
            max: MAX_CUSTOMER_NAME_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity value for an add-to-cart style operation.
///
/// ## Rules
/// - Must be positive (> 0)
///
/// Quantity edits on an existing line are not validated here: setting a
/// quantity of zero or less is the documented way to remove the line.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a price in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (items without a configured price)
///
/// ## Example
/// ```rust
/// use counter_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents(1099).is_ok());
/// assert!(validate_price_cents(0).is_ok());
/// assert!(validate_price_cents(-100).is_err());
/// ```
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a stock count.
///
/// ## Rules
/// - Must be non-negative when provided
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::OutOfRange {
            field: "stock".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_item_name() {
        assert!(validate_item_name("Rice").is_ok());
        assert!(validate_item_name("Sunflower Oil 1L").is_ok());

        assert!(validate_item_name("").is_err());
        assert!(validate_item_name("   ").is_err());
        assert!(validate_item_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_customer_name() {
        assert!(validate_customer_name("").is_ok()); // walk-in
        assert!(validate_customer_name("Asha").is_ok());
        assert!(validate_customer_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(100).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
    }

    #[test]
    fn test_validate_price_cents() {
        assert!(validate_price_cents(0).is_ok());
        assert!(validate_price_cents(1099).is_ok());
        assert!(validate_price_cents(-100).is_err());
    }

    #[test]
    fn test_validate_stock() {
        assert!(validate_stock(0).is_ok());
        assert!(validate_stock(25).is_ok());
        assert!(validate_stock(-1).is_err());
    }
}
