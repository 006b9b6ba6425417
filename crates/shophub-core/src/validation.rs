//! # Validation Module
//!
//! Input validation utilities for the ShopHub client core.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Storefront forms                                             │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (before dispatching into the stores)            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Hosted backend constraints (external collaborator)           │
//! │                                                                         │
//! │  The cart and search stores themselves never validate: by contract    │
//! │  their operations are total, and malformed input is the dispatcher's  │
//! │  problem to catch here.                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{ValidationError, ValidationResult};
use crate::MAX_ITEM_QUANTITY;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a search query.
///
/// ## Rules
/// - Can be empty (empty query means Idle, not an error)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: 100,
        });
    }

    Ok(query.to_string())
}

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty
/// - Must be between 1 and 200 characters
///
/// ## Example
/// ```rust
/// use shophub_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Wireless Bluetooth Headphones").is_ok());
/// assert!(validate_product_name("").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity value.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
///
/// Note the asymmetry with the cart itself: `UpdateQuantity(id, 0)` is a
/// legal cart operation meaning "remove". This validator is for quantity
/// *entry fields*, where zero is a user mistake worth flagging.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a price in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
///
/// ## Example
/// ```rust
/// use shophub_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents(8999).is_ok());  // $89.99
/// assert!(validate_price_cents(0).is_ok());     // Free item
/// assert!(validate_price_cents(-100).is_err()); // Invalid
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

// =============================================================================
// Unit Tests
// =============================================================================
