//! # Validation Module
//!
//! Input validation for products.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: ProductService::add                                          │
//! │  └── validate_new_product() before the store is touched                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: ProductStore::add / update (every variant)                   │
//! │  └── validate_new_product() again, before any mutation                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  └── Foreign key constraints                                           │
//! │                                                                         │
//! │  Each layer rejects invalid input on its own                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::NewProduct;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty or whitespace only
///
/// ## Example
/// ```rust
/// use grocery_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Melk").is_ok());
/// assert!(validate_product_name("   ").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    Ok(())
}

/// Validates a price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
///
/// ## Example
/// ```rust
/// use grocery_core::money::Money;
/// use grocery_core::validation::validate_price;
///
/// assert!(validate_price(Money::from_cents(119)).is_ok());
/// assert!(validate_price(Money::zero()).is_ok());
/// assert!(validate_price(Money::from_cents(-1)).is_err());
/// ```
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Runs every product rule, name first.
pub fn validate_new_product(product: &NewProduct) -> ValidationResult<()> {
    validate_product_name(&product.name)?;
    validate_price(product.price)?;
    Ok(())
}

/// Validates a grocery list item amount (at least one piece).
pub fn validate_amount(amount: i64) -> ValidationResult<()> {
    if amount < 1 {
        return Err(ValidationError::MustBePositive {
            field: "amount".to_string(),
        });
    }

    Ok(())
}

/// Parses a shelf-life date in `YYYY-MM-DD` form.
pub fn parse_shelf_life(text: &str) -> ValidationResult<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").map_err(|_| {
        ValidationError::InvalidFormat {
            field: "shelf_life".to_string(),
            reason: "expected YYYY-MM-DD".to_string(),
        }
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
