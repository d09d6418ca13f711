//! # Validation Module
//!
//! Input validation for catalog management and cash entry.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: UI shell                                                      │
//! │  ├── Basic format checks (empty fields)                                 │
//! │  └── Immediate user feedback                                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Register command (Rust)                                       │
//! │  └── THIS MODULE: business rule validation                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Store                                                         │
//! │  └── Well-formed JSON shape only                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A failed validation aborts the operation before anything is written.

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted product name.
pub const MAX_PRODUCT_NAME_LEN: usize = 200;

/// Highest price the catalog manager accepts (₱10,000,000.00).
pub const MAX_LISTED_PRICE: Money = Money::from_cents(1_000_000_000);

/// Highest quantity a single cart line may hold.
pub const MAX_LINE_QUANTITY: i64 = 9_999;

/// Validates a product name and returns it trimmed.
///
/// ## Example
/// ```rust
/// use vendure_core::validation::validate_product_name;
///
/// assert_eq!(validate_product_name("  Big Mac ").unwrap(), "Big Mac");
/// assert!(validate_product_name("").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_PRODUCT_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_PRODUCT_NAME_LEN,
        });
    }

    Ok(name.to_string())
}

/// Validates a price typed into the catalog manager.
///
/// ## Rules
/// - Must parse as a decimal amount (see [`Money::parse`])
/// - Must be strictly positive
/// - Must not exceed [`MAX_LISTED_PRICE`]
///
/// ## Example
/// ```rust
/// use vendure_core::validation::validate_listed_price;
///
/// assert_eq!(validate_listed_price("45").unwrap().cents(), 4500);
/// assert!(validate_listed_price("0").is_err());
/// assert!(validate_listed_price("free").is_err());
/// assert!(validate_listed_price("10000000.01").is_err());
/// ```
pub fn validate_listed_price(input: &str) -> ValidationResult<Money> {
    let price = Money::parse("price", input)?;

    if !price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    if price > MAX_LISTED_PRICE {
        return Err(ValidationError::TooLarge {
            field: "price".to_string(),
            max: MAX_LISTED_PRICE.to_string(),
        });
    }

    Ok(price)
}

/// Checks a cart line quantity against [`MAX_LINE_QUANTITY`].
///
/// Quantities of zero or below are not checked here; the cart removes
/// such lines instead.
pub fn validate_line_quantity(quantity: i64) -> ValidationResult<i64> {
    if quantity > MAX_LINE_QUANTITY {
        return Err(ValidationError::TooLarge {
            field: "quantity".to_string(),
            max: MAX_LINE_QUANTITY.to_string(),
        });
    }
    Ok(quantity)
}

/// Validates both catalog manager fields at once.
pub fn validate_product_input(name: &str, price: &str) -> ValidationResult<(String, Money)> {
    Ok((validate_product_name(name)?, validate_listed_price(price)?))
}

// =============================================================================
// Unit Tests
// =============================================================================
