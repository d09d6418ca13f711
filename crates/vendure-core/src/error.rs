//! # Error Types
//!
//! Domain-specific error types for vendure-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  vendure-core errors (this file)                                        │
//! │  ├── CoreError        - Checkout and lookup failures                    │
//! │  └── ValidationError  - Input validation failures                       │
//! │                                                                         │
//! │  vendure-store errors (separate crate)                                  │
//! │  └── StoreError       - Persistence failures                            │
//! │                                                                         │
//! │  Register API errors (in app)                                           │
//! │  └── ApiError         - What the UI shell sees (serialized)             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → UI notice               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// Checkout failures leave both the cart and the ledger untouched; the UI
/// surfaces them as a blocking notice.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Checkout was attempted with no cart lines.
    #[error("Cart is empty")]
    EmptyCart,

    /// Cash tendered is absent or not a valid non-negative amount.
    #[error("Enter the cash received before checking out")]
    MissingCash,

    /// Cash tendered does not cover the grand total.
    ///
    /// ## User Workflow
    /// ```text
    /// Grand total: 386.40
    ///      │
    ///      ▼
    /// Cash entered: 300
    ///      │
    ///      ▼
    /// InsufficientCash { due: 386.40, tendered: 300.00 }
    ///      │
    ///      ▼
    /// UI shows: "Insufficient cash: due 386.40, received 300.00"
    /// ```
    #[error("Insufficient cash: due {due}, received {tendered}")]
    InsufficientCash { due: Money, tendered: Money },

    /// Product id is not in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(i64),

    /// Sale id is not in the ledger.
    #[error("Sale not found: {0}")]
    SaleNotFound(i64),

    /// CSV export could not be produced.
    #[error("Export failed: {0}")]
    Export(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// The operation that produced one of these performs no mutation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value is above the accepted maximum.
    #[error("{field} must be at most {max}")]
    TooLarge { field: String, max: String },

    /// Invalid format (e.g. unparseable amount or date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    pub(crate) fn invalid_format(field: &str, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientCash {
            due: Money::from_cents(38640),
            tendered: Money::from_cents(30000),
        };
        assert_eq!(
            err.to_string(),
            "Insufficient cash: due 386.40, received 300.00"
        );
        assert_eq!(CoreError::EmptyCart.to_string(), "Cart is empty");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::invalid_format("price", "not a number");
        assert_eq!(err.to_string(), "price has invalid format: not a number");

        let err = ValidationError::TooLarge {
            field: "quantity".to_string(),
            max: "9999".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be at most 9999");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "price".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
