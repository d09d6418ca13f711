//! # API Error Type
//!
//! Unified error type for register commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Vendure POS                            │
//! │                                                                         │
//! │  UI shell                    Register                                   │
//! │  ────────                    ────────                                   │
//! │                                                                         │
//! │  checkout("300")                                                        │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Store Error? ──── StoreError::Io(...) ─────────────┐            │  │
//! │  │         │                                           │            │  │
//! │  │         ▼                                           ▼            │  │
//! │  │  Checkout Error? ── CoreError::InsufficientCash ── ApiError ───►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  { "code": "INSUFFICIENT_CASH",                                         │
//! │    "message": "Insufficient cash: due 386.40, received 300.00" }        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use vendure_core::{CoreError, ValidationError};
use vendure_store::StoreError;

/// Error returned from register commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Sale not found: 1760682600000"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Product or sale id does not exist
    NotFound,

    /// Input validation failed; nothing was written
    ValidationError,

    /// Backend read or write failed
    StorageError,

    /// Checkout with no cart lines
    EmptyCart,

    /// Checkout without a parseable cash amount
    MissingCash,

    /// Cash does not cover the grand total
    InsufficientCash,

    /// Confirmation token unknown or already used
    ConfirmationNotFound,

    /// Internal error
    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: impl std::fmt::Display) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    pub fn confirmation_not_found(token: &str) -> Self {
        ApiError::new(
            ErrorCode::ConfirmationNotFound,
            format!("No pending confirmation for token {}", token),
        )
    }
}

/// Converts store errors to API errors.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::InvalidKey(key) => {
                ApiError::internal(format!("Invalid storage key: {}", key))
            }
            StoreError::ConnectionFailed(_) => {
                ApiError::new(ErrorCode::StorageError, "Storage connection failed")
            }
            StoreError::MigrationFailed(_) => {
                ApiError::new(ErrorCode::StorageError, "Storage migration failed")
            }
            StoreError::PoolExhausted => {
                ApiError::new(ErrorCode::StorageError, "Storage pool exhausted")
            }
            other => {
                // Log the actual error but return a generic message
                tracing::error!("Storage operation failed: {}", other);
                ApiError::new(ErrorCode::StorageError, "Storage operation failed")
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let message = err.to_string();
        match err {
            CoreError::EmptyCart => ApiError::new(ErrorCode::EmptyCart, message),
            CoreError::MissingCash => ApiError::new(ErrorCode::MissingCash, message),
            CoreError::InsufficientCash { .. } => {
                ApiError::new(ErrorCode::InsufficientCash, message)
            }
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", id),
            CoreError::SaleNotFound(id) => ApiError::not_found("Sale", id),
            CoreError::Export(reason) => {
                tracing::error!("CSV export failed: {}", reason);
                ApiError::internal("Could not produce the CSV export")
            }
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use vendure_core::Money;

    #[test]
    fn test_serialized_shape() {
        let err = ApiError::from(CoreError::InsufficientCash {
            due: Money::from_cents(38640),
            tendered: Money::from_cents(30000),
        });
        let json = serde_json::to_value(&err).unwrap();

        assert_eq!(json["code"], "INSUFFICIENT_CASH");
        assert_eq!(json["message"], "Insufficient cash: due 386.40, received 300.00");
    }

    #[test]
    fn test_core_error_codes() {
        assert_eq!(ApiError::from(CoreError::EmptyCart).code, ErrorCode::EmptyCart);
        assert_eq!(ApiError::from(CoreError::MissingCash).code, ErrorCode::MissingCash);
        assert_eq!(
            ApiError::from(CoreError::SaleNotFound(7)).message,
            "Sale not found: 7"
        );
        let validation = || ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(
            ApiError::from(CoreError::Validation(validation())).code,
            ErrorCode::ValidationError
        );
        assert_eq!(ApiError::from(validation()).message, "name is required");
    }

    #[test]
    fn test_store_errors_are_storage_errors() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = ApiError::from(StoreError::Io(io));
        assert_eq!(err.code, ErrorCode::StorageError);
        assert_eq!(err.message, "Storage operation failed");
    }

    #[test]
    fn test_confirmation_code_serializes() {
        let json = serde_json::to_value(ApiError::confirmation_not_found("abc")).unwrap();
        assert_eq!(json["code"], "CONFIRMATION_NOT_FOUND");
    }
}
