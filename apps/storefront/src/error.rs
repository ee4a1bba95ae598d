//! # API Error Type
//!
//! Unified error type returned by storefront services.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in ShopEase                               │
//! │                                                                         │
//! │  Host (page script)          Rust Services                              │
//! │  ──────────────────          ─────────────                              │
//! │                                                                         │
//! │  ledger.update_quantity(..)                                             │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Service Method                                                  │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Rule broken? ─── CoreError::LimitExceeded ────────┐            │  │
//! │  │         │                                          │            │  │
//! │  │         ▼                                          ▼            │  │
//! │  │  Store broken? ─── StoreError::QueryFailed ────── ApiError ────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  The same message has already been shown to the shopper as an error    │
//! │  notification; the returned value is for the caller's control flow.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use shopease_core::CoreError;
use shopease_store::StoreError;
use thiserror::Error;
use ts_rs::TS;

/// API error returned from storefront services.
///
/// ## Serialization
/// ```json
/// {
///   "code": "LIMIT_EXCEEDED",
///   "message": "Maximum quantity is 10"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// One or more fields failed validation; messages joined by newlines
    ValidationError,

    /// Quantity above the per-item limit
    LimitExceeded,

    /// Unknown coupon code
    InvalidCoupon,

    /// Checkout attempted with an empty cart
    EmptyCart,

    /// Checkout page opened without a cart snapshot
    MissingPersistedState,

    /// An order is already being placed
    OrderInProgress,

    /// Checkout step data missing when the order is built
    CheckoutError,

    /// Persisted store failure
    StorageError,

    /// Internal error
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    /// The checkout page was opened without a snapshot to work from.
    pub fn missing_checkout_cart() -> Self {
        ApiError::new(
            ErrorCode::MissingPersistedState,
            "No cart data found for checkout",
        )
    }

    /// A second order placement while one is in flight.
    pub fn order_in_progress() -> Self {
        ApiError::new(ErrorCode::OrderInProgress, "Your order is already being placed")
    }
}

/// Converts core errors to API errors.
///
/// Validation messages are joined with newlines, one line per failing rule.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::LimitExceeded { .. } => {
                ApiError::new(ErrorCode::LimitExceeded, err.to_string())
            }
            CoreError::InvalidCoupon(_) => {
                ApiError::new(ErrorCode::InvalidCoupon, "Invalid coupon code")
            }
            CoreError::EmptyCart => ApiError::new(ErrorCode::EmptyCart, err.to_string()),
            CoreError::NoDeliverySelected | CoreError::NoPaymentSelected => {
                ApiError::validation(err.to_string())
            }
            CoreError::IncompleteCheckout(_) | CoreError::AlreadyPlaced(_) => {
                ApiError::new(ErrorCode::CheckoutError, err.to_string())
            }
            CoreError::Validation(errors) => ApiError::validation(errors.messages().join("\n")),
        }
    }
}

/// Converts store errors to API errors.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::ConnectionFailed(_) | StoreError::PoolExhausted => {
                tracing::error!("Store unavailable: {}", err);
                ApiError::new(ErrorCode::StorageError, "Storage is unavailable")
            }
            StoreError::MigrationFailed(e) => {
                tracing::error!("Store migration failed: {}", e);
                ApiError::new(ErrorCode::StorageError, "Storage migration failed")
            }
            StoreError::QueryFailed(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Store query failed: {}", e);
                ApiError::new(ErrorCode::StorageError, "Storage operation failed")
            }
            StoreError::Serialization { key, message } => {
                tracing::error!(key = %key, "Stored value unreadable: {}", message);
                ApiError::new(ErrorCode::StorageError, "Stored data is unreadable")
            }
            StoreError::Internal(e) => {
                tracing::error!("Internal store error: {}", e);
                ApiError::internal("Storage operation failed")
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Errors that stop the storefront from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    /// No platform data directory and no `SHOPEASE_DB_PATH` override.
    #[error("Could not determine app data directory")]
    DataDirUnavailable,

    #[error("Failed to prepare data directory: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to open store: {0}")]
    Store(#[from] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopease_core::{ValidationError, ValidationErrors};

    #[test]
    fn test_validation_messages_are_joined() {
        let mut errors = ValidationErrors::new();
        errors.push(ValidationError::InvalidCardNumber);
        errors.push(ValidationError::InvalidCvv);

        let api = ApiError::from(CoreError::Validation(errors));
        assert_eq!(api.code, ErrorCode::ValidationError);
        assert_eq!(api.message, "Invalid card number\nInvalid CVV");
    }

    #[test]
    fn test_coupon_and_limit_messages() {
        let api = ApiError::from(CoreError::InvalidCoupon("BOGUS".to_string()));
        assert_eq!(api.code, ErrorCode::InvalidCoupon);
        assert_eq!(api.message, "Invalid coupon code");

        let api = ApiError::from(CoreError::LimitExceeded {
            requested: 11,
            max: 10,
        });
        assert_eq!(api.code, ErrorCode::LimitExceeded);
        assert_eq!(api.message, "Maximum quantity is 10");
    }

    #[test]
    fn test_error_code_serialization() {
        let json = serde_json::to_string(&ApiError::order_in_progress()).unwrap();
        assert!(json.contains("\"code\":\"ORDER_IN_PROGRESS\""));
    }

    #[test]
    fn test_store_errors_hide_details() {
        let api = ApiError::from(StoreError::QueryFailed("disk I/O error".to_string()));
        assert_eq!(api.code, ErrorCode::StorageError);
        assert!(!api.message.contains("disk"));
    }
}
