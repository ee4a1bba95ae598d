//! # Error Types
//!
//! Domain-specific error types for shopease-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  shopease-core errors (this file)                                      │
//! │  ├── CoreError         - Business rule rejections                      │
//! │  ├── ValidationError   - One failing field/rule                        │
//! │  └── ValidationErrors  - Every failing rule of a step, collected       │
//! │                                                                         │
//! │  shopease-store errors (separate crate)                                │
//! │  └── StoreError        - Key-value store failures                      │
//! │                                                                         │
//! │  storefront errors (in app)                                            │
//! │  └── ApiError          - What the host sees (serialized)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Collected, Not Fail-Fast
//! A checkout step reports every broken rule at once. Validators push into a
//! [`ValidationErrors`] and only turn it into an error at the end.

use std::fmt;

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// Missing cart items are deliberately absent here: removing or updating an
/// id that is not in the cart is a silent no-op, not an error.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoreError {
    /// Quantity update above the per-item limit. The item is left unchanged.
    #[error("Maximum quantity is {max}")]
    LimitExceeded { requested: i64, max: i64 },

    /// Coupon code not in the coupon table.
    #[error("Invalid coupon code: {0}")]
    InvalidCoupon(String),

    /// Checkout attempted with no items in the cart.
    #[error("Your cart is empty")]
    EmptyCart,

    /// Delivery step submitted without a selected option.
    #[error("Please select a delivery method")]
    NoDeliverySelected,

    /// Payment step submitted without a selected option.
    #[error("Please select a payment method")]
    NoPaymentSelected,

    /// Order requested before an earlier step recorded its data.
    #[error("Checkout is incomplete: {0} step has not been completed")]
    IncompleteCheckout(&'static str),

    /// The session already produced an order and accepts no more changes.
    #[error("Order {0} has already been placed")]
    AlreadyPlaced(String),

    /// One or more field-level rules failed.
    #[error("{0}")]
    Validation(#[from] ValidationErrors),
}

impl CoreError {
    /// Flattens the error into the list of messages shown to the user.
    pub fn messages(&self) -> Vec<String> {
        match self {
            CoreError::Validation(errors) => errors.messages(),
            other => vec![other.to_string()],
        }
    }
}

impl From<ValidationError> for CoreError {
    fn from(err: ValidationError) -> Self {
        CoreError::Validation(ValidationErrors::from(err))
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// A single failing field or rule.
///
/// Messages are the exact text shown to shoppers.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Please enter a valid phone number")]
    InvalidPhone,

    #[error("Invalid card number")]
    InvalidCardNumber,

    #[error("Invalid expiry date")]
    InvalidExpiry,

    #[error("Invalid CVV")]
    InvalidCvv,

    #[error("Invalid cardholder name")]
    InvalidCardholderName,

    /// A displayed price could not be read back into money.
    #[error("{field} has an invalid price: '{value}'")]
    InvalidPrice { field: String, value: String },

    /// Price filter bounds are negative or inverted.
    #[error("Price range {min} - {max} is invalid")]
    InvalidPriceRange { min: Money, max: Money },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },
}

// =============================================================================
// Validation Errors (collected)
// =============================================================================

/// Every failing rule of one validation pass, in the order they were found.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub fn new() -> Self {
        ValidationErrors(Vec::new())
    }

    pub fn push(&mut self, err: ValidationError) {
        self.0.push(err);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }

    /// `Ok(value)` when nothing was collected, otherwise the collected errors.
    pub fn into_result<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.0.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(err: ValidationError) -> Self {
        ValidationErrors(vec![err])
    }
}

/// One message per line, the way the host stacks them in a single toast.
impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self.messages().join("\n");
        f.write_str(&joined)
    }
}

impl std::error::Error for ValidationErrors {}

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
        let err = CoreError::LimitExceeded {
            requested: 11,
            max: 10,
        };
        assert_eq!(err.to_string(), "Maximum quantity is 10");
        assert_eq!(CoreError::EmptyCart.to_string(), "Your cart is empty");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "First Name".to_string(),
        };
        assert_eq!(err.to_string(), "First Name is required");
        assert_eq!(ValidationError::InvalidCvv.to_string(), "Invalid CVV");
    }

    #[test]
    fn test_collected_errors_join_with_newlines() {
        let mut errors = ValidationErrors::new();
        errors.push(ValidationError::InvalidCardNumber);
        errors.push(ValidationError::InvalidCvv);

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.to_string(), "Invalid card number\nInvalid CVV");
        assert!(errors.into_result(()).is_err());
    }

    #[test]
    fn test_empty_collection_is_ok() {
        assert_eq!(ValidationErrors::new().into_result(7), Ok(7));
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::InvalidEmail.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        assert_eq!(
            core_err.messages(),
            vec!["Please enter a valid email address".to_string()]
        );
        assert_eq!(
            CoreError::NoPaymentSelected.messages(),
            vec!["Please select a payment method".to_string()]
        );
    }
}
