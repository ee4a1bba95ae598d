//! # Checkout
//!
//! The four-step checkout wizard and the order record it produces.
//!
//! ## Step Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Checkout Wizard                                     │
//! │                                                                         │
//! │  ┌──────────┐  advance  ┌──────────┐  advance  ┌──────────┐  advance   │
//! │  │ Shipping │ ────────► │ Delivery │ ────────► │ Payment  │ ────────►  │
//! │  │   (1)    │ ◄──────── │   (2)    │ ◄──────── │   (3)    │ ◄────────  │
//! │  └──────────┘   back    └──────────┘   back    └──────────┘   back     │
//! │                                                                ┌──────┐ │
//! │  advance only moves on when the current step validates.       │Review│ │
//! │  Review (4) is terminal: place_order leaves the wizard.       │ (4)  │ │
//! │                                                                └──────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//! - [`forms`] - What the shopper enters on each step, and what gets recorded
//! - [`wizard`] - `CheckoutState` and the step validators
//! - [`order`] - The finalized order record

pub mod forms;
pub mod order;
pub mod wizard;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub use forms::{
    CardInput, CardSummary, Delivery, DeliveryOption, Payment, PaymentSelection, ShippingField,
    ShippingForm,
};
pub use order::Order;
pub use wizard::CheckoutState;

// =============================================================================
// Checkout Step
// =============================================================================

/// Steps of the checkout wizard, numbered 1-4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStep {
    Shipping,
    Delivery,
    Payment,
    Review,
}

impl CheckoutStep {
    /// Every step in order.
    pub const ALL: [CheckoutStep; 4] = [
        CheckoutStep::Shipping,
        CheckoutStep::Delivery,
        CheckoutStep::Payment,
        CheckoutStep::Review,
    ];

    /// Step number (1-indexed).
    pub fn number(&self) -> u8 {
        match self {
            CheckoutStep::Shipping => 1,
            CheckoutStep::Delivery => 2,
            CheckoutStep::Payment => 3,
            CheckoutStep::Review => 4,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CheckoutStep::Shipping => "Shipping",
            CheckoutStep::Delivery => "Delivery",
            CheckoutStep::Payment => "Payment",
            CheckoutStep::Review => "Review",
        }
    }

    pub fn next(&self) -> Option<CheckoutStep> {
        match self {
            CheckoutStep::Shipping => Some(CheckoutStep::Delivery),
            CheckoutStep::Delivery => Some(CheckoutStep::Payment),
            CheckoutStep::Payment => Some(CheckoutStep::Review),
            CheckoutStep::Review => None,
        }
    }

    pub fn previous(&self) -> Option<CheckoutStep> {
        match self {
            CheckoutStep::Shipping => None,
            CheckoutStep::Delivery => Some(CheckoutStep::Shipping),
            CheckoutStep::Payment => Some(CheckoutStep::Delivery),
            CheckoutStep::Review => Some(CheckoutStep::Payment),
        }
    }
}

impl Default for CheckoutStep {
    fn default() -> Self {
        CheckoutStep::Shipping
    }
}
