//! The finalized order, as appended to the `orders` history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::CheckoutSnapshot;
use crate::checkout::forms::{Delivery, Payment, ShippingForm};
use crate::money::Money;
use crate::types::OrderStatus;

/// Prefix of every order id.
pub const ORDER_ID_PREFIX: &str = "ORD-";

/// A placed order.
///
/// Built only from a checkout whose every step has been recorded, so the
/// step data is not optional here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: String,
    #[ts(as = "String")]
    pub date: DateTime<Utc>,
    pub status: OrderStatus,
    pub shipping: ShippingForm,
    pub delivery: Delivery,
    pub payment: Payment,
    pub cart: CheckoutSnapshot,
    /// The snapshot total. Delivery price is recorded but not added.
    pub total: Money,
}

/// `ORD-` followed by the last 8 digits of a millisecond timestamp.
///
/// ## Example
/// ```rust
/// use shopease_core::checkout::order::order_id_from_millis;
///
/// assert_eq!(order_id_from_millis(1_718_445_600_123), "ORD-45600123");
/// ```
pub fn order_id_from_millis(millis: i64) -> String {
    let digits = millis.unsigned_abs().to_string();
    let tail = &digits[digits.len().saturating_sub(8)..];
    format!("{ORDER_ID_PREFIX}{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_id_keeps_last_eight_digits() {
        assert_eq!(order_id_from_millis(1_718_445_600_123), "ORD-45600123");
        assert_eq!(order_id_from_millis(42), "ORD-42");
    }
}
