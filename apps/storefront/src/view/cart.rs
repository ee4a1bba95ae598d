//! Cart page render model.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │  CART                                              3 items     │
//! ├────────────────────────────────────────────────────────────────┤
//! │  Headphones (black)      x2      $30.00         $60.00         │
//! │  Cable                   x1       $5.00          $5.00         │
//! ├────────────────────────────────────────────────────────────────┤
//! │  Subtotal                                       $65.00         │
//! │  Tax (10%)                                       $6.50         │
//! │  Shipping                                         Free         │
//! │  ──────────────────────────────────────────────────────        │
//! │  TOTAL                                          $71.50         │
//! └────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use shopease_core::{Cart, Variant, MAX_ITEM_QUANTITY};
use ts_rs::TS;

use crate::state::StorefrontConfig;

/// One row of the cart table.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLineView {
    pub id: String,
    pub name: String,
    pub image: String,
    pub variant: Variant,
    pub quantity: i64,
    pub unit_price: String,
    pub line_total: String,
    /// The + button is disabled at the per-item limit.
    pub can_increase: bool,
}

/// The whole cart page.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub is_empty: bool,
    /// Header badge: total quantity.
    pub badge_count: i64,
    pub subtotal: String,
    pub tax: String,
    /// "Free" when no shipping is charged.
    pub shipping: String,
    /// Present only when a discount coupon is applied.
    pub discount: Option<String>,
    pub grand_total: String,
}

impl CartView {
    pub fn build(cart: &Cart, config: &StorefrontConfig) -> Self {
        let summary = cart.summary();

        let lines = cart
            .items
            .iter()
            .map(|line| CartLineView {
                id: line.id.clone(),
                name: line.name.clone(),
                image: line.image.clone(),
                variant: line.variant.clone(),
                quantity: line.quantity,
                unit_price: config.format_currency(line.unit_price),
                line_total: config.format_currency(line.line_total()),
                can_increase: line.quantity < MAX_ITEM_QUANTITY,
            })
            .collect();

        CartView {
            lines,
            is_empty: cart.is_empty(),
            badge_count: summary.item_count,
            subtotal: config.format_currency(summary.subtotal),
            tax: config.format_currency(summary.tax),
            shipping: config.format_shipping(summary.shipping),
            discount: (!summary.discount.is_zero())
                .then(|| config.format_currency(summary.discount)),
            grand_total: config.format_currency(summary.grand_total),
        }
    }
}
