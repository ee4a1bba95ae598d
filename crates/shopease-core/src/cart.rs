//! # Cart
//!
//! The cart ledger's state and every monetary derivation over it.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Shopper Action           Cart Method              State Change         │
//! │  ──────────────           ───────────              ────────────         │
//! │                                                                         │
//! │  Add to Cart ────────────► add_item() ───────────► push or qty += n    │
//! │  − / + buttons ──────────► update_quantity() ────► qty = n (1..=10)    │
//! │  × button ───────────────► remove_item() ────────► items.retain(..)    │
//! │  Clear Cart (confirmed) ─► clear() ──────────────► empty, no coupons   │
//! │  Apply coupon ───────────► apply_coupon() ───────► discount / ship = 0 │
//! │  Summary panel ──────────► summary() ────────────► (read only)         │
//! │  Proceed to Checkout ────► checkout_snapshot() ──► (read only)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Summary Math
//! ```text
//! subtotal    = Σ unit_price × quantity
//! tax         = subtotal × 10%
//! shipping    = $0 if subtotal > $50 or FREESHIP applied, else $15
//! grand total = subtotal + tax + shipping − discount
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{LineItem, NewLineItem, TaxRate};
use crate::{FLAT_SHIPPING, FREE_SHIPPING_THRESHOLD, MAX_ITEM_QUANTITY, TAX_RATE_BPS};

// =============================================================================
// Coupons
// =============================================================================

/// The fixed coupon table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Coupon {
    /// 10% off the subtotal.
    Save10,
    /// 20% off the subtotal.
    Save20,
    /// Shipping forced to zero.
    FreeShip,
}

impl Coupon {
    /// Case-insensitive lookup: `"save10"` and `"SAVE10"` are the same code.
    pub fn lookup(code: &str) -> Option<Coupon> {
        match code.trim().to_ascii_uppercase().as_str() {
            "SAVE10" => Some(Coupon::Save10),
            "SAVE20" => Some(Coupon::Save20),
            "FREESHIP" => Some(Coupon::FreeShip),
            _ => None,
        }
    }

    /// Percentage discount in basis points, `None` for non-percentage coupons.
    pub fn discount_bps(&self) -> Option<u32> {
        match self {
            Coupon::Save10 => Some(1000),
            Coupon::Save20 => Some(2000),
            Coupon::FreeShip => None,
        }
    }

    /// Confirmation shown after the coupon is applied.
    pub fn success_message(&self) -> String {
        match self.discount_bps() {
            Some(bps) => format!("{}% discount applied!", bps / 100),
            None => "Free shipping applied!".to_string(),
        }
    }
}

// =============================================================================
// Cart Summary
// =============================================================================

/// Pure derivation of the cart totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub subtotal: Money,
    pub tax: Money,
    pub shipping: Money,
    pub discount: Money,
    pub grand_total: Money,
    /// Total quantity across all lines (the cart badge number).
    pub item_count: i64,
}

// =============================================================================
// Checkout Snapshot
// =============================================================================

/// Immutable copy of the cart handed to the checkout wizard.
///
/// Written once when checkout begins; the wizard never writes back to the
/// cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSnapshot {
    pub items: Vec<LineItem>,
    pub subtotal: Money,
    pub tax: Money,
    pub shipping: Money,
    #[serde(default)]
    pub discount: Money,
    pub total: Money,
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart, as persisted under the `cart` key.
///
/// ## Invariants
/// - Items are unique by `id` and kept in insertion order
/// - `update_quantity` keeps quantities in `1..=10`
/// - `add_item` on an existing id adds to the quantity without an upper
///   check, so a line can exceed 10 that way. `update_quantity` still refuses
///   to set anything above 10.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub items: Vec<LineItem>,

    /// Fixed discount amount, computed from the subtotal when the coupon was
    /// applied.
    #[serde(default)]
    pub discount: Money,

    /// Set by the `FREESHIP` coupon.
    #[serde(default)]
    pub free_shipping: bool,
}

impl Cart {
    pub fn new() -> Self {
        Cart::default()
    }

    /// Adds a line or increases the quantity of an existing one.
    ///
    /// ## Behavior
    /// - Same id already in cart: quantity += requested quantity (default 1)
    /// - Otherwise: appended with defaults filled in
    ///
    /// Returns the stored line.
    pub fn add_item(&mut self, item: NewLineItem) -> &LineItem {
        let delta = item.quantity_or_default();

        let existing = item
            .id
            .as_deref()
            .and_then(|id| self.items.iter().position(|line| line.id == id));

        let index = match existing {
            Some(index) => {
                self.items[index].quantity += delta;
                index
            }
            None => {
                self.items.push(item.into_line_item());
                self.items.len() - 1
            }
        };

        &self.items[index]
    }

    /// Removes a line by id. Returns whether anything was removed; a missing
    /// id is not an error.
    pub fn remove_item(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|line| line.id != id);
        self.items.len() != before
    }

    /// Sets the quantity of a line.
    ///
    /// ## Behavior
    /// ```text
    /// id not in cart   → Ok(false), nothing changes
    /// quantity <= 0    → line removed, Ok(true)
    /// 1..=10           → quantity set, Ok(true)
    /// > 10             → Err(LimitExceeded), line unchanged
    /// ```
    pub fn update_quantity(&mut self, id: &str, quantity: i64) -> CoreResult<bool> {
        let Some(index) = self.items.iter().position(|line| line.id == id) else {
            return Ok(false);
        };

        if quantity <= 0 {
            self.items.remove(index);
            return Ok(true);
        }

        if quantity > MAX_ITEM_QUANTITY {
            return Err(CoreError::LimitExceeded {
                requested: quantity,
                max: MAX_ITEM_QUANTITY,
            });
        }

        self.items[index].quantity = quantity;
        Ok(true)
    }

    /// Empties the cart and drops any applied coupon.
    pub fn clear(&mut self) {
        self.items.clear();
        self.discount = Money::zero();
        self.free_shipping = false;
    }

    /// Applies a coupon code.
    ///
    /// Percentage coupons fix the discount against the current subtotal;
    /// applying `SAVE20` after `SAVE10` replaces the discount rather than
    /// stacking. `FREESHIP` is independent of the percentage coupons.
    pub fn apply_coupon(&mut self, code: &str) -> CoreResult<Coupon> {
        let coupon = Coupon::lookup(code).ok_or_else(|| CoreError::InvalidCoupon(code.to_string()))?;

        match coupon.discount_bps() {
            Some(bps) => self.discount = self.subtotal().percentage(bps),
            None => self.free_shipping = true,
        }

        Ok(coupon)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&LineItem> {
        self.items.iter().find(|line| line.id == id)
    }

    /// Total quantity of all lines.
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|line| line.quantity).sum()
    }

    pub fn subtotal(&self) -> Money {
        self.items.iter().map(LineItem::line_total).sum()
    }

    pub fn tax(&self) -> Money {
        self.subtotal().calculate_tax(TaxRate::from_bps(TAX_RATE_BPS))
    }

    /// Free above the threshold (strictly greater) or with `FREESHIP`.
    pub fn shipping(&self) -> Money {
        if self.free_shipping || self.subtotal() > FREE_SHIPPING_THRESHOLD {
            Money::zero()
        } else {
            FLAT_SHIPPING
        }
    }

    pub fn grand_total(&self) -> Money {
        self.subtotal() + self.tax() + self.shipping() - self.discount
    }

    /// All totals at once.
    pub fn summary(&self) -> CartSummary {
        CartSummary {
            subtotal: self.subtotal(),
            tax: self.tax(),
            shipping: self.shipping(),
            discount: self.discount,
            grand_total: self.grand_total(),
            item_count: self.item_count(),
        }
    }

    /// Snapshot for the checkout wizard. Fails on an empty cart.
    pub fn checkout_snapshot(&self) -> CoreResult<CheckoutSnapshot> {
        if self.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        let summary = self.summary();
        Ok(CheckoutSnapshot {
            items: self.items.clone(),
            subtotal: summary.subtotal,
            tax: summary.tax,
            shipping: summary.shipping,
            discount: summary.discount,
            total: summary.grand_total,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, dollars: i64) -> NewLineItem {
        NewLineItem::new(id, format!("Product {id}"), Money::from_dollars(dollars))
    }

    #[test]
    fn test_single_item_under_free_shipping() {
        let mut cart = Cart::new();
        cart.add_item(item("a", 30));

        let summary = cart.summary();
        assert_eq!(summary.subtotal, Money::from_dollars(30));
        assert_eq!(summary.tax, Money::from_dollars(3));
        assert_eq!(summary.shipping, Money::from_dollars(15));
        assert_eq!(summary.grand_total, Money::from_dollars(48));
    }

    #[test]
    fn test_second_item_crosses_free_shipping() {
        let mut cart = Cart::new();
        cart.add_item(item("a", 30));
        cart.add_item(item("b", 25));

        let summary = cart.summary();
        assert_eq!(summary.subtotal, Money::from_dollars(55));
        assert_eq!(summary.tax, Money::from_cents(550));
        assert_eq!(summary.shipping, Money::zero());
        assert_eq!(summary.grand_total, Money::from_cents(6050));
        assert_eq!(summary.item_count, 2);
    }

    #[test]
    fn test_exactly_fifty_still_pays_shipping() {
        let mut cart = Cart::new();
        cart.add_item(item("a", 50));
        assert_eq!(cart.shipping(), FLAT_SHIPPING);
    }

    #[test]
    fn test_add_same_id_increments_past_limit() {
        let mut cart = Cart::new();
        cart.add_item(item("a", 5).with_quantity(8));
        cart.add_item(item("a", 5).with_quantity(4));

        assert_eq!(cart.items.len(), 1);
        // The increment path does not enforce the per-item limit
        assert_eq!(cart.get("a").unwrap().quantity, 12);
    }

    #[test]
    fn test_update_quantity_rules() {
        let mut cart = Cart::new();
        cart.add_item(item("a", 5));

        assert_eq!(cart.update_quantity("a", 10), Ok(true));
        assert_eq!(cart.get("a").unwrap().quantity, 10);

        assert_eq!(
            cart.update_quantity("a", 11),
            Err(CoreError::LimitExceeded {
                requested: 11,
                max: 10
            })
        );
        assert_eq!(cart.get("a").unwrap().quantity, 10);

        assert_eq!(cart.update_quantity("missing", 3), Ok(false));

        assert_eq!(cart.update_quantity("a", 0), Ok(true));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(item("a", 5));
        assert!(!cart.remove_item("zzz"));
        assert!(cart.remove_item("a"));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_coupons_are_case_insensitive() {
        let mut lower = Cart::new();
        lower.add_item(item("a", 100));
        let mut upper = lower.clone();

        assert_eq!(lower.apply_coupon("save10"), Ok(Coupon::Save10));
        assert_eq!(upper.apply_coupon("SAVE10"), Ok(Coupon::Save10));
        assert_eq!(lower, upper);
        assert_eq!(lower.discount, Money::from_dollars(10));
    }

    #[test]
    fn test_invalid_coupon_leaves_cart_unchanged() {
        let mut cart = Cart::new();
        cart.add_item(item("a", 20));
        let before = cart.clone();

        assert_eq!(
            cart.apply_coupon("BOGUS"),
            Err(CoreError::InvalidCoupon("BOGUS".to_string()))
        );
        assert_eq!(cart, before);
    }

    #[test]
    fn test_free_ship_and_percentage_coupons() {
        let mut cart = Cart::new();
        cart.add_item(item("a", 20));

        cart.apply_coupon("FREESHIP").unwrap();
        assert_eq!(cart.shipping(), Money::zero());

        cart.apply_coupon("save20").unwrap();
        let summary = cart.summary();
        assert_eq!(summary.discount, Money::from_dollars(4));
        // 20 + 2 + 0 - 4
        assert_eq!(summary.grand_total, Money::from_dollars(18));
        assert_eq!(
            summary.grand_total,
            summary.subtotal + summary.tax + summary.shipping - summary.discount
        );
    }

    #[test]
    fn test_clear_drops_coupons() {
        let mut cart = Cart::new();
        cart.add_item(item("a", 20));
        cart.apply_coupon("SAVE10").unwrap();
        cart.apply_coupon("FREESHIP").unwrap();

        cart.clear();
        assert_eq!(cart, Cart::default());
    }

    #[test]
    fn test_checkout_snapshot() {
        assert_eq!(Cart::new().checkout_snapshot(), Err(CoreError::EmptyCart));

        let mut cart = Cart::new();
        cart.add_item(item("a", 30));
        let snapshot = cart.checkout_snapshot().unwrap();
        assert_eq!(snapshot.items.len(), 1);
        assert_eq!(snapshot.total, Money::from_dollars(48));
    }

    #[test]
    fn test_coupon_messages() {
        assert_eq!(Coupon::Save10.success_message(), "10% discount applied!");
        assert_eq!(Coupon::FreeShip.success_message(), "Free shipping applied!");
    }
}
