//! # Domain Types
//!
//! Types shared by the cart, checkout and catalog modules.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    LineItem     │   │     Product     │   │  PaymentMethod  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (unique)    │   │  id             │   │  CreditCard     │       │
//! │  │  unit_price     │   │  category/brand │   │  DebitCard      │       │
//! │  │  quantity 1..10 │   │  price, rating  │   │  PayPal, ...    │       │
//! │  │  variant        │   │  featured       │   └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘                              │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                              │
//! │  │    TaxRate      │   │   OrderStatus   │                              │
//! │  │  bps (u32)      │   │   Processing    │                              │
//! │  │  1000 = 10%     │   │   Shipped, ...  │                              │
//! │  └─────────────────┘   └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Persisted JSON uses camelCase field names; the storefront scripts reading
//! the same keys expect them.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::money::Money;
use crate::DEFAULT_ITEM_IMAGE;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// 1 basis point = 0.01%, so the storefront's flat 10% is 1000 bps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// Chosen product attributes (`color`, `size`, ...), kept sorted by name.
pub type Variant = BTreeMap<String, String>;

/// One product entry in the cart.
///
/// ## Invariants
/// - At most one LineItem per `id` in a cart
/// - `quantity` is in `1..=10` when set through `update_quantity`; the
///   `add_item` increment path does not re-check the upper bound
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub id: String,
    pub name: String,
    pub unit_price: Money,
    pub image: String,
    pub quantity: i64,
    #[serde(default)]
    pub variant: Variant,
}

impl LineItem {
    /// Line total before tax (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

/// What the host hands to `add_item`.
///
/// Everything the host may leave out is optional and filled in by
/// [`NewLineItem::into_line_item`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewLineItem {
    /// Product id; a UUID is generated when absent.
    pub id: Option<String>,
    pub name: String,
    pub unit_price: Money,
    pub image: Option<String>,
    /// Quantity to add (or to add on top of an existing line). Defaults to 1.
    pub quantity: Option<i64>,
    #[serde(default)]
    pub variant: Variant,
}

impl NewLineItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>, unit_price: Money) -> Self {
        NewLineItem {
            id: Some(id.into()),
            name: name.into(),
            unit_price,
            ..NewLineItem::default()
        }
    }

    pub fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn with_variant(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.variant.insert(name.into(), value.into());
        self
    }

    /// Quantity delta requested by the host.
    pub fn quantity_or_default(&self) -> i64 {
        self.quantity.unwrap_or(1)
    }

    /// Builds the stored line, filling defaults for id, image and quantity.
    pub fn into_line_item(self) -> LineItem {
        let quantity = self.quantity_or_default();
        LineItem {
            id: self.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            name: self.name,
            unit_price: self.unit_price,
            image: self.image.unwrap_or_else(|| DEFAULT_ITEM_IMAGE.to_string()),
            quantity,
            variant: self.variant,
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: String,
    pub brand: String,
    pub price: Money,
    /// Struck-through "was" price, when the product is on sale.
    pub old_price: Option<Money>,
    /// Star rating, 0-5.
    pub rating: u8,
    pub reviews: u32,
    pub color: String,
    pub in_stock: bool,
    pub image: String,
    pub featured: bool,
}

impl Product {
    /// Line the "Add to Cart" button would hand to the cart.
    pub fn to_new_line_item(&self) -> NewLineItem {
        NewLineItem {
            id: Some(self.id.clone()),
            name: self.name.clone(),
            unit_price: self.price,
            image: Some(self.image.clone()),
            quantity: Some(1),
            variant: Variant::from([("color".to_string(), self.color.clone())]),
        }
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// Payment options offered on the payment step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    CreditCard,
    DebitCard,
    PayPal,
    BankTransfer,
    CashOnDelivery,
}

impl PaymentMethod {
    /// Title shown on the payment option card.
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "Credit Card",
            PaymentMethod::DebitCard => "Debit Card",
            PaymentMethod::PayPal => "PayPal",
            PaymentMethod::BankTransfer => "Bank Transfer",
            PaymentMethod::CashOnDelivery => "Cash on Delivery",
        }
    }

    /// Card methods require card details on the payment step.
    pub fn is_card(&self) -> bool {
        matches!(self, PaymentMethod::CreditCard | PaymentMethod::DebitCard)
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Parses an option title such as `"Credit / Debit Card"` or `"PayPal"`.
///
/// Titles mentioning "Credit" map to a credit card and titles mentioning
/// "Debit" (but not "Credit") to a debit card.
impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let title = s.trim();
        if title.contains("Credit") {
            return Ok(PaymentMethod::CreditCard);
        }
        if title.contains("Debit") {
            return Ok(PaymentMethod::DebitCard);
        }

        match title.to_ascii_lowercase().as_str() {
            "paypal" => Ok(PaymentMethod::PayPal),
            "bank transfer" => Ok(PaymentMethod::BankTransfer),
            "cash on delivery" => Ok(PaymentMethod::CashOnDelivery),
            _ => Err(format!("Unknown payment method: {title}")),
        }
    }
}

// =============================================================================
// Order Status
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order placed, not yet shipped. Every new order starts here.
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Processing
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_line_item_defaults() {
        let item = NewLineItem {
            id: None,
            name: "Mug".to_string(),
            unit_price: Money::from_dollars(12),
            ..NewLineItem::default()
        }
        .into_line_item();

        assert_eq!(item.quantity, 1);
        assert_eq!(item.image, DEFAULT_ITEM_IMAGE);
        assert!(Uuid::parse_str(&item.id).is_ok());
    }

    #[test]
    fn test_line_total() {
        let item = NewLineItem::new("p1", "Headphones", Money::from_cents(2550))
            .with_quantity(3)
            .into_line_item();
        assert_eq!(item.line_total().cents(), 7650);
    }

    #[test]
    fn test_line_item_json_is_camel_case() {
        let item = NewLineItem::new("p1", "Shoe", Money::from_dollars(80))
            .with_variant("size", "42")
            .into_line_item();
        let json = serde_json::to_value(&item).unwrap();

        assert_eq!(json["unitPrice"], 8000);
        assert_eq!(json["variant"]["size"], "42");
    }

    #[test]
    fn test_payment_method_from_title() {
        assert_eq!(
            "Credit / Debit Card".parse::<PaymentMethod>(),
            Ok(PaymentMethod::CreditCard)
        );
        assert_eq!("Debit Card".parse::<PaymentMethod>(), Ok(PaymentMethod::DebitCard));
        assert_eq!("PayPal".parse::<PaymentMethod>(), Ok(PaymentMethod::PayPal));
        assert!("Bitcoin".parse::<PaymentMethod>().is_err());

        assert!(PaymentMethod::DebitCard.is_card());
        assert!(!PaymentMethod::CashOnDelivery.is_card());
    }

    #[test]
    fn test_order_status_default() {
        assert_eq!(OrderStatus::default(), OrderStatus::Processing);
        assert_eq!(
            serde_json::to_value(OrderStatus::Processing).unwrap(),
            "processing"
        );
    }
}
