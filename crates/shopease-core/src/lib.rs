//! # shopease-core: Pure Business Logic for the ShopEase Storefront
//!
//! This crate holds every rule of the storefront: cart math, the checkout
//! wizard and the catalog engine. Nothing here touches storage, timers or
//! the system clock.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        ShopEase Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Host (browser pages)                         │   │
//! │  │    Product grid ──► Cart page ──► Checkout steps ──► Confirm    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ Host trait / render models             │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    apps/storefront                              │   │
//! │  │    CartLedger, CheckoutService, CatalogService                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ shopease-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   cart    │  │ checkout  │  │  catalog  │  │ validation│  │   │
//! │  │   │   Cart    │  │  Wizard   │  │  Engine   │  │ card/email│  │   │
//! │  │   │  Coupon   │  │   Order   │  │  Filters  │  │   rules   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO CLOCK • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  shopease-store (Persistence)                   │   │
//! │  │              cart, checkoutCart, orders keys                    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (LineItem, Product, PaymentMethod, ...)
//! - [`money`] - Money type with integer arithmetic
//! - [`error`] - Domain error types
//! - [`validation`] - Field rules (email, phone, card, expiry, filters)
//! - [`cart`] - Cart state, coupons, summary and checkout snapshot
//! - [`checkout`] - Four-step checkout wizard and order records
//! - [`catalog`] - Product filtering, sorting and pagination
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input, same output. "Today" is an argument.
//! 2. **No I/O**: storage and notifications live in the outer crates
//! 3. **Integer Money**: all monetary values are cents (i64)
//! 4. **Explicit Errors**: every rejection is a typed error
//!
//! ## Example Usage
//!
//! ```rust
//! use shopease_core::cart::Cart;
//! use shopease_core::money::Money;
//! use shopease_core::types::NewLineItem;
//!
//! let mut cart = Cart::new();
//! cart.add_item(NewLineItem::new("p1", "Headphones", Money::from_dollars(30)));
//!
//! let summary = cart.summary();
//! assert_eq!(summary.tax, Money::from_dollars(3));
//! assert_eq!(summary.shipping, Money::from_dollars(15));
//! assert_eq!(summary.grand_total, Money::from_dollars(48));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use shopease_core::Money` instead of
// `use shopease_core::money::Money`

pub use cart::{Cart, CartSummary, CheckoutSnapshot, Coupon};
pub use error::{CoreError, CoreResult, ValidationError, ValidationErrors};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum quantity of a single line item, enforced by `update_quantity`.
pub const MAX_ITEM_QUANTITY: i64 = 10;

/// Flat sales tax, in basis points (10%).
pub const TAX_RATE_BPS: u32 = 1000;

/// Orders with a subtotal strictly above this ship free.
pub const FREE_SHIPPING_THRESHOLD: Money = Money::from_dollars(50);

/// Shipping charged below the free-shipping threshold, empty carts included.
pub const FLAT_SHIPPING: Money = Money::from_dollars(15);

/// Products shown per catalog page.
pub const PRODUCTS_PER_PAGE: usize = 12;

/// Upper bound of the default catalog price filter.
pub const DEFAULT_MAX_PRICE: Money = Money::from_dollars(5000);

/// Image used when a line item arrives without one.
pub const DEFAULT_ITEM_IMAGE: &str = "default.jpg";
