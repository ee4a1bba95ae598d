//! # Repository Module
//!
//! One repository per persisted key.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Persisted Keys                                       │
//! │                                                                         │
//! │  Service                    Repository              Key                 │
//! │  ───────                    ──────────              ───                 │
//! │  CartLedger ──────────────► CartRepository ───────► "cart"              │
//! │  CartLedger (checkout) ───► CheckoutRepository ───► "checkoutCart"      │
//! │  CheckoutService ─────────► CheckoutRepository                          │
//! │                  └────────► OrderRepository ──────► "orders"            │
//! │                                                                         │
//! │  Every value is one JSON document, replaced wholesale on write.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`CartRepository`](cart::CartRepository) - The live cart
//! - [`CheckoutRepository`](checkout::CheckoutRepository) - Snapshot handed to checkout
//! - [`OrderRepository`](order::OrderRepository) - Order history, newest first

pub mod cart;
pub mod checkout;
pub mod order;

/// Key of the live cart.
pub const CART_KEY: &str = "cart";

/// Key of the checkout snapshot.
pub const CHECKOUT_CART_KEY: &str = "checkoutCart";

/// Key of the order history.
pub const ORDERS_KEY: &str = "orders";
