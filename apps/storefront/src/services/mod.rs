//! # Services
//!
//! One service per storefront page. Services are peers: none of them calls
//! another, and the only handoff is the `checkoutCart` snapshot the cart
//! writes and checkout reads.
//!
//! ```text
//! ┌──────────────┐   checkoutCart    ┌──────────────────┐
//! │  CartLedger  │ ────────────────► │ CheckoutService  │ ──► orders
//! └──────────────┘   (store key)     └──────────────────┘
//!
//! ┌──────────────────┐
//! │  CatalogService  │  (no persisted state)
//! └──────────────────┘
//! ```
//!
//! ## Locking
//! Each service keeps its state in a `std::sync::Mutex`. Guards never live
//! across an `.await`: mutations clone what they need to persist, drop the
//! guard, then write.

pub mod cart;
pub mod catalog;
pub mod checkout;

pub use cart::{CartLedger, CLEAR_CART_PROMPT};
pub use catalog::CatalogService;
pub use checkout::CheckoutService;
