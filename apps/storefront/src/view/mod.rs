//! # Render Models
//!
//! Plain data for the host to draw. Every model is built from a borrowed
//! service state and the display config, holds only formatted strings and
//! flags, and is exported to TypeScript.
//!
//! ```text
//! CartLedger::view()         ──► CartView          (cart page, badge)
//! CheckoutService::progress() ──► CheckoutProgress  (step bar)
//! CatalogService::view()     ──► CatalogView       (grid, pager)
//! ```

mod cart;
mod catalog;
mod checkout;

pub use cart::{CartLineView, CartView};
pub use catalog::{stars, CatalogView, ProductCard, Star, STAR_SLOTS};
pub use checkout::{CheckoutProgress, StepMarker};
