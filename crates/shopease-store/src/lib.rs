//! # shopease-store: Persistence for the ShopEase Storefront
//!
//! Every persisted storefront value is a JSON document under a fixed key.
//! This crate provides the backends that hold them and typed repositories
//! over each key.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        ShopEase Data Flow                               │
//! │                                                                         │
//! │  CartLedger.add_item(..)                                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  shopease-store (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │ Repositories  │    │    Storage    │    │   Backends   │  │   │
//! │  │   │               │    │ (storage.rs)  │    │              │  │   │
//! │  │   │ CartRepo      │───►│ get_json      │───►│ SqliteStore  │  │   │
//! │  │   │ CheckoutRepo  │    │ set_json      │    │ MemoryStore  │  │   │
//! │  │   │ OrderRepo     │    │ logs failures │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  SQLite: kv_store(key, value, updated_at)                       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`kv`] - `KeyValueStore` trait and the in-memory backend
//! - [`pool`] - SQLite pool configuration and backend
//! - [`migrations`] - Embedded migrations
//! - [`storage`] - JSON helper that logs and swallows failures
//! - [`repository`] - One repository per persisted key
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use shopease_store::{SqliteStore, Storage, StoreConfig};
//!
//! let backend = SqliteStore::new(StoreConfig::new("shopease.db")).await?;
//! let storage = Storage::from_backend(backend);
//!
//! let cart = storage.cart().load().await;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod kv;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod storage;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use kv::{KeyValueStore, MemoryStore};
pub use pool::{SqliteStore, StoreConfig};
pub use storage::Storage;

pub use repository::cart::CartRepository;
pub use repository::checkout::CheckoutRepository;
pub use repository::order::OrderRepository;
pub use repository::{CART_KEY, CHECKOUT_CART_KEY, ORDERS_KEY};
