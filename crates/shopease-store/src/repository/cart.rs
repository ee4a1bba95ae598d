//! # Cart Repository
//!
//! Persists the live cart under the `cart` key.

use shopease_core::Cart;
use tracing::debug;

use crate::repository::CART_KEY;
use crate::storage::Storage;

#[derive(Debug, Clone)]
pub struct CartRepository {
    storage: Storage,
}

impl CartRepository {
    pub fn new(storage: Storage) -> Self {
        CartRepository { storage }
    }

    /// Loads the saved cart. Missing or unreadable → empty cart.
    pub async fn load(&self) -> Cart {
        match self.storage.get_json::<Cart>(CART_KEY).await {
            Some(cart) => {
                debug!(lines = cart.items.len(), "Loaded saved cart");
                cart
            }
            None => Cart::default(),
        }
    }

    /// Replaces the saved cart.
    pub async fn save(&self, cart: &Cart) -> bool {
        self.storage.set_json(CART_KEY, cart).await
    }

    pub async fn remove(&self) -> bool {
        self.storage.remove(CART_KEY).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::{KeyValueStore, MemoryStore};
    use shopease_core::{Money, NewLineItem};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_missing_cart_loads_empty() {
        let storage = Storage::from_backend(MemoryStore::new());
        assert_eq!(storage.cart().load().await, Cart::default());
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let storage = Storage::from_backend(MemoryStore::new());
        let mut cart = Cart::new();
        cart.add_item(NewLineItem::new("p1", "Mug", Money::from_dollars(12)));
        cart.apply_coupon("SAVE10").unwrap();

        assert!(storage.cart().save(&cart).await);
        assert_eq!(storage.cart().load().await, cart);
    }

    #[tokio::test]
    async fn test_unreadable_cart_loads_empty() {
        let backend = Arc::new(MemoryStore::new());
        backend.set(CART_KEY, "[[[").await.unwrap();
        let storage = Storage::new(backend);

        assert!(storage.cart().load().await.is_empty());
    }

    #[tokio::test]
    async fn test_stored_json_uses_camel_case() {
        let backend = Arc::new(MemoryStore::new());
        let storage = Storage::new(backend.clone());
        let mut cart = Cart::new();
        cart.add_item(NewLineItem::new("p1", "Mug", Money::from_dollars(12)));
        storage.cart().save(&cart).await;

        let raw = backend.get(CART_KEY).await.unwrap().unwrap();
        assert!(raw.contains("\"unitPrice\":1200"));
        assert!(raw.contains("\"freeShipping\":false"));
    }
}
