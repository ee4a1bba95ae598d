//! # Checkout Repository
//!
//! Persists the snapshot the cart hands to checkout, under `checkoutCart`.

use shopease_core::CheckoutSnapshot;

use crate::repository::CHECKOUT_CART_KEY;
use crate::storage::Storage;

#[derive(Debug, Clone)]
pub struct CheckoutRepository {
    storage: Storage,
}

impl CheckoutRepository {
    pub fn new(storage: Storage) -> Self {
        CheckoutRepository { storage }
    }

    /// `None` when checkout was never started or the value is unreadable.
    pub async fn load(&self) -> Option<CheckoutSnapshot> {
        self.storage.get_json(CHECKOUT_CART_KEY).await
    }

    pub async fn save(&self, snapshot: &CheckoutSnapshot) -> bool {
        self.storage.set_json(CHECKOUT_CART_KEY, snapshot).await
    }

    pub async fn remove(&self) -> bool {
        self.storage.remove(CHECKOUT_CART_KEY).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::{KeyValueStore, MemoryStore};
    use shopease_core::{Cart, Money, NewLineItem};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_snapshot_roundtrip_and_remove() {
        let storage = Storage::from_backend(MemoryStore::new());
        assert_eq!(storage.checkout().load().await, None);

        let mut cart = Cart::new();
        cart.add_item(NewLineItem::new("p1", "Lamp", Money::from_dollars(30)));
        let snapshot = cart.checkout_snapshot().unwrap();

        assert!(storage.checkout().save(&snapshot).await);
        assert_eq!(storage.checkout().load().await, Some(snapshot));

        assert!(storage.checkout().remove().await);
        assert_eq!(storage.checkout().load().await, None);
    }

    #[tokio::test]
    async fn test_snapshot_without_discount_field_loads() {
        let backend = Arc::new(MemoryStore::new());
        backend
            .set(
                CHECKOUT_CART_KEY,
                r#"{"items":[],"subtotal":0,"tax":0,"shipping":1500,"total":1500}"#,
            )
            .await
            .unwrap();
        let storage = Storage::new(backend);

        let snapshot = storage.checkout().load().await.unwrap();
        assert_eq!(snapshot.discount, Money::zero());
        assert_eq!(snapshot.total, Money::from_dollars(15));
    }
}
