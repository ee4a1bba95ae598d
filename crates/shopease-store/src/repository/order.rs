//! # Order Repository
//!
//! The order history under `orders`: a JSON array, newest order first.

use shopease_core::checkout::Order;
use tracing::{error, info};

use crate::repository::ORDERS_KEY;
use crate::storage::Storage;

#[derive(Debug, Clone)]
pub struct OrderRepository {
    storage: Storage,
}

impl OrderRepository {
    pub fn new(storage: Storage) -> Self {
        OrderRepository { storage }
    }

    /// Every order, newest first. Missing or unreadable history is empty.
    pub async fn list(&self) -> Vec<Order> {
        self.storage
            .get_json::<Vec<Order>>(ORDERS_KEY)
            .await
            .unwrap_or_default()
    }

    pub async fn find(&self, order_id: &str) -> Option<Order> {
        self.list()
            .await
            .into_iter()
            .find(|order| order.order_id == order_id)
    }

    /// Puts an order at the front of the history.
    ///
    /// Read-modify-write of the whole array; a concurrent writer in between
    /// is overwritten. History that cannot be read is left untouched and the
    /// order is not saved.
    pub async fn prepend(&self, order: Order) -> bool {
        let mut orders = match self.storage.try_get_json::<Vec<Order>>(ORDERS_KEY).await {
            Ok(orders) => orders.unwrap_or_default(),
            Err(err) => {
                error!(order_id = %order.order_id, error = %err, "Order history unreadable");
                return false;
            }
        };
        let order_id = order.order_id.clone();
        orders.insert(0, order);

        let saved = self.storage.set_json(ORDERS_KEY, &orders).await;
        if saved {
            info!(order_id = %order_id, history = orders.len(), "Order saved");
        }
        saved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::{KeyValueStore, MemoryStore};
    use chrono::{TimeZone, Utc};
    use shopease_core::checkout::{Delivery, Payment, ShippingForm};
    use shopease_core::{Cart, Money, NewLineItem, OrderStatus, PaymentMethod};

    fn order(id: &str) -> Order {
        let mut cart = Cart::new();
        cart.add_item(NewLineItem::new("p1", "Desk", Money::from_dollars(120)));
        let snapshot = cart.checkout_snapshot().unwrap();

        Order {
            order_id: id.to_string(),
            date: Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap(),
            status: OrderStatus::Processing,
            shipping: ShippingForm::default(),
            delivery: Delivery {
                method: "Standard".to_string(),
                price: Money::zero(),
            },
            payment: Payment {
                method: PaymentMethod::CashOnDelivery,
                card_details: None,
            },
            total: snapshot.total,
            cart: snapshot,
        }
    }

    #[tokio::test]
    async fn test_orders_are_newest_first() {
        let storage = Storage::from_backend(MemoryStore::new());
        assert!(storage.orders().list().await.is_empty());

        storage.orders().prepend(order("ORD-00000001")).await;
        storage.orders().prepend(order("ORD-00000002")).await;

        let ids: Vec<String> = storage
            .orders()
            .list()
            .await
            .into_iter()
            .map(|o| o.order_id)
            .collect();
        assert_eq!(ids, vec!["ORD-00000002", "ORD-00000001"]);
    }

    #[tokio::test]
    async fn test_find_order() {
        let storage = Storage::from_backend(MemoryStore::new());
        storage.orders().prepend(order("ORD-12345678")).await;

        let found = storage.orders().find("ORD-12345678").await.unwrap();
        assert_eq!(found.status, OrderStatus::Processing);
        assert!(storage.orders().find("ORD-nope").await.is_none());
    }

    #[tokio::test]
    async fn test_unreadable_history_is_not_overwritten() {
        let backend = std::sync::Arc::new(MemoryStore::new());
        let legacy = r#"[{"orderId":"ORD-OLD","legacy":true}]"#;
        backend.set(ORDERS_KEY, legacy).await.unwrap();
        let storage = Storage::new(backend.clone());

        assert!(!storage.orders().prepend(order("ORD-00000001")).await);
        assert_eq!(backend.get(ORDERS_KEY).await.unwrap().as_deref(), Some(legacy));
    }
}
