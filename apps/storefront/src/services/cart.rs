//! # Cart Ledger
//!
//! The cart page's service: owns the live cart, persists it after every
//! change and tells the host what happened.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Ledger Operations                               │
//! │                                                                         │
//! │  Shopper Action        Ledger Method         Host Sees                  │
//! │  ──────────────        ─────────────         ─────────                  │
//! │                                                                         │
//! │  Add to Cart ────────► add_item() ─────────► CartChanged, "<name> added │
//! │                                              to cart!"                  │
//! │  − / + buttons ──────► update_quantity() ──► CartChanged                │
//! │                          > 10 ─────────────► "Maximum quantity is 10"   │
//! │                          ≤ 0  ─────────────► "Item removed from cart"   │
//! │  × button ───────────► remove_item() ──────► "Item removed from cart"   │
//! │  Clear Cart ─────────► clear() ────────────► confirm(..) then "Cart     │
//! │                                              cleared"                   │
//! │  Apply coupon ───────► apply_coupon() ─────► "10% discount applied!"    │
//! │  Checkout ───────────► begin_checkout() ───► Navigate(Checkout)         │
//! │                                                                         │
//! │  NOTE: The cart lock is released before the store write; the write      │
//! │        persists a clone taken under the lock.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use shopease_core::{Cart, CartSummary, CheckoutSnapshot, Coupon, LineItem, NewLineItem};
use shopease_store::{CartRepository, CheckoutRepository, Storage};
use tracing::{debug, info, warn};

use crate::error::{ApiError, ErrorCode};
use crate::host::{Host, Notification, Route, StorefrontEvent};
use crate::state::StorefrontConfig;
use crate::view::CartView;

/// Prompt shown before the cart is emptied.
pub const CLEAR_CART_PROMPT: &str = "Are you sure you want to clear your cart?";

/// The live cart plus its persistence and host wiring.
pub struct CartLedger {
    cart: Mutex<Cart>,
    carts: CartRepository,
    snapshots: CheckoutRepository,
    host: Arc<dyn Host>,
}

impl CartLedger {
    /// Loads the persisted cart. A missing or unreadable cart starts empty.
    pub async fn load(storage: &Storage, host: Arc<dyn Host>) -> Self {
        let carts = storage.cart();
        let cart = carts.load().await;
        info!(lines = cart.items.len(), "Cart loaded");

        CartLedger {
            cart: Mutex::new(cart),
            carts,
            snapshots: storage.checkout(),
            host,
        }
    }

    /// Executes a function with read access to the cart.
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.cart.lock().expect("Cart mutex poisoned");
        f(&cart)
    }

    fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = self.cart.lock().expect("Cart mutex poisoned");
        f(&mut cart)
    }

    /// Persists a copy of the cart and asks the host to re-render.
    async fn commit(&self, cart: &Cart) {
        if !self.carts.save(cart).await {
            warn!("Cart change kept in memory only");
        }
        self.host.emit(StorefrontEvent::CartChanged);
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds an item, or raises the quantity of the line with the same id.
    ///
    /// The increment path does not enforce the per-item limit.
    pub async fn add_item(&self, item: NewLineItem) -> LineItem {
        let name = item.name.clone();
        let (line, cart) = self.with_cart_mut(|cart| {
            let line = cart.add_item(item).clone();
            (line, cart.clone())
        });

        debug!(id = %line.id, quantity = line.quantity, "Item added");
        self.commit(&cart).await;
        self.host
            .notify(Notification::success(format!("{} added to cart!", name)));
        line
    }

    /// Removes a line. Returns whether it was in the cart.
    ///
    /// The cart is saved and the removal announced even for an unknown id.
    pub async fn remove_item(&self, id: &str) -> bool {
        let (removed, cart) = self.with_cart_mut(|cart| (cart.remove_item(id), cart.clone()));

        debug!(id = %id, removed, "Item removed");
        self.commit(&cart).await;
        self.host.notify(Notification::success("Item removed from cart"));
        removed
    }

    /// Sets a line's quantity.
    ///
    /// ## Returns
    /// - `Ok(true)` when the line changed (or was removed for `quantity <= 0`)
    /// - `Ok(false)` when the id is not in the cart
    /// - `Err(LIMIT_EXCEEDED)` above 10, line unchanged
    pub async fn update_quantity(&self, id: &str, quantity: i64) -> Result<bool, ApiError> {
        let result = self.with_cart_mut(|cart| {
            cart.update_quantity(id, quantity)
                .map(|changed| changed.then(|| cart.clone()))
        });

        match result {
            Ok(Some(cart)) => {
                debug!(id = %id, quantity, "Quantity updated");
                self.commit(&cart).await;
                if quantity <= 0 {
                    self.host.notify(Notification::success("Item removed from cart"));
                }
                Ok(true)
            }
            Ok(None) => {
                debug!(id = %id, "Quantity update for unknown item ignored");
                Ok(false)
            }
            Err(err) => {
                let err = ApiError::from(err);
                self.host.notify(Notification::error(err.message.clone()));
                Err(err)
            }
        }
    }

    /// Empties the cart after the shopper confirms. Returns whether it did.
    pub async fn clear(&self) -> bool {
        if !self.host.confirm(CLEAR_CART_PROMPT) {
            debug!("Clear cart declined");
            return false;
        }

        let cart = self.with_cart_mut(|cart| {
            cart.clear();
            cart.clone()
        });

        info!("Cart cleared");
        self.commit(&cart).await;
        self.host.notify(Notification::success("Cart cleared"));
        true
    }

    /// Applies a coupon code (case-insensitive).
    pub async fn apply_coupon(&self, code: &str) -> Result<Coupon, ApiError> {
        let result = self.with_cart_mut(|cart| cart.apply_coupon(code).map(|c| (c, cart.clone())));

        match result {
            Ok((coupon, cart)) => {
                info!(?coupon, "Coupon applied");
                self.commit(&cart).await;
                self.host.notify(Notification::success(coupon.success_message()));
                Ok(coupon)
            }
            Err(err) => {
                debug!(code = %code, "Coupon rejected");
                let err = ApiError::from(err);
                self.host.notify(Notification::error(err.message.clone()));
                Err(err)
            }
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// A copy of the current cart.
    pub fn cart(&self) -> Cart {
        self.with_cart(Cart::clone)
    }

    pub fn summary(&self) -> CartSummary {
        self.with_cart(Cart::summary)
    }

    /// Badge count: total quantity across lines.
    pub fn item_count(&self) -> i64 {
        self.with_cart(Cart::item_count)
    }

    /// Render model for the cart page.
    pub fn view(&self, config: &StorefrontConfig) -> CartView {
        self.with_cart(|cart| CartView::build(cart, config))
    }

    // =========================================================================
    // Checkout Handoff
    // =========================================================================

    /// Saves the checkout snapshot and sends the shopper to checkout.
    ///
    /// ## Errors
    /// - `EMPTY_CART` with no items (nothing saved, no navigation)
    /// - `STORAGE_ERROR` when the snapshot could not be saved
    pub async fn begin_checkout(&self) -> Result<CheckoutSnapshot, ApiError> {
        let snapshot = match self.with_cart(Cart::checkout_snapshot) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                let err = ApiError::from(err);
                self.host.notify(Notification::error(err.message.clone()));
                return Err(err);
            }
        };

        if !self.snapshots.save(&snapshot).await {
            let err = ApiError::new(ErrorCode::StorageError, "Could not start checkout");
            self.host.notify(Notification::error(err.message.clone()));
            return Err(err);
        }

        info!(lines = snapshot.items.len(), total = %snapshot.total, "Checkout started");
        self.host.navigate(Route::Checkout);
        Ok(snapshot)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{RecordingHost, Severity};
    use shopease_core::Money;
    use shopease_store::MemoryStore;

    async fn ledger() -> (CartLedger, Arc<RecordingHost>, Storage) {
        let storage = Storage::from_backend(MemoryStore::new());
        let host = Arc::new(RecordingHost::new());
        let ledger = CartLedger::load(&storage, host.clone()).await;
        (ledger, host, storage)
    }

    fn headphones() -> NewLineItem {
        NewLineItem::new("p1", "Headphones", Money::from_dollars(30))
    }

    #[tokio::test]
    async fn test_add_item_persists_and_notifies() {
        let (ledger, host, storage) = ledger().await;

        let line = ledger.add_item(headphones()).await;
        assert_eq!(line.quantity, 1);
        assert_eq!(line.image, "default.jpg");

        assert_eq!(storage.cart().load().await.items.len(), 1);
        assert!(host.events().contains(&StorefrontEvent::CartChanged));
        assert_eq!(
            host.last_notification(),
            Some(Notification::success("Headphones added to cart!"))
        );
    }

    #[tokio::test]
    async fn test_quantity_over_limit_is_rejected() {
        let (ledger, host, storage) = ledger().await;
        ledger.add_item(headphones()).await;

        let err = ledger.update_quantity("p1", 11).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::LimitExceeded);

        let note = host.last_notification().unwrap();
        assert_eq!(note.message, "Maximum quantity is 10");
        assert_eq!(note.severity, Severity::Error);

        assert_eq!(ledger.with_cart(|c| c.get("p1").unwrap().quantity), 1);
        assert_eq!(storage.cart().load().await.items[0].quantity, 1);
    }

    #[tokio::test]
    async fn test_zero_quantity_removes_line() {
        let (ledger, host, _) = ledger().await;
        ledger.add_item(headphones()).await;

        assert!(ledger.update_quantity("p1", 0).await.unwrap());
        assert!(ledger.cart().is_empty());
        assert_eq!(host.last_notification().unwrap().message, "Item removed from cart");
    }

    #[tokio::test]
    async fn test_unknown_item_update_is_silent() {
        let (ledger, host, _) = ledger().await;

        assert!(!ledger.update_quantity("missing", 3).await.unwrap());
        assert!(host.events().is_empty());
    }

    #[tokio::test]
    async fn test_clear_requires_confirmation() {
        let (ledger, host, _) = ledger().await;
        ledger.add_item(headphones()).await;

        host.set_answer(false);
        assert!(!ledger.clear().await);
        assert_eq!(ledger.item_count(), 1);

        host.set_answer(true);
        assert!(ledger.clear().await);
        assert_eq!(ledger.item_count(), 0);
        assert_eq!(host.prompts(), vec![CLEAR_CART_PROMPT, CLEAR_CART_PROMPT]);
        assert_eq!(host.last_notification().unwrap().message, "Cart cleared");
    }

    #[tokio::test]
    async fn test_coupons() {
        let (ledger, host, _) = ledger().await;
        ledger.add_item(headphones()).await;

        let err = ledger.apply_coupon("BOGUS").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidCoupon);
        assert_eq!(host.last_notification().unwrap().message, "Invalid coupon code");
        assert_eq!(ledger.summary().discount, Money::zero());

        assert_eq!(ledger.apply_coupon("save10").await.unwrap(), Coupon::Save10);
        assert_eq!(ledger.summary().discount, Money::from_dollars(3));
        assert_eq!(host.last_notification().unwrap().message, "10% discount applied!");
    }

    #[tokio::test]
    async fn test_begin_checkout_on_empty_cart() {
        let (ledger, host, storage) = ledger().await;

        let err = ledger.begin_checkout().await.unwrap_err();
        assert_eq!(err.code, ErrorCode::EmptyCart);
        assert_eq!(host.last_notification().unwrap().message, "Your cart is empty");
        assert!(host.routes().is_empty());
        assert!(storage.checkout().load().await.is_none());
    }

    #[tokio::test]
    async fn test_begin_checkout_saves_snapshot() {
        let (ledger, host, storage) = ledger().await;
        ledger.add_item(headphones()).await;

        let snapshot = ledger.begin_checkout().await.unwrap();
        assert_eq!(snapshot.total, Money::from_dollars(48));
        assert_eq!(storage.checkout().load().await, Some(snapshot));
        assert_eq!(host.routes(), vec![Route::Checkout]);
    }

    #[tokio::test]
    async fn test_cart_survives_reload() {
        let (ledger, host, storage) = ledger().await;
        ledger.add_item(headphones().with_quantity(2)).await;

        let reloaded = CartLedger::load(&storage, host).await;
        assert_eq!(reloaded.item_count(), 2);
    }
}
