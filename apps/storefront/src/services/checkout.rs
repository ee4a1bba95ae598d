//! # Checkout Service
//!
//! The checkout page's service: drives the four-step wizard over the cart
//! snapshot and places the order.
//!
//! ## Order Placement
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    place_order()                                        │
//! │                                                                         │
//! │  1. Session open, on Review ─── no ────► error toast, Err(CHECKOUT)     │
//! │         │                                                               │
//! │     Re-validate payment ─────── fail ──► error toast, Err(VALIDATION)   │
//! │         │                                                               │
//! │  2. Take placement lock ─────── held ──► Err(ORDER_IN_PROGRESS)         │
//! │         │                                                               │
//! │  3. Simulated latency (tokio::time::sleep)                              │
//! │         │                                                               │
//! │  4. order id = "ORD-" + last 8 digits of the clock in millis            │
//! │         │                                                               │
//! │  5. Prepend to `orders` ─────── fail ──► error toast, cart kept         │
//! │         │                                                               │
//! │  6. Remove `cart` and `checkoutCart`                                    │
//! │         │                                                               │
//! │  7. Session marked placed; selections and steps are refused after     │
//! │         │                                                               │
//! │  8. "Order <id> placed successfully!" + Navigate(OrderConfirmation)    │
//! │                                                                         │
//! │  The lock is released when placement ends, however it ends.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use shopease_core::checkout::order::order_id_from_millis;
use shopease_core::checkout::{
    CheckoutState, CheckoutStep, DeliveryOption, Order, PaymentSelection, ShippingField,
    ShippingForm,
};
use shopease_core::CoreError;
use shopease_store::{CartRepository, CheckoutRepository, OrderRepository, Storage};
use tracing::{debug, error, info, warn};

use crate::error::{ApiError, ErrorCode};
use crate::host::{Host, Notification, Route};
use crate::state::Clock;
use crate::view::CheckoutProgress;

/// One checkout session.
pub struct CheckoutService {
    state: Mutex<CheckoutState>,
    orders: OrderRepository,
    carts: CartRepository,
    snapshots: CheckoutRepository,
    host: Arc<dyn Host>,
    clock: Arc<dyn Clock>,
    latency: Duration,
    placing: AtomicBool,
}

/// Releases the placement lock when dropped.
struct PlacementGuard<'a>(&'a AtomicBool);

impl Drop for PlacementGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl CheckoutService {
    /// Starts a session from the snapshot saved by the cart.
    ///
    /// ## Errors
    /// `MISSING_PERSISTED_STATE` when no snapshot exists; the host is sent
    /// back to the cart page.
    pub async fn open(
        storage: &Storage,
        host: Arc<dyn Host>,
        clock: Arc<dyn Clock>,
        latency: Duration,
    ) -> Result<Self, ApiError> {
        let Some(snapshot) = storage.checkout().load().await else {
            warn!("Checkout opened without a cart snapshot");
            host.navigate(Route::Cart);
            return Err(ApiError::missing_checkout_cart());
        };

        info!(lines = snapshot.items.len(), total = %snapshot.total, "Checkout opened");

        Ok(CheckoutService {
            state: Mutex::new(CheckoutState::new(snapshot)),
            orders: storage.orders(),
            carts: storage.cart(),
            snapshots: storage.checkout(),
            host,
            clock,
            latency,
            placing: AtomicBool::new(false),
        })
    }

    /// Executes a function with read access to the wizard state.
    pub fn with_state<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&CheckoutState) -> R,
    {
        let state = self.state.lock().expect("Checkout mutex poisoned");
        f(&state)
    }

    fn with_state_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut CheckoutState) -> R,
    {
        let mut state = self.state.lock().expect("Checkout mutex poisoned");
        f(&mut state)
    }

    /// Shows the error to the shopper and hands it back.
    fn reject(&self, err: impl Into<ApiError>) -> ApiError {
        let err = err.into();
        self.host.notify(Notification::error(err.message.clone()));
        err
    }

    /// Applies a selection change while the session is still open.
    fn select<F>(&self, f: F) -> Result<(), ApiError>
    where
        F: FnOnce(&mut CheckoutState),
    {
        self.with_state_mut(|state| -> Result<(), CoreError> {
            state.ensure_open()?;
            f(state);
            Ok(())
        })
        .map_err(|err| self.reject(err))
    }

    // =========================================================================
    // Selections
    // =========================================================================

    /// Replaces the shipping form contents.
    pub fn set_shipping(&self, form: ShippingForm) -> Result<(), ApiError> {
        self.select(|state| state.set_shipping_input(form))
    }

    /// Replaces the set of shipping fields marked required.
    pub fn set_required_fields(&self, fields: Vec<ShippingField>) -> Result<(), ApiError> {
        self.select(|state| {
            *state = state.clone().with_required_fields(fields);
        })
    }

    pub fn select_delivery(&self, option: DeliveryOption) -> Result<(), ApiError> {
        self.select(|state| state.select_delivery(option))
    }

    pub fn select_payment(&self, selection: PaymentSelection) -> Result<(), ApiError> {
        self.select(|state| state.select_payment(selection))
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    pub fn current_step(&self) -> CheckoutStep {
        self.with_state(|state| state.current_step)
    }

    /// Validates the current step and moves forward.
    ///
    /// Every failing rule is reported at once, one line each.
    pub fn next_step(&self) -> Result<CheckoutStep, ApiError> {
        let today = self.clock.today();
        let step = self
            .with_state_mut(|state| state.advance(today))
            .map_err(|err| self.reject(err))?;

        debug!(step = step.number(), "Checkout step advanced");
        Ok(step)
    }

    /// Moves back one step, never below shipping.
    pub fn previous_step(&self) -> CheckoutStep {
        let step = self.with_state_mut(CheckoutState::back);
        debug!(step = step.number(), "Checkout step back");
        step
    }

    /// Render model for the progress bar.
    pub fn progress(&self) -> CheckoutProgress {
        CheckoutProgress::new(self.current_step())
    }

    // =========================================================================
    // Order Placement
    // =========================================================================

    /// Places the order. See the module docs for the sequence.
    pub async fn place_order(&self) -> Result<Order, ApiError> {
        let today = self.clock.today();
        self.with_state_mut(|state| {
            state.ensure_open()?;
            if state.current_step != CheckoutStep::Review {
                return Err(CoreError::IncompleteCheckout("Review"));
            }
            state.validate_payment(today)
        })
        .map_err(|err| self.reject(err))?;

        if self
            .placing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!("Order placement already in progress");
            let err = ApiError::order_in_progress();
            self.host.notify(Notification::info(err.message.clone()));
            return Err(err);
        }
        let _guard = PlacementGuard(&self.placing);

        tokio::time::sleep(self.latency).await;

        let placed_at = self.clock.now_utc();
        let order_id = order_id_from_millis(placed_at.timestamp_millis());

        let order = self
            .with_state_mut(|state| state.prepare_order(order_id, placed_at, today))
            .map_err(|err| self.reject(err))?;

        if !self.orders.prepend(order.clone()).await {
            error!(order_id = %order.order_id, "Order could not be saved");
            return Err(self.reject(ApiError::new(
                ErrorCode::StorageError,
                "Could not place order, please try again",
            )));
        }

        self.with_state_mut(|state| state.mark_placed(order.order_id.clone()));
        self.carts.remove().await;
        self.snapshots.remove().await;

        info!(order_id = %order.order_id, total = %order.total, "Order placed");
        self.host.notify(Notification::success(format!(
            "Order {} placed successfully!",
            order.order_id
        )));
        self.host
            .navigate(Route::OrderConfirmation(order.order_id.clone()));

        Ok(order)
    }

    /// Id of the order this session placed, if any.
    pub fn placed_order(&self) -> Option<String> {
        self.with_state(|state| state.placed_order().map(str::to_string))
    }

    /// True while an order is being placed.
    pub fn is_placing(&self) -> bool {
        self.placing.load(Ordering::Acquire)
    }

    // =========================================================================
    // Order History
    // =========================================================================

    /// Every placed order, newest first.
    pub async fn orders(&self) -> Vec<Order> {
        self.orders.list().await
    }

    pub async fn find_order(&self, order_id: &str) -> Option<Order> {
        self.orders.find(order_id).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{RecordingHost, Severity};
    use crate::state::FixedClock;
    use chrono::{TimeZone, Utc};
    use shopease_core::checkout::CardInput;
    use shopease_core::{Cart, Money, NewLineItem, PaymentMethod};
    use shopease_store::{KeyValueStore, MemoryStore};

    fn clock() -> Arc<FixedClock> {
        Arc::new(FixedClock(
            Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap(),
        ))
    }

    async fn storage_with_snapshot() -> Storage {
        let storage = Storage::from_backend(MemoryStore::new());
        let mut cart = Cart::new();
        cart.add_item(NewLineItem::new("p1", "Headphones", Money::from_dollars(30)));
        storage.cart().save(&cart).await;
        storage
            .checkout()
            .save(&cart.checkout_snapshot().unwrap())
            .await;
        storage
    }

    fn form() -> ShippingForm {
        ShippingForm {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: "555-123-4567".to_string(),
            address: "1 Main St".to_string(),
            apartment: String::new(),
            city: "Springfield".to_string(),
            state: "IL".to_string(),
            zip_code: "62701".to_string(),
            country: "US".to_string(),
        }
    }

    fn card() -> PaymentSelection {
        PaymentSelection::with_card(
            PaymentMethod::CreditCard,
            CardInput {
                number: "4532 0151 1283 0366".to_string(),
                expiry: "12/99".to_string(),
                cvv: "123".to_string(),
                cardholder_name: "Jane Doe".to_string(),
            },
        )
    }

    async fn service(storage: &Storage, host: Arc<RecordingHost>) -> CheckoutService {
        CheckoutService::open(storage, host, clock(), Duration::ZERO)
            .await
            .unwrap()
    }

    fn walk_to_review(service: &CheckoutService) {
        service.set_shipping(form()).unwrap();
        service.next_step().unwrap();
        service.select_delivery(DeliveryOption::new("Standard Shipping", "Free")).unwrap();
        service.next_step().unwrap();
        service.select_payment(card()).unwrap();
        service.next_step().unwrap();
    }

    #[tokio::test]
    async fn test_open_without_snapshot_redirects_to_cart() {
        let storage = Storage::from_backend(MemoryStore::new());
        let host = Arc::new(RecordingHost::new());

        let err = CheckoutService::open(&storage, host.clone(), clock(), Duration::ZERO)
            .await
            .err()
            .unwrap();

        assert_eq!(err.code, ErrorCode::MissingPersistedState);
        assert_eq!(host.routes(), vec![Route::Cart]);
    }

    #[tokio::test]
    async fn test_failed_step_reports_every_message() {
        let storage = storage_with_snapshot().await;
        let host = Arc::new(RecordingHost::new());
        let service = service(&storage, host.clone()).await;

        let err = service.next_step().unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(service.current_step(), CheckoutStep::Shipping);

        let note = host.last_notification().unwrap();
        assert_eq!(note.severity, Severity::Error);
        assert!(note.message.contains("First Name is required"));
        assert!(note.message.contains("Country is required"));
        assert!(note.message.lines().count() > 1);
    }

    #[tokio::test]
    async fn test_back_never_goes_below_shipping() {
        let storage = storage_with_snapshot().await;
        let service = service(&storage, Arc::new(RecordingHost::new())).await;

        assert_eq!(service.previous_step(), CheckoutStep::Shipping);
        service.set_shipping(form()).unwrap();
        service.next_step().unwrap();
        assert_eq!(service.previous_step(), CheckoutStep::Shipping);
    }

    #[tokio::test]
    async fn test_place_order_clears_cart_and_records_order() {
        let storage = storage_with_snapshot().await;
        let host = Arc::new(RecordingHost::new());
        let service = service(&storage, host.clone()).await;
        walk_to_review(&service);

        let order = service.place_order().await.unwrap();

        assert!(order.order_id.starts_with("ORD-"));
        assert_eq!(order.order_id.len(), 12);
        assert_eq!(order.total, Money::from_dollars(48));
        assert_eq!(
            order.payment.card_details.as_ref().unwrap().last_four,
            "0366"
        );

        assert!(storage.cart().load().await.is_empty());
        assert!(storage.checkout().load().await.is_none());
        assert_eq!(service.orders().await, vec![order.clone()]);
        assert_eq!(service.find_order(&order.order_id).await, Some(order.clone()));

        assert_eq!(
            host.last_notification().unwrap().message,
            format!("Order {} placed successfully!", order.order_id)
        );
        assert_eq!(
            host.routes(),
            vec![Route::OrderConfirmation(order.order_id.clone())]
        );
        assert!(!service.is_placing());
    }

    #[tokio::test]
    async fn test_place_order_rechecks_payment() {
        let storage = storage_with_snapshot().await;
        let host = Arc::new(RecordingHost::new());
        let service = service(&storage, host.clone()).await;
        walk_to_review(&service);

        let mut expired = card();
        if let Some(card) = expired.card.as_mut() {
            card.expiry = "01/20".to_string();
        }
        service.select_payment(expired).unwrap();

        let err = service.place_order().await.unwrap_err();
        assert_eq!(err.message, "Invalid expiry date");
        assert!(storage.checkout().load().await.is_some());
        assert!(service.orders().await.is_empty());
    }

    #[tokio::test]
    async fn test_placed_session_refuses_another_order() {
        let storage = storage_with_snapshot().await;
        let host = Arc::new(RecordingHost::new());
        let service = service(&storage, host.clone()).await;
        walk_to_review(&service);

        let order = service.place_order().await.unwrap();
        assert_eq!(service.placed_order(), Some(order.order_id.clone()));

        let err = service.place_order().await.unwrap_err();
        assert_eq!(err.code, ErrorCode::CheckoutError);
        assert_eq!(
            err.message,
            format!("Order {} has already been placed", order.order_id)
        );
        assert_eq!(service.orders().await, vec![order]);

        assert!(service.next_step().is_err());
        assert!(service.select_payment(card()).is_err());
        assert!(service.set_shipping(form()).is_err());
        assert_eq!(host.last_notification().unwrap().severity, Severity::Error);
    }

    #[tokio::test]
    async fn test_order_only_placed_from_review() {
        let storage = storage_with_snapshot().await;
        let host = Arc::new(RecordingHost::new());
        let service = service(&storage, host.clone()).await;

        service.set_shipping(form()).unwrap();
        service.next_step().unwrap();
        service
            .select_delivery(DeliveryOption::new("Standard Shipping", "Free"))
            .unwrap();
        service.next_step().unwrap();
        service.select_payment(card()).unwrap();
        assert_eq!(service.current_step(), CheckoutStep::Payment);

        let err = service.place_order().await.unwrap_err();
        assert_eq!(err.code, ErrorCode::CheckoutError);
        assert!(service.orders().await.is_empty());
        assert!(storage.checkout().load().await.is_some());
    }

    #[tokio::test]
    async fn test_unreadable_history_keeps_cart() {
        let storage = storage_with_snapshot().await;
        storage
            .backend()
            .set("orders", r#"[{"orderId":"ORD-OLD","legacy":true}]"#)
            .await
            .unwrap();
        let host = Arc::new(RecordingHost::new());
        let service = service(&storage, host.clone()).await;
        walk_to_review(&service);

        let err = service.place_order().await.unwrap_err();
        assert_eq!(err.code, ErrorCode::StorageError);
        assert!(service.placed_order().is_none());
        assert!(!storage.cart().load().await.is_empty());
        assert!(storage.checkout().load().await.is_some());
        assert_eq!(
            storage.backend().get("orders").await.unwrap().as_deref(),
            Some(r#"[{"orderId":"ORD-OLD","legacy":true}]"#)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_submission_is_rejected_while_placing() {
        let storage = storage_with_snapshot().await;
        let host = Arc::new(RecordingHost::new());
        let service = CheckoutService::open(&storage, host.clone(), clock(), Duration::from_secs(2))
            .await
            .unwrap();
        walk_to_review(&service);

        let (first, second) = tokio::join!(service.place_order(), service.place_order());

        assert!(first.is_ok());
        assert_eq!(second.unwrap_err().code, ErrorCode::OrderInProgress);
        assert_eq!(service.orders().await.len(), 1);
        assert!(!service.is_placing());
    }
}
