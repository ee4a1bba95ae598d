//! # Checkout Wizard
//!
//! `CheckoutState` holds the current step, the data recorded by each passed
//! step, the cart snapshot, and the host's current selections.
//!
//! ## Validation Per Step
//! ```text
//! ┌──────────┬────────────────────────────────────────────────────────────┐
//! │ Step     │ Rules (every failure collected, none fail-fast)            │
//! ├──────────┼────────────────────────────────────────────────────────────┤
//! │ Shipping │ required fields non-blank, email shape, phone shape        │
//! │ Delivery │ an option is selected, its price text parses               │
//! │ Payment  │ an option is selected; card methods: number, expiry, CVV,  │
//! │          │ cardholder name                                            │
//! │ Review   │ nothing to check                                           │
//! └──────────┴────────────────────────────────────────────────────────────┘
//! ```
//!
//! Selections are explicit state. Changing a selection never records
//! anything; only a passing validator does.
//!
//! Once the order is saved the session is marked placed and refuses to
//! advance or build another order.

use chrono::{DateTime, NaiveDate, Utc};

use crate::cart::CheckoutSnapshot;
use crate::checkout::forms::{
    CardInput, CardSummary, Delivery, DeliveryOption, Payment, PaymentSelection, ShippingField,
    ShippingForm,
};
use crate::checkout::order::Order;
use crate::checkout::CheckoutStep;
use crate::error::{CoreError, CoreResult, ValidationError, ValidationErrors};
use crate::types::OrderStatus;
use crate::validation::{
    validate_card_number, validate_cardholder_name, validate_cvv, validate_email, validate_expiry,
    validate_phone,
};

/// State of one checkout session.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutState {
    pub current_step: CheckoutStep,

    /// Trimmed shipping form, recorded when step 1 passes.
    pub shipping: Option<ShippingForm>,
    /// Recorded when step 2 passes.
    pub delivery: Option<Delivery>,
    /// Recorded when step 3 passes.
    pub payment: Option<Payment>,

    /// Snapshot written by the cart when checkout began.
    pub cart: CheckoutSnapshot,

    // Host selections
    pub shipping_input: ShippingForm,
    pub selected_delivery: Option<DeliveryOption>,
    pub selected_payment: Option<PaymentSelection>,

    required_fields: Vec<ShippingField>,
    placed_order: Option<String>,
}

impl CheckoutState {
    /// Starts a session on the shipping step.
    pub fn new(cart: CheckoutSnapshot) -> Self {
        CheckoutState {
            current_step: CheckoutStep::Shipping,
            shipping: None,
            delivery: None,
            payment: None,
            cart,
            shipping_input: ShippingForm::default(),
            selected_delivery: None,
            selected_payment: None,
            required_fields: ShippingField::default_required(),
            placed_order: None,
        }
    }

    /// Replaces the set of shipping fields that must be filled in.
    pub fn with_required_fields(mut self, fields: Vec<ShippingField>) -> Self {
        self.required_fields = fields;
        self
    }

    pub fn required_fields(&self) -> &[ShippingField] {
        &self.required_fields
    }

    /// Id of the order this session produced, if any.
    pub fn placed_order(&self) -> Option<&str> {
        self.placed_order.as_deref()
    }

    /// Closes the session after its order has been saved.
    pub fn mark_placed(&mut self, order_id: impl Into<String>) {
        self.placed_order = Some(order_id.into());
    }

    /// Fails once the session has produced an order.
    pub fn ensure_open(&self) -> CoreResult<()> {
        match &self.placed_order {
            Some(order_id) => Err(CoreError::AlreadyPlaced(order_id.clone())),
            None => Ok(()),
        }
    }

    // =========================================================================
    // Selections
    // =========================================================================

    pub fn set_shipping_input(&mut self, form: ShippingForm) {
        self.shipping_input = form;
    }

    pub fn select_delivery(&mut self, option: DeliveryOption) {
        self.selected_delivery = Some(option);
    }

    pub fn select_payment(&mut self, selection: PaymentSelection) {
        self.selected_payment = Some(selection);
    }

    // =========================================================================
    // Step Validators
    // =========================================================================

    /// Step 1. On success the trimmed form is recorded.
    pub fn validate_shipping(&mut self) -> CoreResult<()> {
        let form = self.shipping_input.trimmed();
        let mut errors = ValidationErrors::new();

        for field in &self.required_fields {
            if form.get(*field).is_empty() {
                errors.push(ValidationError::Required {
                    field: field.label().to_string(),
                });
            }
        }

        if !form.email.is_empty() {
            if let Err(err) = validate_email(&form.email) {
                errors.push(err);
            }
        }

        if !form.phone.is_empty() {
            if let Err(err) = validate_phone(&form.phone) {
                errors.push(err);
            }
        }

        let form = errors.into_result(form)?;
        self.shipping = Some(form);
        Ok(())
    }

    /// Step 2. Records the method title and the parsed price.
    pub fn validate_delivery(&mut self) -> CoreResult<()> {
        let option = self
            .selected_delivery
            .as_ref()
            .ok_or(CoreError::NoDeliverySelected)?;

        let price = option.price()?;
        self.delivery = Some(Delivery {
            method: option.title.trim().to_string(),
            price,
        });
        Ok(())
    }

    /// Step 3. Card methods must pass every card rule; only a redacted
    /// summary is recorded.
    pub fn validate_payment(&mut self, today: NaiveDate) -> CoreResult<()> {
        let payment = Self::check_payment(self.selected_payment.as_ref(), today)?;
        self.payment = Some(payment);
        Ok(())
    }

    fn check_payment(selection: Option<&PaymentSelection>, today: NaiveDate) -> CoreResult<Payment> {
        let selection = selection.ok_or(CoreError::NoPaymentSelected)?;

        if !selection.method.is_card() {
            return Ok(Payment {
                method: selection.method,
                card_details: None,
            });
        }

        let empty = CardInput::default();
        let card = selection.card.as_ref().unwrap_or(&empty);

        let mut errors = ValidationErrors::new();
        let checks = [
            validate_card_number(&card.number),
            validate_expiry(&card.expiry, today),
            validate_cvv(&card.cvv),
            validate_cardholder_name(&card.cardholder_name),
        ];
        for err in checks.into_iter().filter_map(Result::err) {
            errors.push(err);
        }
        errors.into_result(())?;

        Ok(Payment {
            method: selection.method,
            card_details: Some(CardSummary::from_input(card)),
        })
    }

    /// Runs the validator of the current step. Review has none.
    pub fn validate_current_step(&mut self, today: NaiveDate) -> CoreResult<()> {
        match self.current_step {
            CheckoutStep::Shipping => self.validate_shipping(),
            CheckoutStep::Delivery => self.validate_delivery(),
            CheckoutStep::Payment => self.validate_payment(today),
            CheckoutStep::Review => Ok(()),
        }
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Validates the current step and moves one step forward.
    ///
    /// On failure the step is unchanged and the error carries every message.
    /// On the review step this is a no-op.
    pub fn advance(&mut self, today: NaiveDate) -> CoreResult<CheckoutStep> {
        self.ensure_open()?;
        self.validate_current_step(today)?;
        if let Some(next) = self.current_step.next() {
            self.current_step = next;
        }
        Ok(self.current_step)
    }

    /// Moves one step back, never below shipping. No validation.
    pub fn back(&mut self) -> CheckoutStep {
        if let Some(previous) = self.current_step.previous() {
            self.current_step = previous;
        }
        self.current_step
    }

    // =========================================================================
    // Order
    // =========================================================================

    /// Builds the order record.
    ///
    /// Only the review step can build an order. The payment selection is
    /// validated again against `today`; a failure aborts with the same
    /// messages as step 3. Shipping and delivery must already be recorded.
    pub fn prepare_order(
        &mut self,
        order_id: String,
        placed_at: DateTime<Utc>,
        today: NaiveDate,
    ) -> CoreResult<Order> {
        self.ensure_open()?;
        if self.current_step != CheckoutStep::Review {
            return Err(CoreError::IncompleteCheckout("Review"));
        }

        let payment = Self::check_payment(self.selected_payment.as_ref(), today)?;
        self.payment = Some(payment.clone());

        let shipping = self
            .shipping
            .clone()
            .ok_or(CoreError::IncompleteCheckout("Shipping"))?;
        let delivery = self
            .delivery
            .clone()
            .ok_or(CoreError::IncompleteCheckout("Delivery"))?;

        Ok(Order {
            order_id,
            date: placed_at,
            status: OrderStatus::Processing,
            shipping,
            delivery,
            payment,
            total: self.cart.total,
            cart: self.cart.clone(),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
