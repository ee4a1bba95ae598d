//! # Host Interface
//!
//! Everything the storefront asks of the page it runs in.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Service → Host                                       │
//! │                                                                         │
//! │  CartLedger ──────┐                                                     │
//! │                   │   emit(CartChanged)          → re-render cart, badge │
//! │  CheckoutService ─┼─► emit(Notify{..})           → toast                 │
//! │                   │   emit(Navigate(route))      → page change           │
//! │  CatalogService ──┘   confirm("Are you sure..")  → yes/no dialog         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rendering, toasts and navigation stay on the host side; services only
//! describe what happened.

use std::sync::Mutex;

use serde::Serialize;
use tracing::info;
use ts_rs::TS;

// =============================================================================
// Events
// =============================================================================

/// Toast severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
    Info,
}

/// A message for the shopper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Notification {
            message: message.into(),
            severity: Severity::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Notification {
            message: message.into(),
            severity: Severity::Error,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Notification {
            message: message.into(),
            severity: Severity::Info,
        }
    }
}

/// Pages the storefront can send the shopper to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(tag = "page", content = "orderId", rename_all = "camelCase")]
pub enum Route {
    Cart,
    Checkout,
    /// Order confirmation for the given order id.
    OrderConfirmation(String),
}

/// What a service tells its host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum StorefrontEvent {
    /// Cart contents or totals changed; re-render the cart and badge.
    CartChanged,
    Notify(Notification),
    Navigate(Route),
}

// =============================================================================
// Host Trait
// =============================================================================

/// The page a storefront service runs in.
pub trait Host: Send + Sync {
    fn emit(&self, event: StorefrontEvent);

    /// Asks the shopper a yes/no question.
    fn confirm(&self, prompt: &str) -> bool;

    fn notify(&self, notification: Notification) {
        self.emit(StorefrontEvent::Notify(notification));
    }

    fn navigate(&self, route: Route) {
        self.emit(StorefrontEvent::Navigate(route));
    }
}

/// Host that writes every event to the log. Used by the headless binary.
#[derive(Debug, Clone, Copy)]
pub struct LogHost {
    answer: bool,
}

impl LogHost {
    /// `answer` is returned for every confirmation.
    pub fn new(answer: bool) -> Self {
        LogHost { answer }
    }
}

impl Default for LogHost {
    fn default() -> Self {
        LogHost::new(true)
    }
}

impl Host for LogHost {
    fn emit(&self, event: StorefrontEvent) {
        match &event {
            StorefrontEvent::CartChanged => info!("Cart changed"),
            StorefrontEvent::Notify(n) => {
                info!(severity = ?n.severity, message = %n.message, "Notification")
            }
            StorefrontEvent::Navigate(route) => info!(?route, "Navigate"),
        }
    }

    fn confirm(&self, prompt: &str) -> bool {
        info!(prompt = %prompt, answer = self.answer, "Confirmation");
        self.answer
    }
}

/// Host that keeps every event and prompt in memory.
///
/// ## Usage
/// ```rust,ignore
/// let host = Arc::new(RecordingHost::new());
/// host.set_answer(false);
/// ledger.clear().await;
/// assert_eq!(host.prompts(), vec!["Are you sure you want to clear your cart?"]);
/// ```
#[derive(Debug)]
pub struct RecordingHost {
    events: Mutex<Vec<StorefrontEvent>>,
    prompts: Mutex<Vec<String>>,
    answer: Mutex<bool>,
}

impl RecordingHost {
    /// Confirms every prompt until told otherwise.
    pub fn new() -> Self {
        RecordingHost {
            events: Mutex::new(Vec::new()),
            prompts: Mutex::new(Vec::new()),
            answer: Mutex::new(true),
        }
    }

    pub fn set_answer(&self, answer: bool) {
        *self.answer.lock().expect("Host mutex poisoned") = answer;
    }

    pub fn events(&self) -> Vec<StorefrontEvent> {
        self.events.lock().expect("Host mutex poisoned").clone()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("Host mutex poisoned").clone()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                StorefrontEvent::Notify(n) => Some(n),
                _ => None,
            })
            .collect()
    }

    pub fn last_notification(&self) -> Option<Notification> {
        self.notifications().pop()
    }

    pub fn routes(&self) -> Vec<Route> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                StorefrontEvent::Navigate(route) => Some(route),
                _ => None,
            })
            .collect()
    }

    /// Forgets everything recorded so far.
    pub fn reset(&self) {
        self.events.lock().expect("Host mutex poisoned").clear();
        self.prompts.lock().expect("Host mutex poisoned").clear();
    }
}

impl Default for RecordingHost {
    fn default() -> Self {
        Self::new()
    }
}

impl Host for RecordingHost {
    fn emit(&self, event: StorefrontEvent) {
        self.events.lock().expect("Host mutex poisoned").push(event);
    }

    fn confirm(&self, prompt: &str) -> bool {
        self.prompts
            .lock()
            .expect("Host mutex poisoned")
            .push(prompt.to_string());
        *self.answer.lock().expect("Host mutex poisoned")
    }
}
