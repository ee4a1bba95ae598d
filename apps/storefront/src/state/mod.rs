//! # State Module
//!
//! Read-only settings shared by every storefront service.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────┐          ┌──────────────────────┐            │
//! │  │  StorefrontConfig    │          │  Clock               │            │
//! │  │                      │          │                      │            │
//! │  │  database_path       │          │  SystemClock (prod)  │            │
//! │  │  order_latency       │          │  FixedClock (tests)  │            │
//! │  │  currency_symbol     │          │                      │            │
//! │  └──────────────────────┘          └──────────────────────┘            │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • StorefrontConfig: Read-only after initialization                    │
//! │  • Clock: Stateless, shared behind Arc<dyn Clock>                      │
//! │  • Mutable state lives in the services, each behind its own Mutex      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod clock;
mod config;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{StorefrontConfig, DEFAULT_ORDER_LATENCY_MS};
