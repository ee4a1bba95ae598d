//! # ShopEase Storefront Library
//!
//! Services behind the ShopEase pages: the cart, the checkout wizard and the
//! product listing. The page script (or any other host) calls into these
//! services and draws what they return.
//!
//! ## Module Organization
//! ```text
//! shopease_storefront/
//! ├── lib.rs          ◄─── You are here (wiring, tracing, run)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── config.rs   ◄─── StorefrontConfig (env + defaults, formatting)
//! │   └── clock.rs    ◄─── Clock trait, system and fixed clocks
//! ├── services/
//! │   ├── mod.rs      ◄─── Service exports
//! │   ├── cart.rs     ◄─── CartLedger
//! │   ├── checkout.rs ◄─── CheckoutService (wizard + order placement)
//! │   └── catalog.rs  ◄─── CatalogService
//! ├── view/           ◄─── Render models exported to TypeScript
//! ├── host.rs         ◄─── Host trait, events, notifications, routes
//! └── error.rs        ◄─── API error type for services
//! ```
//!
//! ## Wiring
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Storefront                                      │
//! │                                                                         │
//! │   ┌───────────────┐  ┌───────────────┐  ┌──────────────┐  ┌─────────┐  │
//! │   │   Storage     │  │ Storefront    │  │  Arc<dyn     │  │ Arc<dyn │  │
//! │   │ (SQLite/mem)  │  │ Config        │  │  Host>       │  │ Clock>  │  │
//! │   └───────┬───────┘  └───────┬───────┘  └──────┬───────┘  └────┬────┘  │
//! │           └──────────────────┴────────┬────────┴───────────────┘       │
//! │                                       ▼                                 │
//! │        cart_ledger()         checkout()            catalog(products)    │
//! │             │                     │                       │             │
//! │             ▼                     ▼                       ▼             │
//! │       CartLedger          CheckoutService          CatalogService       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Services are built on demand, one per page visit, and share nothing but
//! the store.

use std::sync::Arc;

use shopease_core::Product;
use shopease_store::{SqliteStore, Storage, StoreConfig};
use tracing::{info, warn, Level};
use tracing_subscriber::EnvFilter;

pub mod error;
pub mod host;
pub mod services;
pub mod state;
pub mod view;

pub use error::{ApiError, ErrorCode, StartupError};
pub use host::{Host, LogHost, Notification, RecordingHost, Route, Severity, StorefrontEvent};
pub use services::{CartLedger, CatalogService, CheckoutService};
pub use state::{Clock, FixedClock, StorefrontConfig, SystemClock};

/// Shared wiring for every storefront service.
#[derive(Clone)]
pub struct Storefront {
    storage: Storage,
    config: StorefrontConfig,
    host: Arc<dyn Host>,
    clock: Arc<dyn Clock>,
}

impl Storefront {
    /// Opens the SQLite store named by the configuration.
    ///
    /// ## Startup Sequence
    /// ```text
    /// 1. Resolve database path (SHOPEASE_DB_PATH or platform data dir)
    /// 2. Connect (WAL for files, single connection for :memory:)
    /// 3. Run pending migrations
    /// ```
    pub async fn open(config: StorefrontConfig, host: Arc<dyn Host>) -> Result<Self, StartupError> {
        let db_path = config.resolve_database_path()?;
        info!(?db_path, "Database path determined");

        let store_config = StoreConfig::new(db_path);
        let store_config = if store_config.is_in_memory() {
            StoreConfig::in_memory()
        } else {
            store_config
        };

        let backend = SqliteStore::new(store_config).await?;
        info!("Store connected and migrations applied");

        Ok(Storefront::with_storage(
            Storage::from_backend(backend),
            config,
            host,
            Arc::new(SystemClock),
        ))
    }

    /// Wires services to an already opened store.
    pub fn with_storage(
        storage: Storage,
        config: StorefrontConfig,
        host: Arc<dyn Host>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Storefront {
            storage,
            config,
            host,
            clock,
        }
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Cart page service, loaded from the persisted cart.
    pub async fn cart_ledger(&self) -> CartLedger {
        CartLedger::load(&self.storage, self.host.clone()).await
    }

    /// Checkout page service. Fails (and redirects to the cart) when no
    /// checkout snapshot has been saved.
    pub async fn checkout(&self) -> Result<CheckoutService, ApiError> {
        CheckoutService::open(
            &self.storage,
            self.host.clone(),
            self.clock.clone(),
            self.config.order_latency,
        )
        .await
    }

    /// Products page service over the given product set.
    pub fn catalog(&self, products: Vec<Product>) -> CatalogService {
        CatalogService::new(products, self.host.clone())
    }
}

impl std::fmt::Debug for Storefront {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storefront")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Runs the headless storefront: opens the store and prints the cart page.
pub async fn run() -> Result<(), StartupError> {
    init_tracing();

    info!("Starting ShopEase storefront");

    let config = StorefrontConfig::from_env();
    let storefront = Storefront::open(config, Arc::new(LogHost::default())).await?;

    let ledger = storefront.cart_ledger().await;
    let view = ledger.view(storefront.config());
    match serde_json::to_string_pretty(&view) {
        Ok(json) => println!("{json}"),
        Err(err) => warn!(error = %err, "Could not render cart"),
    }

    let orders = storefront.storage().orders().list().await;
    info!(
        items = view.badge_count,
        total = %view.grand_total,
        orders = orders.len(),
        "Storefront ready"
    );
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=shopease=trace` - Show trace for shopease crates only
/// - Default: INFO, DEBUG for shopease crates
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,shopease=debug,sqlx=warn"));

    // A second call (tests, embedding hosts) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::TRACE)
        .try_init();
}
