//! # ShopEase Storefront Entry Point
//!
//! Headless run of the storefront: opens the store named by
//! `SHOPEASE_DB_PATH` (or the platform data directory) and prints the
//! current cart page as JSON.
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging)
//! 2. Load configuration from the environment
//! 3. Connect to the store & run migrations
//! 4. Load the persisted cart
//! 5. Print the cart render model

#[tokio::main]
async fn main() {
    // The actual setup is in lib.rs for better testability
    if let Err(err) = shopease_storefront::run().await {
        tracing::error!(error = %err, "Storefront failed to start");
        eprintln!("shopease-storefront: {err}");
        std::process::exit(1);
    }
}
