//! # Observability & Tracing
//!
//! Subscriber setup shared by every binary built on the framework.
//!
//! Actors log with an `entity_type` field (`CartItem`, `Order`, ...) instead of the
//! module path, so the formatter hides targets and uses the compact layout, which
//! prints span names inline (e.g. `checkout:create_order`).
//!
//! ```bash
//! # Default level comes from configuration
//! cargo run -p order-service
//!
//! # Full payloads on every store request
//! RUST_LOG=debug cargo run -p order-service
//!
//! # Only the checkout workflow
//! RUST_LOG=order_service::service=debug cargo run -p order-service
//! ```
//!
//! At `info` a successful checkout reads roughly as:
//!
//! ```text
//! INFO checkout: Checkout started user_id=user_1
//! INFO checkout: Stage complete stage=validate_user
//! INFO checkout: Stage complete stage=validate_products items=2
//! INFO Created entity_type="Order" id=order_1 size=1
//! INFO Deleted matching entity_type="CartItem" filter="user_id=user_1" removed=2 size=0
//! INFO checkout: Order placed order_id=order_1 total=35.00
//! ```

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber.
///
/// `RUST_LOG` wins when set; otherwise `default_filter` (e.g. `"info"`) is used.
pub fn setup_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
