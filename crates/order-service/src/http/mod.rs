//! # HTTP Surface
//!
//! | Route | Outcome |
//! |-------|---------|
//! | `POST /api/cart` | `200` message, `400` unknown user/product, low stock, bad quantity |
//! | `GET /api/cart` | `200` cart lines with line totals |
//! | `DELETE /api/cart/items/:product_id` | `204`, or `404` when not in the cart |
//! | `POST /api/orders` | `201` order, `400` empty cart or failed validation |
//! | `GET /api/orders/:id` | `200` order, `404` when absent |
//! | `GET /api/orders` | `200` every order |
//! | `GET /api/orders/user/:user_id` | `200` the user's orders |
//! | `GET /health` | `200` |
//!
//! Cart and checkout routes read the caller from the `X-User-ID` header. A lookup
//! that could not reach the user or product service answers `503`.

pub mod error;
pub mod handlers;

pub use error::{ApiError, ErrorResponse};

use crate::clients::OrderClient;
use crate::service::{CartService, CheckoutService};
use axum::routing::{delete, get};
use axum::Router;
use tower_http::trace::TraceLayer;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub carts: CartService,
    pub checkout: CheckoutService,
    pub orders: OrderClient,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/api/cart",
            get(handlers::get_cart).post(handlers::add_to_cart),
        )
        .route(
            "/api/cart/items/:product_id",
            delete(handlers::remove_from_cart),
        )
        .route(
            "/api/orders",
            get(handlers::list_orders).post(handlers::create_order),
        )
        .route("/api/orders/user/:user_id", get(handlers::list_user_orders))
        .route("/api/orders/:id", get(handlers::get_order))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
