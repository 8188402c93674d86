//! # Checkout
//!
//! Turns a user's cart into an order. The workflow is a linear saga with no
//! transaction spanning the stores:
//!
//! ```text
//! cart loaded -> user validated -> items validated -> order persisted -> cart cleared -> event published
//!      |               |                 |
//!      +---------------+-----------------+--> aborted (nothing written)
//! ```
//!
//! Everything before the order insert may abort the checkout, and an abort writes
//! nothing. Once the order is persisted it is the result: failing to clear the cart
//! or to publish the event is logged and reported on the [`CheckoutReceipt`], never
//! turned into an error.
//!
//! Line prices always come from the catalog at checkout time. The price stored on the
//! cart line is only used to log drift.

use super::{ServiceError, UserLocks};
use crate::clients::{CartClient, OrderClient};
use crate::events::{EventPublisher, OrderCreatedEvent};
use crate::lookup::{CallPolicy, ProductCatalog, UserDirectory};
use crate::model::{CartItem, NewOrder, NewOrderLine, Order, OrderStatus, UserId};
use futures::{stream, StreamExt, TryStreamExt};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

/// Tuning knobs of the workflow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheckoutOptions {
    pub policy: CallPolicy,
    /// Upper bound for publishing the order event.
    pub event_timeout: Duration,
    /// Product lookups in flight at once.
    pub product_fan_out: usize,
}

impl Default for CheckoutOptions {
    fn default() -> Self {
        Self {
            policy: CallPolicy::default(),
            event_timeout: Duration::from_millis(500),
            product_fan_out: 8,
        }
    }
}

/// Outcome of a checkout that did not fail.
#[derive(Debug, Clone, PartialEq)]
pub enum Checkout {
    Placed(CheckoutReceipt),
    /// The cart had no lines, so no order was created.
    EmptyCart,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutReceipt {
    pub order: Order,
    /// `false` when the order exists but the cart could not be cleared.
    pub cart_cleared: bool,
    pub event_published: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    CartLoaded,
    UserValidated,
    ItemsValidated,
    OrderPersisted,
    CartCleared,
    EventPublished,
}

impl Stage {
    fn as_str(self) -> &'static str {
        match self {
            Self::CartLoaded => "cart_loaded",
            Self::UserValidated => "user_validated",
            Self::ItemsValidated => "items_validated",
            Self::OrderPersisted => "order_persisted",
            Self::CartCleared => "cart_cleared",
            Self::EventPublished => "event_published",
        }
    }
}

#[derive(Clone)]
pub struct CheckoutService {
    carts: CartClient,
    orders: OrderClient,
    users: Arc<dyn UserDirectory>,
    products: Arc<dyn ProductCatalog>,
    events: Arc<dyn EventPublisher>,
    options: CheckoutOptions,
    locks: Option<UserLocks>,
}

impl CheckoutService {
    pub fn new(
        carts: CartClient,
        orders: OrderClient,
        users: Arc<dyn UserDirectory>,
        products: Arc<dyn ProductCatalog>,
        events: Arc<dyn EventPublisher>,
        options: CheckoutOptions,
        locks: Option<UserLocks>,
    ) -> Self {
        Self {
            carts,
            orders,
            users,
            products,
            events,
            options,
            locks,
        }
    }

    /// Places an order for everything in the user's cart.
    ///
    /// # Errors
    /// - `UserNotFound`, `ProductNotFound`, `InsufficientStock`: nothing was written.
    /// - `Unavailable`: a collaborator did not answer within the call policy.
    /// - `Cart` / `Order`: a store failed before the order was persisted.
    #[instrument(name = "checkout", skip(self), fields(user_id = %user_id))]
    pub async fn create_order(&self, user_id: &UserId) -> Result<Checkout, ServiceError> {
        info!("Checkout started");
        let result = self.run(user_id).await;
        match &result {
            Ok(Checkout::Placed(receipt)) => info!(
                order_id = %receipt.order.id,
                total = %receipt.order.total_amount(),
                cart_cleared = receipt.cart_cleared,
                event_published = receipt.event_published,
                "Order placed"
            ),
            Ok(Checkout::EmptyCart) => info!("Cart is empty, no order created"),
            Err(e) => warn!(error = %e, "Checkout aborted"),
        }
        result
    }

    async fn run(&self, user_id: &UserId) -> Result<Checkout, ServiceError> {
        let guard = match &self.locks {
            Some(locks) => Some(locks.lock(user_id).await),
            None => None,
        };

        let cart = self.carts.list_by_user(user_id).await?;
        if cart.is_empty() {
            return Ok(Checkout::EmptyCart);
        }
        stage_complete(Stage::CartLoaded);

        self.options
            .policy
            .call("user", || self.users.get_user(user_id))
            .await
            .map_err(ServiceError::unavailable("user"))?
            .ok_or_else(|| ServiceError::UserNotFound(user_id.clone()))?;
        stage_complete(Stage::UserValidated);

        let lines = self.price_lines(&cart).await?;
        stage_complete(Stage::ItemsValidated);

        let order = self
            .orders
            .insert(NewOrder {
                user_id: user_id.clone(),
                status: OrderStatus::Confirmed,
                lines,
            })
            .await?;
        stage_complete(Stage::OrderPersisted);

        let cart_cleared = match self.carts.delete_all_for_user(user_id).await {
            Ok(removed) => {
                debug!(removed, "Cart cleared");
                stage_complete(Stage::CartCleared);
                true
            }
            Err(e) => {
                error!(order_id = %order.id, error = %e, "Order persisted but cart not cleared");
                false
            }
        };
        drop(guard);

        let event_published = self.publish(&order).await;
        if event_published {
            stage_complete(Stage::EventPublished);
        }

        Ok(Checkout::Placed(CheckoutReceipt {
            order,
            cart_cleared,
            event_published,
        }))
    }

    /// Re-validates every cart line against the catalog, keeping cart order. Lookups
    /// run concurrently; the first failing line in cart order is reported.
    async fn price_lines(&self, cart: &[CartItem]) -> Result<Vec<NewOrderLine>, ServiceError> {
        // Collected up front: a lazy `map` held across the await makes the future non-Send.
        let lookups: Vec<_> = cart.iter().map(|item| self.price_line(item)).collect();
        stream::iter(lookups)
            .buffered(self.options.product_fan_out.max(1))
            .try_collect()
            .await
    }

    async fn price_line(&self, item: &CartItem) -> Result<NewOrderLine, ServiceError> {
        let product = self
            .options
            .policy
            .call("product", || self.products.get_product(&item.product_id))
            .await
            .map_err(ServiceError::unavailable("product"))?
            .ok_or_else(|| ServiceError::ProductNotFound(item.product_id.clone()))?;

        if product.stock_quantity < item.quantity {
            return Err(ServiceError::InsufficientStock {
                product_id: item.product_id.clone(),
                requested: item.quantity,
                available: product.stock_quantity,
            });
        }
        if product.price != item.unit_price {
            debug!(
                product_id = %item.product_id,
                cart_price = %item.unit_price,
                current_price = %product.price,
                "Price changed since added to cart"
            );
        }

        Ok(NewOrderLine {
            product_id: item.product_id.clone(),
            quantity: item.quantity,
            unit_price: product.price,
        })
    }

    async fn publish(&self, order: &Order) -> bool {
        let event = OrderCreatedEvent::from(order);
        match tokio::time::timeout(self.options.event_timeout, self.events.publish(event)).await {
            Ok(Ok(())) => true,
            Ok(Err(e)) => {
                warn!(order_id = %order.id, error = %e, "Order event not published");
                false
            }
            Err(_) => {
                warn!(order_id = %order.id, timeout = ?self.options.event_timeout, "Order event publish timed out");
                false
            }
        }
    }
}

fn stage_complete(stage: Stage) {
    info!(stage = stage.as_str(), "Stage complete");
}
